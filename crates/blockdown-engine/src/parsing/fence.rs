//! Fenced code block consumer.
//!
//! The fence owns every line from the opener to the matching closer, so
//! interior lines are never offered to the other recognizers. An
//! unterminated fence consumes to the end of the document.

use super::Step;
use crate::models::{Block, BlockKind, BlockMeta};

pub const FENCE: &str = "```";

/// Language tag that routes a fence body to a mermaid block instead of a
/// code block.
const MERMAID_TAG: &str = "mermaid";

pub fn consume(lines: &[&str], i: usize) -> Option<Step> {
    let opener = lines[i];
    if !opener.starts_with(FENCE) {
        return None;
    }
    let language = opener[FENCE.len()..].trim();

    let mut end = i + 1;
    while end < lines.len() && !lines[end].starts_with(FENCE) {
        end += 1;
    }
    let body = lines[i + 1..end].join("\n");

    // Count the closing fence only if one was found before end-of-input.
    let consumed = (end - i) + usize::from(end < lines.len());

    let block = if language == MERMAID_TAG {
        Block::new(
            BlockKind::Mermaid,
            "",
            Some(BlockMeta::Mermaid { diagram: body }),
        )
    } else if language.is_empty() {
        Block::new(BlockKind::Code, body, None)
    } else {
        Block::new(
            BlockKind::Code,
            body,
            Some(BlockMeta::Code {
                language: language.to_string(),
            }),
        )
    };

    Some(Step {
        block: Some(block),
        consumed,
    })
}
