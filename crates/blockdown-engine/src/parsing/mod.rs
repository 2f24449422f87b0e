//! Markdown → block parsing.
//!
//! A single forward pass over the document split into lines. At each cursor
//! position the recognizers in [`RECOGNIZERS`] are tried in order; the first
//! one that matches consumes one or more lines and emits zero or one blocks.
//! Lines nothing claims become paragraphs.
//!
//! The order of the table is load-bearing: several patterns share a leading
//! character (`- [ ]` vs `- `, `<##` vs `<#`, `---` as table separator vs
//! divider), so earlier entries win on ambiguous input.

pub mod fence;
pub mod patterns;
pub mod table;

use crate::models::{Block, BlockKind};

/// Outcome of a recognizer firing at the cursor.
///
/// `consumed` is the number of lines the recognizer owns and is always at
/// least 1. `block` is `None` for constructs that consume lines without
/// producing output (e.g. a table reduced to nothing but separator rows).
pub struct Step {
    pub block: Option<Block>,
    pub consumed: usize,
}

impl Step {
    pub fn single(block: Block) -> Option<Self> {
        Some(Self {
            block: Some(block),
            consumed: 1,
        })
    }
}

/// A recognizer inspects the line at the cursor (plus lookahead) and either
/// claims it or declines. Pure functions over the line slice; no shared
/// matcher state.
type Recognizer = fn(&[&str], usize) -> Option<Step>;

/// Ordered recognizer table. Earlier entries win.
const RECOGNIZERS: &[Recognizer] = &[
    fence::consume,
    patterns::video_embed,
    patterns::iframe_embed,
    table::consume,
    patterns::collapsible_heading,
    patterns::heading,
    patterns::check_list,
    patterns::bullet_list,
    patterns::numbered_list,
    patterns::quote,
    patterns::divider,
    patterns::image,
    patterns::link_preview,
    patterns::bare_url,
];

/// Parse free-form Markdown into an ordered block list.
///
/// Never fails: unrecognized lines degrade to paragraph blocks, and an
/// empty or whitespace-only document normalizes to a single empty
/// paragraph.
pub fn markdown_to_blocks(markdown: &str) -> Vec<Block> {
    if markdown.trim().is_empty() {
        return vec![Block::empty(BlockKind::Paragraph)];
    }

    let lines: Vec<&str> = markdown.split('\n').collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if line.trim().is_empty() {
            i += 1;
            continue;
        }

        let step = RECOGNIZERS
            .iter()
            .find_map(|recognize| recognize(&lines, i))
            .unwrap_or_else(|| Step {
                block: Some(Block::new(BlockKind::Paragraph, line, None)),
                consumed: 1,
            });

        debug_assert!(step.consumed > 0, "recognizer must consume at least one line");
        blocks.extend(step.block);
        i += step.consumed;
    }

    if blocks.is_empty() {
        vec![Block::empty(BlockKind::Paragraph)]
    } else {
        blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BlockMeta;
    use pretty_assertions::assert_eq;

    fn kinds(markdown: &str) -> Vec<BlockKind> {
        markdown_to_blocks(markdown).iter().map(|b| b.kind).collect()
    }

    #[test]
    fn empty_input_normalizes_to_one_paragraph() {
        for input in ["", "   \n  \n", "\n\n\n"] {
            let blocks = markdown_to_blocks(input);
            assert_eq!(blocks.len(), 1, "input {input:?}");
            assert_eq!(blocks[0].kind, BlockKind::Paragraph);
            assert_eq!(blocks[0].content, "");
        }
    }

    #[test]
    fn plain_prose_becomes_paragraphs() {
        let blocks = markdown_to_blocks("first line\nsecond line");
        assert_eq!(
            blocks.iter().map(|b| b.content.as_str()).collect::<Vec<_>>(),
            vec!["first line", "second line"]
        );
        assert!(blocks.iter().all(|b| b.kind == BlockKind::Paragraph));
    }

    #[test]
    fn blank_lines_between_blocks_are_skipped() {
        assert_eq!(
            kinds("# Title\n\n\nSome text\n\n- item"),
            vec![BlockKind::Heading1, BlockKind::Paragraph, BlockKind::BulletList]
        );
    }

    #[test]
    fn checklist_wins_over_bullet() {
        assert_eq!(kinds("- [ ] todo"), vec![BlockKind::CheckList]);
        assert_eq!(kinds("- not a todo"), vec![BlockKind::BulletList]);
    }

    #[test]
    fn collapsible_heading_wins_over_paragraph() {
        assert_eq!(kinds("<## Folded"), vec![BlockKind::CollapsibleHeading2]);
    }

    #[test]
    fn fence_owns_interior_lines() {
        let blocks = markdown_to_blocks("```\n# not a heading\n- not a list\n```");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Code);
        assert_eq!(blocks[0].content, "# not a heading\n- not a list");
    }

    #[test]
    fn unterminated_fence_consumes_to_end() {
        let blocks = markdown_to_blocks("```rust\nlet x = 1;\nlet y = 2;");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Code);
        assert_eq!(blocks[0].content, "let x = 1;\nlet y = 2;");
    }

    #[test]
    fn mermaid_fence_owns_heading_lookalikes() {
        let blocks = markdown_to_blocks("```mermaid\ngraph TD\n# still diagram\n```");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Mermaid);
        assert_eq!(
            blocks[0].meta,
            Some(BlockMeta::Mermaid {
                diagram: "graph TD\n# still diagram".to_string()
            })
        );
    }

    #[test]
    fn table_example_from_contract() {
        let blocks = markdown_to_blocks("| A | B |\n| --- | --- |\n| 1 | 2 |");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Table);
        assert_eq!(
            blocks[0].meta,
            Some(BlockMeta::Table {
                data: vec![
                    vec!["A".to_string(), "B".to_string()],
                    vec!["1".to_string(), "2".to_string()],
                ],
                rows: 2,
                cols: 2,
            })
        );
    }

    #[test]
    fn mixed_document() {
        let md = "# Title\n\nIntro paragraph.\n\n- one\n- two\n\n> quoted\n\n---\n\n![alt](https://x.test/i.png)";
        assert_eq!(
            kinds(md),
            vec![
                BlockKind::Heading1,
                BlockKind::Paragraph,
                BlockKind::BulletList,
                BlockKind::BulletList,
                BlockKind::Quote,
                BlockKind::Divider,
                BlockKind::Image,
            ]
        );
    }

    #[test]
    fn divider_not_confused_with_table_separator() {
        // `---` alone is a divider; it only acts as a separator when the
        // previous line starts a pipe row.
        assert_eq!(kinds("---"), vec![BlockKind::Divider]);
        assert_eq!(kinds("| a |\n---"), vec![BlockKind::Table]);
    }
}
