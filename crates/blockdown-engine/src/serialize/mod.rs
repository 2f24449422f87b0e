//! Block → text serializers.
//!
//! Two Markdown writers exist on purpose:
//!
//! - [`blocks_to_markdown`] (this module) is the **storage codec**: every
//!   construct it emits is recognized by [`crate::parsing::markdown_to_blocks`],
//!   including the `@[video](url)` / `@[iframe:<height>](url)` pseudo-tags,
//!   so notes round-trip through persistence.
//! - [`export::blocks_to_markdown`] is **display-only**: video and iframe
//!   blocks become plain descriptive links that read well in any Markdown
//!   viewer but do not re-import as their original kinds.

pub mod export;

use crate::models::{Block, BlockKind, BlockMeta};

/// Serialize blocks to round-trippable Markdown, joined by blank lines.
///
/// Total over the block list; blocks that render to nothing (an image with
/// no URL, a table with no data) are dropped from the join.
pub fn blocks_to_markdown(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(render)
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render(block: &Block) -> String {
    match block.kind {
        BlockKind::Heading1 => format!("# {}", block.content),
        BlockKind::Heading2 => format!("## {}", block.content),
        BlockKind::Heading3 => format!("### {}", block.content),
        BlockKind::CollapsibleHeading1 => format!("<# {}", block.content),
        BlockKind::CollapsibleHeading2 => format!("<## {}", block.content),
        BlockKind::CollapsibleHeading3 => format!("<### {}", block.content),
        BlockKind::BulletList => format!("- {}", block.content),
        BlockKind::NumberedList => format!("1. {}", block.content),
        BlockKind::CheckList => format!("- [ ] {}", block.content),
        BlockKind::Quote => format!("> {}", block.content),
        BlockKind::Code => {
            let language = match &block.meta {
                Some(BlockMeta::Code { language }) => language.as_str(),
                _ => "",
            };
            format!("```{language}\n{}\n```", block.content)
        }
        BlockKind::Divider => "---".to_string(),
        BlockKind::Image => match &block.meta {
            Some(BlockMeta::Image { url, alt }) if !url.is_empty() => {
                format!("![{alt}]({url})")
            }
            _ => String::new(),
        },
        BlockKind::LinkPreview => match &block.meta {
            Some(BlockMeta::LinkPreview { url, title }) if !url.is_empty() => {
                let title = title.as_deref().unwrap_or(url);
                format!("[{title}]({url})")
            }
            _ => String::new(),
        },
        BlockKind::Video | BlockKind::Embed => match block.meta.as_ref().and_then(BlockMeta::url)
        {
            Some(url) if !url.is_empty() => format!("@[video]({url})"),
            _ => String::new(),
        },
        BlockKind::Iframe => match &block.meta {
            Some(BlockMeta::Iframe { url, height }) if !url.is_empty() => {
                format!("@[iframe:{height}]({url})")
            }
            _ => String::new(),
        },
        BlockKind::Table => match &block.meta {
            Some(BlockMeta::Table { data, .. }) if !data.is_empty() => render_table(data),
            _ => String::new(),
        },
        BlockKind::Mermaid => {
            let diagram = match &block.meta {
                Some(BlockMeta::Mermaid { diagram }) => diagram.as_str(),
                _ => block.content.as_str(),
            };
            format!("```mermaid\n{diagram}\n```")
        }
        BlockKind::Paragraph => block.content.clone(),
    }
}

/// Emit a rectangular pipe table sized by the header row's width; short
/// data rows are padded with empty cells, long ones truncated.
fn render_table(data: &[Vec<String>]) -> String {
    let width = data[0].len();
    let mut lines = Vec::with_capacity(data.len() + 1);
    lines.push(row_line(&data[0], width));
    lines.push(format!("| {} |", vec!["---"; width].join(" | ")));
    for row in &data[1..] {
        lines.push(row_line(row, width));
    }
    lines.join("\n")
}

fn row_line(row: &[String], width: usize) -> String {
    let cells: Vec<&str> = (0..width)
        .map(|col| row.get(col).map(String::as_str).unwrap_or(""))
        .collect();
    format!("| {} |", cells.join(" | "))
}

/// Flatten blocks to plain text for search indexing.
///
/// Structural and media blocks without a textual payload are skipped; this
/// keeps the index to prose the user actually typed.
pub fn blocks_to_text(blocks: &[Block]) -> String {
    blocks
        .iter()
        .filter(|block| {
            !matches!(
                block.kind,
                BlockKind::Divider | BlockKind::Image | BlockKind::Embed
            )
        })
        .map(|block| block.content.as_str())
        .filter(|content| !content.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
