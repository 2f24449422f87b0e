//! Display-only exporters: Markdown, plain text, and a standalone HTML
//! document.
//!
//! These back user-facing downloads. Unlike the storage codec in the parent
//! module, the Markdown written here favors readability over reversibility:
//! video/iframe blocks become plain descriptive links and collapsible
//! headings flatten to their text.

use std::borrow::Cow;

use crate::models::{Block, BlockKind, BlockMeta};

/// Serialize blocks to reader-friendly Markdown, optionally prefixed with
/// a `# title` heading.
pub fn blocks_to_markdown(blocks: &[Block], title: Option<&str>) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(title) = title {
        lines.push(format!("# {title}"));
        lines.push(String::new());
    }

    for block in blocks {
        match block.kind {
            BlockKind::Heading1 => {
                lines.push(format!("# {}", block.content));
                lines.push(String::new());
            }
            BlockKind::Heading2 => {
                lines.push(format!("## {}", block.content));
                lines.push(String::new());
            }
            BlockKind::Heading3 => {
                lines.push(format!("### {}", block.content));
                lines.push(String::new());
            }
            BlockKind::BulletList => lines.push(format!("- {}", block.content)),
            BlockKind::NumberedList => lines.push(format!("1. {}", block.content)),
            BlockKind::CheckList => lines.push(format!("- [ ] {}", block.content)),
            BlockKind::Quote => {
                lines.push(format!("> {}", block.content));
                lines.push(String::new());
            }
            BlockKind::Code => {
                lines.push("```".to_string());
                lines.push(block.content.clone());
                lines.push("```".to_string());
                lines.push(String::new());
            }
            BlockKind::Divider => {
                lines.push("---".to_string());
                lines.push(String::new());
            }
            BlockKind::Image => {
                if let Some(BlockMeta::Image { url, alt }) = &block.meta
                    && !url.is_empty()
                {
                    let alt = if alt.is_empty() { "image" } else { alt };
                    lines.push(format!("![{alt}]({url})"));
                    lines.push(String::new());
                }
            }
            BlockKind::Video | BlockKind::Embed => {
                if let Some(url) = block.meta.as_ref().and_then(BlockMeta::url) {
                    lines.push(format!("[Video]({url})"));
                    lines.push(String::new());
                }
            }
            BlockKind::LinkPreview => {
                if let Some(BlockMeta::LinkPreview { url, title }) = &block.meta
                    && !url.is_empty()
                {
                    let title = title.as_deref().unwrap_or(url);
                    lines.push(format!("[{title}]({url})"));
                    lines.push(String::new());
                }
            }
            BlockKind::Iframe => {
                if let Some(BlockMeta::Iframe { url, .. }) = &block.meta
                    && !url.is_empty()
                {
                    lines.push(format!("[Embedded: {url}]({url})"));
                    lines.push(String::new());
                }
            }
            BlockKind::Table => {
                if let Some(BlockMeta::Table { data, .. }) = &block.meta
                    && !data.is_empty()
                {
                    lines.push(pipe_row(&data[0]));
                    lines.push(format!("| {} |", vec!["---"; data[0].len()].join(" | ")));
                    for row in &data[1..] {
                        lines.push(pipe_row(row));
                    }
                    lines.push(String::new());
                }
            }
            BlockKind::Mermaid => {
                if let Some(BlockMeta::Mermaid { diagram }) = &block.meta {
                    lines.push("```mermaid".to_string());
                    lines.push(diagram.clone());
                    lines.push("```".to_string());
                    lines.push(String::new());
                }
            }
            _ => {
                if !block.content.is_empty() {
                    lines.push(block.content.clone());
                    lines.push(String::new());
                }
            }
        }
    }

    lines.join("\n")
}

fn pipe_row(row: &[String]) -> String {
    format!("| {} |", row.join(" | "))
}

/// Flatten blocks to maximal plain text: block content plus tab-joined
/// table rows plus diagram source. Wants everything readable, unlike the
/// search-indexing variant in the parent module.
pub fn blocks_to_plain_text(blocks: &[Block]) -> String {
    let mut lines: Vec<String> = Vec::new();

    for block in blocks {
        if !block.content.is_empty() {
            lines.push(block.content.clone());
        }
        match &block.meta {
            Some(BlockMeta::Table { data, .. }) => {
                for row in data {
                    lines.push(row.join("\t"));
                }
            }
            Some(BlockMeta::Mermaid { diagram }) => lines.push(diagram.clone()),
            _ => {}
        }
    }

    lines.join("\n")
}

const STYLES: &str = r#"<style>
  body { font-family: system-ui, -apple-system, sans-serif; max-width: 800px; margin: 0 auto; padding: 2rem; line-height: 1.6; }
  h1 { font-size: 2rem; font-weight: bold; margin-top: 2rem; }
  h2 { font-size: 1.5rem; font-weight: 600; margin-top: 1.5rem; }
  h3 { font-size: 1.25rem; font-weight: 500; margin-top: 1rem; }
  ul, ol { margin-left: 1.5rem; }
  blockquote { border-left: 3px solid #ccc; margin-left: 0; padding-left: 1rem; color: #666; font-style: italic; }
  pre { background: #f5f5f5; padding: 1rem; border-radius: 0.5rem; overflow-x: auto; }
  code { font-family: monospace; }
  hr { border: none; border-top: 1px solid #ccc; margin: 1.5rem 0; }
  img { max-width: 100%; height: auto; border-radius: 0.5rem; }
  table { width: 100%; border-collapse: collapse; margin: 1rem 0; }
  th, td { border: 1px solid #ddd; padding: 0.5rem; text-align: left; }
  th { background: #f5f5f5; }
  .mermaid-container { background: #f9f9f9; padding: 1rem; border-radius: 0.5rem; text-align: center; }
</style>"#;

/// Render blocks as a complete standalone HTML document with an embedded
/// style sheet, suitable as a print/PDF payload.
///
/// Every interpolated value goes through [`escape`] (or [`escape_attr`]
/// inside attribute positions) exactly once. Mermaid
/// diagrams are emitted as inert `<pre>` blocks; HTML export does not run
/// a diagram renderer.
pub fn blocks_to_html(blocks: &[Block], title: Option<&str>) -> String {
    let mut content: Vec<String> = Vec::new();

    if let Some(title) = title {
        content.push(format!("<h1>{}</h1>", escape(title)));
    }

    for block in blocks {
        match block.kind {
            BlockKind::Heading1 => content.push(format!("<h1>{}</h1>", escape(&block.content))),
            BlockKind::Heading2 => content.push(format!("<h2>{}</h2>", escape(&block.content))),
            BlockKind::Heading3 => content.push(format!("<h3>{}</h3>", escape(&block.content))),
            BlockKind::BulletList => {
                content.push(format!("<ul><li>{}</li></ul>", escape(&block.content)));
            }
            BlockKind::NumberedList => {
                content.push(format!("<ol><li>{}</li></ol>", escape(&block.content)));
            }
            BlockKind::CheckList => content.push(format!(
                "<ul><li><input type=\"checkbox\" disabled> {}</li></ul>",
                escape(&block.content)
            )),
            BlockKind::Quote => {
                content.push(format!("<blockquote>{}</blockquote>", escape(&block.content)));
            }
            BlockKind::Code => {
                content.push(format!("<pre><code>{}</code></pre>", escape(&block.content)));
            }
            BlockKind::Divider => content.push("<hr>".to_string()),
            BlockKind::Image => {
                if let Some(BlockMeta::Image { url, alt }) = &block.meta
                    && !url.is_empty()
                {
                    let alt = if alt.is_empty() { "image" } else { alt };
                    content.push(format!(
                        "<img src=\"{}\" alt=\"{}\">",
                        escape_attr(url),
                        escape_attr(alt)
                    ));
                }
            }
            BlockKind::Video | BlockKind::Embed => {
                if let Some(url) = block.meta.as_ref().and_then(BlockMeta::url) {
                    content.push(format!(
                        "<p><a href=\"{}\">{}</a></p>",
                        escape_attr(url),
                        escape(url)
                    ));
                }
            }
            BlockKind::LinkPreview => {
                if let Some(BlockMeta::LinkPreview { url, title }) = &block.meta
                    && !url.is_empty()
                {
                    let text = title.as_deref().unwrap_or(url);
                    content.push(format!(
                        "<p><a href=\"{}\">{}</a></p>",
                        escape_attr(url),
                        escape(text)
                    ));
                }
            }
            BlockKind::Iframe => {
                if let Some(BlockMeta::Iframe { url, .. }) = &block.meta
                    && !url.is_empty()
                {
                    content.push(format!(
                        "<p><a href=\"{}\">Embedded: {}</a></p>",
                        escape_attr(url),
                        escape(url)
                    ));
                }
            }
            BlockKind::Table => {
                if let Some(BlockMeta::Table { data, .. }) = &block.meta
                    && !data.is_empty()
                {
                    let rows: String = data
                        .iter()
                        .enumerate()
                        .map(|(i, row)| {
                            let tag = if i == 0 { "th" } else { "td" };
                            let cells: String = row
                                .iter()
                                .map(|cell| format!("<{tag}>{}</{tag}>", escape(cell)))
                                .collect();
                            format!("<tr>{cells}</tr>")
                        })
                        .collect();
                    content.push(format!("<table>{rows}</table>"));
                }
            }
            BlockKind::Mermaid => {
                if let Some(BlockMeta::Mermaid { diagram }) = &block.meta {
                    content.push(format!(
                        "<div class=\"mermaid-container\"><pre>{}</pre><p><em>Mermaid diagram (render in compatible viewer)</em></p></div>",
                        escape(diagram)
                    ));
                }
            }
            _ => {
                if !block.content.is_empty() {
                    content.push(format!("<p>{}</p>", escape(&block.content)));
                }
            }
        }
    }

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"utf-8\">\n  <title>{}</title>\n  {}\n</head>\n<body>\n  {}\n</body>\n</html>",
        escape(title.unwrap_or("Note")),
        STYLES,
        content.join("\n  ")
    )
}

/// Escape for HTML text content (`&`, `<`, `>`).
fn escape(raw: &str) -> Cow<'_, str> {
    html_escape::encode_text(raw)
}

/// Escape for double-quoted attribute values, which additionally need `"`
/// neutralized.
fn escape_attr(raw: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(raw)
}
