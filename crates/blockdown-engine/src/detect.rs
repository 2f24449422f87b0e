//! Heuristic Markdown detection for paste handling.
//!
//! Decides whether a pasted blob should be routed through the block parser
//! or inserted as plain prose. The heuristic is recall-biased on purpose:
//! a false positive just sends prose through the parser, which degrades
//! gracefully to paragraph blocks, while a false negative leaves structured
//! text as literal prose. Tightening it would trade the cheap failure mode
//! for the annoying one.

use std::sync::LazyLock;

use regex::Regex;

// Narrow set: a single line must clearly start with markdown to count.
static SINGLE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#{1,6}\s|[-*+]\s|>\s|```|\d+\.\s|---|\*\*\*|- \[[ xX]\]\s)").unwrap()
});

// Broad set used for per-line counting on multi-line input.
static MULTI_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(#{1,6}\s|[-*+]\s|>\s|```[a-z]*|[-*+]\s\[[ xX]\]\s|\d+\.\s|---|\*\*\*|!\[.*\]\(.*\)|\[.*\]\(https?://.*\)|\|.*\|)",
    )
    .unwrap()
});

/// Does this text look like Markdown rather than plain prose?
///
/// Single-line input matches only the narrow block-start set. Multi-line
/// input needs two marker lines, or one marker line plus a fence or a
/// pipe-table-looking line, or a fence anywhere.
pub fn has_markdown_syntax(text: &str) -> bool {
    let lines: Vec<&str> = text.split('\n').collect();

    if lines.len() < 2 {
        return SINGLE_LINE.is_match(text.trim());
    }

    let marker_lines = lines
        .iter()
        .filter(|line| MULTI_LINE.is_match(line.trim()))
        .count();

    let has_fence = text.contains("```");
    let has_table_row = lines.iter().any(|line| {
        let trimmed = line.trim();
        trimmed.starts_with('|') && trimmed.ends_with('|')
    });

    marker_lines >= 2 || (marker_lines >= 1 && (has_fence || has_table_row)) || has_fence
}
