//! Pipe table consumer.
//!
//! A table starts at a `|`-prefixed line whose next line contains `---`
//! anywhere. The separator check is deliberately loose (not strict GFM) so
//! hand-typed tables with sloppy separators still parse. The consumer then
//! owns every following line that starts with `|` or contains `---`.

use super::Step;
use crate::models::{Block, BlockKind, BlockMeta};

/// Column count used when the first row somehow has no cells.
const DEFAULT_COLS: usize = 3;

const SEPARATOR: &str = "---";

pub fn consume(lines: &[&str], i: usize) -> Option<Step> {
    if !lines[i].starts_with('|') {
        return None;
    }
    if !lines.get(i + 1)?.contains(SEPARATOR) {
        return None;
    }

    let mut end = i + 1;
    while end < lines.len() && (lines[end].starts_with('|') || lines[end].contains(SEPARATOR)) {
        end += 1;
    }

    let data: Vec<Vec<String>> = lines[i..end]
        .iter()
        .filter(|line| !line.contains(SEPARATOR))
        .map(|line| split_row(line))
        .collect();

    let block = if data.is_empty() {
        // Nothing but separator rows: consume the lines, emit nothing.
        None
    } else {
        let rows = data.len();
        let cols = match data[0].len() {
            0 => DEFAULT_COLS,
            n => n,
        };
        Some(Block::new(
            BlockKind::Table,
            "",
            Some(BlockMeta::Table { data, rows, cols }),
        ))
    };

    Some(Step {
        block,
        consumed: end - i,
    })
}

/// Split a pipe row into trimmed cells, dropping the empty first/last
/// fields produced by the leading and trailing `|`.
fn split_row(line: &str) -> Vec<String> {
    let fields: Vec<&str> = line.split('|').collect();
    fields[1..fields.len().saturating_sub(1)]
        .iter()
        .map(|cell| cell.trim().to_string())
        .collect()
}
