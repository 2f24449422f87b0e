//! Single-line recognizers.
//!
//! Each function inspects exactly the line at the cursor and claims it with
//! a one-line [`Step`] or declines with `None`. Compiled patterns live in
//! `LazyLock` statics so repeated parses share them.

use std::sync::LazyLock;

use regex::Regex;

use super::Step;
use crate::models::{Block, BlockKind, BlockMeta};

static VIDEO_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^@\[video\]\((.*?)\)$").unwrap());
static IFRAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@\[iframe(?::(\d+))?\]\((.*?)\)$").unwrap());
static NUMBERED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s(.*)$").unwrap());
static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^!\[(.*?)\]\((.*?)\)$").unwrap());
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(.*?)\]\((https?://.*?)\)$").unwrap());
static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^https?://\S+$").unwrap());

/// Default iframe height when the `@[iframe:<height>]` segment is absent.
const DEFAULT_IFRAME_HEIGHT: u32 = 400;

/// `@[video](url)` reversible embed.
pub fn video_embed(lines: &[&str], i: usize) -> Option<Step> {
    let caps = VIDEO_RE.captures(lines[i])?;
    Step::single(Block::new(
        BlockKind::Video,
        "",
        Some(BlockMeta::Video {
            url: caps[1].to_string(),
        }),
    ))
}

/// `@[iframe](url)` or `@[iframe:<height>](url)` reversible embed.
pub fn iframe_embed(lines: &[&str], i: usize) -> Option<Step> {
    let caps = IFRAME_RE.captures(lines[i])?;
    let height = caps
        .get(1)
        .map_or(DEFAULT_IFRAME_HEIGHT, |m| {
            m.as_str().parse().unwrap_or(DEFAULT_IFRAME_HEIGHT)
        });
    Step::single(Block::new(
        BlockKind::Iframe,
        "",
        Some(BlockMeta::Iframe {
            url: caps[2].to_string(),
            height,
        }),
    ))
}

/// `<# `, `<## `, `<### ` collapsible heading prefixes, longest first.
pub fn collapsible_heading(lines: &[&str], i: usize) -> Option<Step> {
    let line = lines[i];
    let (kind, prefix_len) = if line.starts_with("<### ") {
        (BlockKind::CollapsibleHeading3, 5)
    } else if line.starts_with("<## ") {
        (BlockKind::CollapsibleHeading2, 4)
    } else if line.starts_with("<# ") {
        (BlockKind::CollapsibleHeading1, 3)
    } else {
        return None;
    };
    Step::single(Block::new(kind, &line[prefix_len..], None))
}

/// `# `, `## `, `### ` headings, longest first.
pub fn heading(lines: &[&str], i: usize) -> Option<Step> {
    let line = lines[i];
    let (kind, prefix_len) = if line.starts_with("### ") {
        (BlockKind::Heading3, 4)
    } else if line.starts_with("## ") {
        (BlockKind::Heading2, 3)
    } else if line.starts_with("# ") {
        (BlockKind::Heading1, 2)
    } else {
        return None;
    };
    Step::single(Block::new(kind, &line[prefix_len..], None))
}

/// `- [ ] `, `- [x] `, `- [X] ` checklist items. Must run before
/// [`bullet_list`], which would otherwise claim the leading `- `.
///
/// The checkbox markup is discarded: `- [x]` and `- [ ]` both import as a
/// plain checklist item, so the checked state is lost on import.
pub fn check_list(lines: &[&str], i: usize) -> Option<Step> {
    let line = lines[i];
    if line.starts_with("- [ ] ") || line.starts_with("- [x] ") || line.starts_with("- [X] ") {
        return Step::single(Block::new(BlockKind::CheckList, &line[6..], None));
    }
    None
}

/// `- ` or `* ` bullet items.
pub fn bullet_list(lines: &[&str], i: usize) -> Option<Step> {
    let line = lines[i];
    if line.starts_with("- ") || line.starts_with("* ") {
        return Step::single(Block::new(BlockKind::BulletList, &line[2..], None));
    }
    None
}

/// `1. `-style ordered items. The ordinal digit is discarded;
/// re-serialization always emits `1.`.
pub fn numbered_list(lines: &[&str], i: usize) -> Option<Step> {
    let caps = NUMBERED_RE.captures(lines[i])?;
    Step::single(Block::new(BlockKind::NumberedList, &caps[1], None))
}

/// `> ` quote lines.
pub fn quote(lines: &[&str], i: usize) -> Option<Step> {
    let line = lines[i];
    if line.starts_with("> ") {
        return Step::single(Block::new(BlockKind::Quote, &line[2..], None));
    }
    None
}

/// A line that is exactly `---` or `***`.
pub fn divider(lines: &[&str], i: usize) -> Option<Step> {
    let line = lines[i];
    if line == "---" || line == "***" {
        return Step::single(Block::empty(BlockKind::Divider));
    }
    None
}

/// `![alt](url)` filling the whole line.
pub fn image(lines: &[&str], i: usize) -> Option<Step> {
    let caps = IMAGE_RE.captures(lines[i])?;
    Step::single(Block::new(
        BlockKind::Image,
        "",
        Some(BlockMeta::Image {
            alt: caps[1].to_string(),
            url: caps[2].to_string(),
        }),
    ))
}

/// `[title](http…)` filling the whole line.
pub fn link_preview(lines: &[&str], i: usize) -> Option<Step> {
    let caps = LINK_RE.captures(lines[i])?;
    let title = match &caps[1] {
        "" => None,
        title => Some(title.to_string()),
    };
    Step::single(Block::new(
        BlockKind::LinkPreview,
        "",
        Some(BlockMeta::LinkPreview {
            url: caps[2].to_string(),
            title,
        }),
    ))
}

/// A bare URL on its own line.
pub fn bare_url(lines: &[&str], i: usize) -> Option<Step> {
    let caps = URL_RE.captures(lines[i])?;
    Step::single(Block::new(
        BlockKind::LinkPreview,
        "",
        Some(BlockMeta::LinkPreview {
            url: caps[0].to_string(),
            title: None,
        }),
    ))
}
