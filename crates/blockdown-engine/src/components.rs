//! Custom component extension for the Markdown preview pipeline.
//!
//! Markdown destined for the preview renderer may contain pseudo-XML tags
//! like `<Callout type="warning">…</Callout>`. This pass lifts them out
//! before standard Markdown rendering, replacing each span with a numbered
//! placeholder (`__COMPONENT_0__`, `__COMPONENT_1__`, …) and returning the
//! extracted components alongside the rewritten text so the renderer can
//! resolve placeholders by index instead of re-parsing them.
//!
//! Nested same-type tags are not supported: matching is non-greedy, so a
//! `<Card>` inside a `<Card>` closes at the inner tag's closer. That is a
//! documented limitation of the syntax, not something this parser repairs.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Fixed tag vocabulary for custom components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Card,
    Callout,
    Accordion,
    Header,
    Steps,
    Carousel,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 6] = [
        ComponentKind::Card,
        ComponentKind::Callout,
        ComponentKind::Accordion,
        ComponentKind::Header,
        ComponentKind::Steps,
        ComponentKind::Carousel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Card => "Card",
            ComponentKind::Callout => "Callout",
            ComponentKind::Accordion => "Accordion",
            ComponentKind::Header => "Header",
            ComponentKind::Steps => "Steps",
            ComponentKind::Carousel => "Carousel",
        }
    }
}

/// One extracted component: tag kind, `key="value"` props in source order,
/// and the trimmed inner markdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedComponent {
    pub kind: ComponentKind,
    pub props: Vec<(String, String)>,
    pub content: String,
}

impl ParsedComponent {
    /// Look up a prop by key.
    pub fn prop(&self, key: &str) -> Option<&str> {
        self.props
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Result of one extraction pass: the rewritten markdown plus the
/// components in placeholder order. `components[n]` corresponds to the
/// `__COMPONENT_n__` placeholder in `processed_markdown`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedComponents {
    pub processed_markdown: String,
    pub components: Vec<ParsedComponent>,
}

impl ParsedComponents {
    /// Resolve a placeholder index back to its component.
    pub fn get(&self, index: usize) -> Option<&ParsedComponent> {
        self.components.get(index)
    }

    /// The placeholder text emitted for a given index.
    pub fn placeholder(index: usize) -> String {
        format!("__COMPONENT_{index}__")
    }
}

// The regex crate has no backreferences, so instead of one alternation
// pattern closing on `\1` there is one compiled pattern per tag. Matches
// are merged in document order afterwards.
static TAG_PATTERNS: LazyLock<Vec<(ComponentKind, Regex)>> = LazyLock::new(|| {
    ComponentKind::ALL
        .iter()
        .map(|kind| {
            let tag = kind.as_str();
            let pattern = format!(r"(?is)<{tag}([^>]*)>(.*?)</{tag}>");
            (*kind, Regex::new(&pattern).expect("static tag pattern"))
        })
        .collect()
});

static PROP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\w+)=["']([^"']*)["']"#).unwrap());

struct TagMatch {
    start: usize,
    end: usize,
    kind: ComponentKind,
    props: Vec<(String, String)>,
    content: String,
}

/// Extract custom component tags from markdown, replacing each with a
/// numbered placeholder.
///
/// A tag with no matching closer of the same name simply doesn't match and
/// passes through as literal markdown.
pub fn parse_custom_components(markdown: &str) -> ParsedComponents {
    let mut matches: Vec<TagMatch> = Vec::new();
    for (kind, pattern) in TAG_PATTERNS.iter() {
        for caps in pattern.captures_iter(markdown) {
            let whole = caps.get(0).expect("group 0 always present");
            matches.push(TagMatch {
                start: whole.start(),
                end: whole.end(),
                kind: *kind,
                props: parse_props(&caps[1]),
                content: caps[2].trim().to_string(),
            });
        }
    }

    // Document order; on equal starts prefer the longer tag name (e.g. a
    // `<Carousel>` opener must not be claimed as a prop-laden `<Card>`).
    matches.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then(b.kind.as_str().len().cmp(&a.kind.as_str().len()))
    });

    let mut processed = String::with_capacity(markdown.len());
    let mut components = Vec::new();
    let mut cursor = 0;

    for m in matches {
        if m.start < cursor {
            // Overlaps a span already claimed by an earlier match.
            continue;
        }
        processed.push_str(&markdown[cursor..m.start]);
        processed.push_str(&ParsedComponents::placeholder(components.len()));
        components.push(ParsedComponent {
            kind: m.kind,
            props: m.props,
            content: m.content,
        });
        cursor = m.end;
    }
    processed.push_str(&markdown[cursor..]);

    ParsedComponents {
        processed_markdown: processed,
        components,
    }
}

fn parse_props(raw: &str) -> Vec<(String, String)> {
    PROP_PATTERN
        .captures_iter(raw)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// Emit the pseudo-XML markdown for a component. The inverse direction of
/// [`parse_custom_components`] for the block-style tags; `Steps` and
/// `Carousel` emit fixed starter templates and ignore the passed content.
pub fn generate_component_markdown(
    kind: ComponentKind,
    props: &[(String, String)],
    content: Option<&str>,
) -> String {
    let content = content.unwrap_or("Your content here...");
    let props_string = props
        .iter()
        .map(|(key, value)| format!("{key}=\"{value}\""))
        .collect::<Vec<_>>()
        .join(" ");

    match kind {
        ComponentKind::Card | ComponentKind::Callout | ComponentKind::Accordion => {
            format!(
                "<{tag} {props_string}>\n{content}\n</{tag}>",
                tag = kind.as_str()
            )
        }
        ComponentKind::Header => format!("<Header {props_string}>{content}</Header>"),
        ComponentKind::Steps => {
            "<Steps>\n1. First step\n2. Second step\n3. Third step\n</Steps>".to_string()
        }
        ComponentKind::Carousel => {
            "<Carousel images=\"image1.jpg,image2.jpg,image3.jpg\" />".to_string()
        }
    }
}
