use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed enumeration of block kinds understood by the codec.
///
/// The Markdown parser and every serializer are total over this set, so
/// adding a variant means touching the recognizer table and all three
/// output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockKind {
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    CollapsibleHeading1,
    CollapsibleHeading2,
    CollapsibleHeading3,
    BulletList,
    NumberedList,
    CheckList,
    Code,
    Quote,
    Divider,
    Image,
    Embed,
    LinkPreview,
    Video,
    Iframe,
    Table,
    Mermaid,
}

/// Structured payload for block kinds whose data doesn't fit in plain text.
///
/// One variant per kind that needs it; text-only kinds (headings, lists,
/// quotes, paragraphs) carry no meta at all. Keeping this a tagged union
/// means a serializer can never read a field that doesn't apply to the
/// block it is rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BlockMeta {
    Code {
        language: String,
    },
    Image {
        url: String,
        alt: String,
    },
    LinkPreview {
        url: String,
        title: Option<String>,
    },
    Video {
        url: String,
    },
    Embed {
        url: String,
    },
    Iframe {
        url: String,
        height: u32,
    },
    Table {
        data: Vec<Vec<String>>,
        rows: usize,
        cols: usize,
    },
    Mermaid {
        diagram: String,
    },
}

impl BlockMeta {
    /// The URL carried by this meta, for the variants that have one.
    pub fn url(&self) -> Option<&str> {
        match self {
            BlockMeta::Image { url, .. }
            | BlockMeta::LinkPreview { url, .. }
            | BlockMeta::Video { url }
            | BlockMeta::Embed { url }
            | BlockMeta::Iframe { url, .. } => Some(url),
            _ => None,
        }
    }
}

/// Opaque identifier for a block, stable for the block's lifetime.
///
/// Ids are generated fresh on creation and never derived from content, so
/// two blocks with identical text still have distinct identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generate a fresh block id.
///
/// Random v4 uuids keep collision probability negligible even when a large
/// pasted document creates thousands of ids in one synchronous pass.
pub fn generate_id() -> BlockId {
    BlockId(Uuid::new_v4().simple().to_string())
}

/// One unit of the document model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub kind: BlockKind,
    /// Primary text payload. Body text for text blocks; empty for most
    /// media/structural blocks, which store their payload in `meta`.
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<BlockMeta>,
}

impl Block {
    pub fn new(kind: BlockKind, content: impl Into<String>, meta: Option<BlockMeta>) -> Self {
        Self {
            id: generate_id(),
            kind,
            content: content.into(),
            meta,
        }
    }

    /// An empty block of the given kind, with a fresh id and no meta.
    pub fn empty(kind: BlockKind) -> Self {
        Self::new(kind, "", None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ids_are_unique() {
        let a = Block::empty(BlockKind::Paragraph);
        let b = Block::empty(BlockKind::Paragraph);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn identical_content_still_yields_distinct_ids() {
        let a = Block::new(BlockKind::Heading1, "Same", None);
        let b = Block::new(BlockKind::Heading1, "Same", None);
        assert_eq!(a.content, b.content);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn empty_block_defaults() {
        let block = Block::empty(BlockKind::Paragraph);
        assert_eq!(block.kind, BlockKind::Paragraph);
        assert_eq!(block.content, "");
        assert!(block.meta.is_none());
    }

    #[test]
    fn meta_url_only_for_url_variants() {
        let image = BlockMeta::Image {
            url: "https://example.com/a.png".to_string(),
            alt: "a".to_string(),
        };
        assert_eq!(image.url(), Some("https://example.com/a.png"));

        let table = BlockMeta::Table {
            data: vec![],
            rows: 0,
            cols: 0,
        };
        assert_eq!(table.url(), None);
    }

    #[test]
    fn block_serde_roundtrip() {
        let block = Block::new(
            BlockKind::Iframe,
            "",
            Some(BlockMeta::Iframe {
                url: "https://example.com".to_string(),
                height: 400,
            }),
        );
        let json = serde_json::to_string(&block).unwrap();
        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(block, back);
    }
}
