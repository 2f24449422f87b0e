use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use super::block::{Block, BlockId, BlockKind, generate_id};

/// A note: titled, tagged container of blocks.
///
/// The editing surface owns mutation; the codec only reads `blocks` when
/// serializing and replaces them wholesale when a note is loaded from
/// Markdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: BlockId,
    pub title: String,
    pub icon: String,
    pub blocks: Vec<Block>,
    pub tags: Vec<String>,
    pub created_at: SystemTime,
    pub updated_at: SystemTime,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub pinned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

impl Note {
    /// A new note holding a single empty paragraph, so the document
    /// invariant (never an empty block list) holds from birth.
    pub fn new(title: impl Into<String>) -> Self {
        let now = SystemTime::now();
        Self {
            id: generate_id(),
            title: title.into(),
            icon: "📝".to_string(),
            blocks: vec![Block::empty(BlockKind::Paragraph)],
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
            pinned: false,
            position: None,
        }
    }

    /// Replace the note's blocks and bump the modification time.
    pub fn set_blocks(&mut self, blocks: Vec<Block>) {
        self.blocks = if blocks.is_empty() {
            vec![Block::empty(BlockKind::Paragraph)]
        } else {
            blocks
        };
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = SystemTime::now();
    }
}
