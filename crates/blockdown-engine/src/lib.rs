pub mod components;
pub mod detect;
pub mod io;
pub mod models;
pub mod parsing;
pub mod serialize;

// Re-export key types for easier usage
pub use components::{
    ComponentKind, ParsedComponent, ParsedComponents, generate_component_markdown,
    parse_custom_components,
};
pub use detect::has_markdown_syntax;
pub use models::{Block, BlockId, BlockKind, BlockMeta, Note, generate_id};
pub use parsing::markdown_to_blocks;
pub use serialize::{blocks_to_markdown, blocks_to_text};
