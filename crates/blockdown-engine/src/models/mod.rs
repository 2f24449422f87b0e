pub mod block;
pub mod note;

pub use block::{Block, BlockId, BlockKind, BlockMeta, generate_id};
pub use note::Note;
