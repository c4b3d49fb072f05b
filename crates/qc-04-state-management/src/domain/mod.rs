pub mod commit;
pub mod entities;
pub mod errors;
pub mod nibbles;
pub mod node;
pub mod trie;

pub use commit::*;
pub use entities::*;
pub use errors::*;
pub use trie::*;
