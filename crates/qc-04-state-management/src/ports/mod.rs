pub mod database;
pub mod decoder;
pub mod trie;

pub use database::*;
pub use decoder::*;
pub use trie::*;
