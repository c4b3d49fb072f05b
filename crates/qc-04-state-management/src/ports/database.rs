use crate::domain::{Hash, StateError};

/// Content-addressed store for encoded trie nodes.
///
/// The trie writes every hashed node of a commitment in one batch when its
/// root is taken.
pub trait TrieDatabase: Send + Sync {
    fn get_node(&self, hash: &Hash) -> Result<Option<Vec<u8>>, StateError>;
    fn batch_put(&self, nodes: Vec<(Hash, Vec<u8>)>) -> Result<(), StateError>;
}
