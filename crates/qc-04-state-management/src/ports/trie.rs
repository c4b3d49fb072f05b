use crate::domain::{Hash, StateError};

/// Keyed trie consumed by the state commitment.
///
/// Implementations must make `root()` a function of the inserted key/value
/// set only; insertion order must not affect the result. Key hashing policy
/// belongs to the implementation.
pub trait TrieCollaborator {
    /// Reset to the empty trie.
    fn init(&mut self);

    /// Insert or replace `key`. An empty `value` removes the key.
    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError>;

    /// Root digest over everything inserted since `init`.
    fn root(&mut self) -> Result<Hash, StateError>;
}
