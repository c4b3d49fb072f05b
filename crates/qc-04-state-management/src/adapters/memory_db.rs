use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::{Hash, StateError};
use crate::ports::TrieDatabase;

/// Node store held in memory.
///
/// One store backs one commitment: `compute_state_root` creates it, and it is
/// dropped with the trie.
#[derive(Default)]
pub struct InMemoryTrieDb {
    nodes: RwLock<HashMap<Hash, Vec<u8>>>,
}

impl InMemoryTrieDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored nodes.
    pub fn len(&self) -> Result<usize, StateError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StateError> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<Hash, Vec<u8>>>, StateError> {
        self.nodes.read().map_err(|_| StateError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<Hash, Vec<u8>>>, StateError> {
        self.nodes.write().map_err(|_| StateError::LockPoisoned)
    }
}

impl TrieDatabase for InMemoryTrieDb {
    fn get_node(&self, hash: &Hash) -> Result<Option<Vec<u8>>, StateError> {
        Ok(self.read()?.get(hash).cloned())
    }

    fn batch_put(&self, nodes: Vec<(Hash, Vec<u8>)>) -> Result<(), StateError> {
        self.write()?.extend(nodes);
        Ok(())
    }
}
