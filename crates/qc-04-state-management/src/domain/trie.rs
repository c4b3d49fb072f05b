use std::collections::BTreeMap;

use shared_types::{keccak256, Hash, EMPTY_TRIE_ROOT};
use tracing::trace;

use super::nibbles::Nibbles;
use super::node::{NodeRef, TrieNode};
use super::{StateError, TrieConfig};
use crate::adapters::InMemoryTrieDb;
use crate::ports::{TrieCollaborator, TrieDatabase};

/// Secure Patricia Merkle Trie.
///
/// Keys are hashed with Keccak256 before insertion, so every path is 64
/// nibbles and the shape of the trie cannot be steered by the caller.
/// Insertions are buffered; `root()` builds the node set bottom-up from the
/// sorted key set, writes every hashed node to the backing `TrieDatabase`
/// and returns the root hash. The result depends only on the final key/value
/// set, never on insertion order.
pub struct SecureTrie<D: TrieDatabase> {
    db: D,
    leaves: BTreeMap<Nibbles, Vec<u8>>,
    config: TrieConfig,
}

impl SecureTrie<InMemoryTrieDb> {
    /// Trie over a fresh in-memory node store.
    pub fn in_memory() -> Self {
        Self::new(InMemoryTrieDb::new())
    }
}

impl<D: TrieDatabase> SecureTrie<D> {
    pub fn new(db: D) -> Self {
        Self::with_config(db, TrieConfig::default())
    }

    pub fn with_config(db: D, config: TrieConfig) -> Self {
        Self {
            db,
            leaves: BTreeMap::new(),
            config,
        }
    }

    /// Backing node store.
    pub fn db(&self) -> &D {
        &self.db
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    fn encode_subtrie(
        entries: &[(&Nibbles, &Vec<u8>)],
        depth: usize,
        batch: &mut Vec<(Hash, Vec<u8>)>,
    ) -> Vec<u8> {
        if let [(key, value)] = entries {
            return TrieNode::Leaf {
                path: key.suffix(depth),
                value: (*value).clone(),
            }
            .rlp_encode();
        }

        // Entries are sorted, so the first and last keys bound the shared prefix.
        let first = entries[0].0;
        let last = entries[entries.len() - 1].0;
        let shared = first.shared_from(last, depth);

        if shared > 0 {
            let child = Self::encode_subtrie(entries, depth + shared, batch);
            return TrieNode::Extension {
                path: first.range(depth, depth + shared),
                child: Self::reference(child, batch),
            }
            .rlp_encode();
        }

        let mut children: [NodeRef; 16] = std::array::from_fn(|_| NodeRef::Empty);
        let mut value = None;
        let mut rest = entries;

        // A key ending exactly here sorts before all of its extensions.
        if rest[0].0.len() == depth {
            value = Some(rest[0].1.clone());
            rest = &rest[1..];
        }

        while let Some((key, _)) = rest.first() {
            let nibble = key.at(depth);
            let end = rest
                .iter()
                .position(|(k, _)| k.at(depth) != nibble)
                .unwrap_or(rest.len());
            let child = Self::encode_subtrie(&rest[..end], depth + 1, batch);
            children[nibble as usize] = Self::reference(child, batch);
            rest = &rest[end..];
        }

        TrieNode::Branch {
            children: Box::new(children),
            value,
        }
        .rlp_encode()
    }

    fn reference(encoded: Vec<u8>, batch: &mut Vec<(Hash, Vec<u8>)>) -> NodeRef {
        let reference = NodeRef::from_encoded(encoded.clone());
        if let NodeRef::Hashed(hash) = reference {
            batch.push((hash, encoded));
        }
        reference
    }
}

impl<D: TrieDatabase> TrieCollaborator for SecureTrie<D> {
    fn init(&mut self) {
        self.leaves.clear();
    }

    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError> {
        let path = Nibbles::unpack(&keccak256(key));
        if path.len() > self.config.max_depth {
            return Err(StateError::TrieDepthExceeded {
                max: self.config.max_depth,
                attempted: path.len(),
            });
        }

        // An empty value deletes the key.
        if value.is_empty() {
            self.leaves.remove(&path);
        } else {
            self.leaves.insert(path, value.to_vec());
        }
        Ok(())
    }

    fn root(&mut self) -> Result<Hash, StateError> {
        if self.leaves.is_empty() {
            return Ok(EMPTY_TRIE_ROOT);
        }

        let entries: Vec<(&Nibbles, &Vec<u8>)> = self.leaves.iter().collect();
        let mut batch = Vec::new();
        let encoded_root = Self::encode_subtrie(&entries, 0, &mut batch);

        // The root is always referenced by hash, even when short.
        let root = keccak256(&encoded_root);
        batch.push((root, encoded_root));

        trace!(
            nodes = batch.len(),
            keys = entries.len(),
            "Persisting trie nodes"
        );
        self.db.batch_put(batch)?;
        Ok(root)
    }
}
