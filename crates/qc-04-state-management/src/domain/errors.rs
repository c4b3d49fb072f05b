use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("Invalid genesis account {address}: {reason}")]
    InvalidAccount { address: String, reason: String },

    #[error("Trie depth exceeded: max {max}, attempted {attempted}")]
    TrieDepthExceeded { max: usize, attempted: usize },

    #[error("Trie commit failed: {0}")]
    TrieCommit(String),

    #[error("Trie database lock poisoned")]
    LockPoisoned,
}
