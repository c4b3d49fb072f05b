//! # State Commitment
//!
//! Collapses a genesis account map into a single state root.

use tracing::debug;

use super::{AccountMap, Hash, SecureTrie, StateError};
use crate::ports::TrieCollaborator;

/// Commit `accounts` into `trie` and return its root.
///
/// The trie is reset first, then every account is inserted keyed by its
/// address with its RLP encoding as value. Calling this twice with the same
/// map against fresh tries yields the same digest.
pub fn commit_state<T>(accounts: &AccountMap, trie: &mut T) -> Result<Hash, StateError>
where
    T: TrieCollaborator + ?Sized,
{
    trie.init();
    for (address, account) in accounts {
        trie.insert(address, &account.rlp_encode()?)?;
    }
    let root = trie.root()?;

    debug!(
        accounts = accounts.len(),
        root = %hex::encode(root),
        "Committed genesis state"
    );
    Ok(root)
}

/// State root of `accounts` over a transient in-memory secure trie.
pub fn compute_state_root(accounts: &AccountMap) -> Result<Hash, StateError> {
    let mut trie = SecureTrie::in_memory();
    commit_state(accounts, &mut trie)
}
