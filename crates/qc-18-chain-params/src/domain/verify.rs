//! # Genesis Verification
//!
//! Rebuilds a record from a genesis block (or bare header) received from
//! elsewhere and proves the local assembly reproduces it byte for byte.
//! A mismatch is reported, never corrected.

use qc_04_state_management::AccountMap;
use shared_types::{keccak256, Rlp};
use tracing::{debug, info};

use super::genesis::{GenesisHeaderFields, SealData, BASIC_FIELD_COUNT};
use super::ChainParams;
use crate::error::{ChainParamsError, Result};

impl ChainParams {
    /// Derive a record whose genesis is read from `encoding` and whose
    /// genesis state is `state`, then check that re-assembling it gives back
    /// exactly `encoding`.
    ///
    /// `encoding` is a full block when its first item is itself a list,
    /// otherwise a bare header.
    pub fn populate_from_genesis(&self, encoding: &[u8], state: AccountMap) -> Result<Self> {
        let top = Rlp::new(encoding)?;
        let is_block = top.at(0)?.is_list();
        let header = if is_block { top.at(0)? } else { top };

        let items = header.items()?;
        if items.len() < BASIC_FIELD_COUNT {
            return Err(ChainParamsError::InvalidRlp(format!(
                "genesis header has {} items, expected at least {BASIC_FIELD_COUNT}",
                items.len()
            )));
        }

        let seal_items = &items[BASIC_FIELD_COUNT..];
        let fields = GenesisHeaderFields {
            parent_hash: items[0].as_fixed()?,
            author: items[2].as_fixed()?,
            difficulty: items[7].as_u256()?,
            gas_limit: items[9].as_u256()?,
            gas_used: items[10].as_u256()?,
            timestamp: items[11].as_u256()?,
            extra_data: items[12].data()?.to_vec(),
            seal: SealData {
                field_count: seal_items.len(),
                rlp: seal_items
                    .iter()
                    .flat_map(|item| item.as_raw())
                    .copied()
                    .collect(),
            },
        };

        let populated = self
            .with_genesis_state(state, self.precompiled().clone())?
            .with_genesis_fields(fields, None);

        let local = if is_block {
            populated.genesis_block()
        } else {
            populated.genesis_header()
        };

        if local != encoding {
            let expected_hash = hex::encode(populated.genesis_hash());
            let actual_hash = hex::encode(keccak256(header.as_raw()));
            debug!(
                local = %expected_hash,
                supplied = %actual_hash,
                local_rlp = %hex::encode(&local),
                supplied_rlp = %hex::encode(encoding),
                "Genesis block mismatch"
            );
            return Err(ChainParamsError::GenesisMismatch {
                expected: hex::encode(&local),
                actual: hex::encode(encoding),
                expected_hash,
                actual_hash,
            });
        }

        info!(
            hash = %hex::encode(populated.genesis_hash()),
            seal_fields = populated.genesis.seal.field_count,
            "Verified genesis block"
        );
        Ok(populated)
    }
}
