//! Seal engine construction and seal defaulting.

use tracing::debug;

use super::genesis::SealData;
use super::ChainParams;
use crate::adapters::SealEngineRegistry;
use crate::error::Result;
use crate::ports::SealEngine;

impl ChainParams {
    /// Create the configured seal engine and hand it this record.
    ///
    /// When the genesis carries no seal, the returned record takes the
    /// engine's default seal. A seal read from the configuration document is
    /// never replaced.
    pub fn create_seal_engine(
        &self,
        registry: &SealEngineRegistry,
    ) -> Result<(Self, Box<dyn SealEngine>)> {
        let mut engine = registry.create(&self.seal_engine_name)?;
        engine.set_chain_params(self);

        if !self.genesis.seal.is_empty() {
            return Ok((self.clone(), engine));
        }

        let seal = SealData {
            field_count: engine.seal_fields(),
            rlp: engine.seal_rlp(),
        };
        debug!(
            engine = %engine.name(),
            seal_fields = seal.field_count,
            "Filled genesis seal from engine defaults"
        );
        Ok((self.with_seal(seal), engine))
    }
}
