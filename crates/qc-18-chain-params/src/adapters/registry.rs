//! # Seal Engine Registry
//!
//! Maps engine names, as written in a configuration document's `sealEngine`
//! key, to factories producing fresh engine instances.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut registry = SealEngineRegistry::with_defaults();
//! registry.register("Clique", || Box::new(MyClique::default()));
//!
//! let (params, engine) = params.create_seal_engine(&registry)?;
//! ```

use std::collections::HashMap;

use tracing::{debug, warn};

use super::seal_engines::{Ethash, NoProof};
use crate::error::{ChainParamsError, Result};
use crate::ports::SealEngine;

/// Produces a new, unconfigured engine.
pub type SealEngineFactory = fn() -> Box<dyn SealEngine>;

/// Registry of seal engine factories keyed by name.
#[derive(Clone, Debug)]
pub struct SealEngineRegistry {
    factories: HashMap<String, SealEngineFactory>,
}

impl SealEngineRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registry holding the built-in `NoProof` and `Ethash` engines.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(NoProof::NAME, || Box::new(NoProof::default()));
        registry.register(Ethash::NAME, || Box::new(Ethash::default()));
        registry
    }

    /// Register `factory` under `name`, returning the factory it replaced.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: SealEngineFactory,
    ) -> Option<SealEngineFactory> {
        let name = name.into();
        debug!(engine = %name, "Registering seal engine");
        let previous = self.factories.insert(name.clone(), factory);
        if previous.is_some() {
            warn!(engine = %name, "Seal engine already registered, replacing");
        }
        previous
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Create a fresh engine registered as `name`.
    pub fn create(&self, name: &str) -> Result<Box<dyn SealEngine>> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| ChainParamsError::UnknownSealEngine(name.to_string()))
    }
}

impl Default for SealEngineRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
