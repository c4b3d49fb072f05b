//! Configuration types for chain parameter loading

use serde::Deserialize;

/// Controls how `ChainParams::load_config_with` treats a configuration
/// document.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoaderConfig {
    /// Overlay the document's `genesis` section. When false the record keeps
    /// whatever genesis it already carried.
    pub import_genesis: bool,

    /// Reject genesis extra data longer than `maximumExtraDataSize`.
    /// Off by default: an oversized genesis is only logged.
    pub enforce_extra_data_size: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            import_genesis: true,
            enforce_extra_data_size: false,
        }
    }
}

impl LoaderConfig {
    /// Import the genesis and reject oversized extra data.
    pub fn strict() -> Self {
        Self {
            enforce_extra_data_size: true,
            ..Self::default()
        }
    }

    /// Builder method to toggle genesis import.
    pub fn with_import_genesis(mut self, import_genesis: bool) -> Self {
        self.import_genesis = import_genesis;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_permissive() {
        let config = LoaderConfig::default();
        assert!(config.import_genesis);
        assert!(!config.enforce_extra_data_size);
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config: LoaderConfig =
            serde_json::from_str(r#"{ "enforce_extra_data_size": true }"#).unwrap();
        assert_eq!(config, LoaderConfig::strict());
    }
}
