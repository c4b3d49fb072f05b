//! # qc-18-chain-params
//!
//! Chain parameters and the canonical genesis block for Quantum-Chain.
//!
//! ## Role in System
//!
//! - **Configuration Loader**: reads a chain configuration document into an
//!   immutable `ChainParams` record
//! - **Genesis Header Assembler**: encodes block zero bit-exactly, including
//!   the seal suffix of the configured engine
//! - **Genesis Consistency Validator**: proves a genesis received from
//!   elsewhere matches the locally assembled one
//!
//! ## Flow
//!
//! ```text
//! config JSON ──load_config──→ ChainParams ──create_seal_engine──→ (ChainParams, engine)
//!                                  │
//!                 accounts ──→ commit_state (qc-04) ──→ state root
//!                                  │
//!                                  ↓
//!                   genesis_block() / genesis_header() / genesis_hash()
//!
//! supplied block + state ──populate_from_genesis──→ ChainParams | GenesisMismatch
//! ```
//!
//! ## Immutability
//!
//! Every operation that changes a record returns a new one. Records share
//! their genesis state behind an `Arc`, so deriving is cheap and a base
//! record can be reused across derivations.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use qc_18_chain_params::{ChainParams, SealEngineRegistry};
//!
//! let params = ChainParams::from_json(&std::fs::read_to_string("chain.json")?, None)?;
//! let (params, _engine) = params.create_seal_engine(&SealEngineRegistry::with_defaults())?;
//! let block = params.genesis_block();
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;

pub use adapters::*;
pub use config::LoaderConfig;
pub use domain::*;
pub use error::{ChainParamsError, Result};
pub use ports::*;
