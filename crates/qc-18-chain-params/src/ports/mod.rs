//! Ports for chain parameter consumers.

pub mod seal;

pub use seal::*;
