//! Chain parameter record, configuration loading, genesis assembly and
//! genesis verification.

mod document;
mod engine;
pub mod genesis;
mod loader;
pub mod params;
mod verify;

pub use genesis::*;
pub use params::*;
