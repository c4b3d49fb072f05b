//! Built-in seal engines and the registry that creates them by name.

pub mod registry;
pub mod seal_engines;

pub use registry::*;
pub use seal_engines::*;
