pub mod json_accounts;
pub mod memory_db;

pub use json_accounts::*;
pub use memory_db::*;
