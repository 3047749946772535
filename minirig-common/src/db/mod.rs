//! Shared build persistence (SQLite)

pub mod builds;
pub mod init;

pub use builds::*;
pub use init::*;
