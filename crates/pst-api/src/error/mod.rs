// Path: crates/pst-api/src/error/mod.rs
// Re-export the core error type from the central types crate.
pub use pst_types::error::{ErrorCode, PstError};
pub use pst_types::Result;
