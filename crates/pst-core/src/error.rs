// Path: crates/pst-core/src/error.rs
//! Local error type alias for the `pst-core` crate.

pub use pst_api::error::PstError;
