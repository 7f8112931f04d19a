// Path: crates/pst-types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! # Private State Token — core types
//!
//! This crate is the foundational library for the Private State Token issuer
//! core, containing the shared error taxonomy and a couple of small extension
//! traits used across the workspace.
//!
//! ## Architectural role
//!
//! As the base crate, `pst-types` has minimal dependencies and is itself a
//! dependency for every other crate in the workspace. This keeps the
//! dependency graph acyclic and gives the rest of the crate a single,
//! canonical definition of `PstError`.

/// A top-level, crate-wide `Result` type alias with a default error type.
pub type Result<T, E = crate::error::PstError> = std::result::Result<T, E>;

/// The error taxonomy shared by every crate in the workspace.
pub mod error;
/// A prelude containing small extension traits like `OptionExt`.
pub mod prelude;
