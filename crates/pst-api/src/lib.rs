// Path: crates/pst-api/src/lib.rs

//! # Private State Token API crate lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code. Panics are disallowed in non-test
//! code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing
    )
)]
//! # Private State Token API
//!
//! Cross-cutting trait contracts for the VOPRF issuer core. This crate
//! defines the stable contract every group-element type in `pst-core`
//! implements, and re-exports the shared error taxonomy from `pst-types`.

/// Defines unified traits for serializable cryptographic elements.
pub mod crypto;
/// Re-exports the core error types from the central `pst-types` crate.
pub mod error;

/// A curated set of the most commonly used traits and types.
pub mod prelude {
    pub use crate::crypto::SerializableElement;
    pub use crate::error::{ErrorCode, PstError};
}
