// Path: crates/pst-api/src/crypto/mod.rs
//! Defines the unified trait for serializable cryptographic group elements.

use crate::error::PstError;

/// A trait for any group element (point or scalar) that has a fixed-width
/// canonical byte encoding.
///
/// Implemented by `pst_core::group::Point` and `pst_core::group::Scalar`.
/// Unlike a general-purpose serialization trait, `to_bytes`/`from_bytes`
/// here are required to be constant-width and constant-time on the happy
/// path — callers that need to compare encodings for equality should do so
/// over these bytes, never over parsed coordinates.
pub trait SerializableElement {
    /// The length in bytes of this element's canonical encoding.
    const ENCODED_LEN: usize;

    /// Converts the element to its canonical byte encoding.
    fn to_bytes(&self) -> Vec<u8>;

    /// Parses an element from its canonical byte encoding.
    fn from_bytes(bytes: &[u8]) -> Result<Self, PstError>
    where
        Self: Sized;
}
