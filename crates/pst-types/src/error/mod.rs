// Path: crates/pst-types/src/error/mod.rs
//! Core error types for the Private State Token issuer core.

use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors that can occur anywhere in the VOPRF issuer core: group-element
/// decoding, wire codec framing, key management, and the issue/redeem
/// engines all report through this single enum.
#[derive(Error, Debug)]
pub enum PstError {
    /// A wire-format field was truncated, malformed, or had a bad length
    /// prefix.
    #[error("decode error: {0}")]
    Decode(String),

    /// A 97-byte field did not parse as a valid uncompressed P-384 point
    /// (bad tag byte, or the coordinates are not on the curve).
    #[error("invalid point encoding")]
    InvalidPoint,

    /// A 48-byte field did not parse as a valid scalar (out of range for
    /// the P-384 group order).
    #[error("invalid scalar encoding")]
    InvalidScalar,

    /// The issuer has no key registered under the requested key id.
    #[error("unknown key id: {0}")]
    UnknownKey(u32),

    /// The key material supplied to `add_key`/`add_jwk` was structurally
    /// invalid (wrong length, public key does not match the private scalar).
    #[error("invalid key material: {0}")]
    InvalidKey(String),

    /// A redeem request's token did not verify against the issuer's
    /// committed public key.
    #[error("redeem verification failed")]
    RedeemMismatch,

    /// An `IssueRequest` with a zero-length batch was rejected; batches must
    /// carry at least one blinded point.
    #[error("empty issue batch")]
    EmptyBatch,

    /// A requested batch size exceeded the issuer's configured
    /// `maxBatchSize`.
    #[error("batch size {got} exceeds maximum of {max}")]
    BatchTooLarge {
        /// The batch size that was requested.
        got: usize,
        /// The issuer's configured maximum.
        max: usize,
    },

    /// The system RNG failed to produce randomness.
    #[error("random number generation failed: {0}")]
    RngFailure(String),

    /// A requested operation or parameter is not supported by this core
    /// (e.g. an unrecognized `ProtocolVersion` tag).
    #[error("unsupported operation or parameter: {0}")]
    Unsupported(String),

    /// A generic failure inside the underlying elliptic-curve arithmetic.
    #[error("cryptographic operation failed: {0}")]
    OperationFailed(String),
}

impl ErrorCode for PstError {
    fn code(&self) -> &'static str {
        match self {
            Self::Decode(_) => "PST_DECODE_ERROR",
            Self::InvalidPoint => "PST_INVALID_POINT",
            Self::InvalidScalar => "PST_INVALID_SCALAR",
            Self::UnknownKey(_) => "PST_UNKNOWN_KEY",
            Self::InvalidKey(_) => "PST_INVALID_KEY",
            Self::RedeemMismatch => "PST_REDEEM_MISMATCH",
            Self::EmptyBatch => "PST_EMPTY_BATCH",
            Self::BatchTooLarge { .. } => "PST_BATCH_TOO_LARGE",
            Self::RngFailure(_) => "PST_RNG_FAILURE",
            Self::Unsupported(_) => "PST_UNSUPPORTED",
            Self::OperationFailed(_) => "PST_OPERATION_FAILED",
        }
    }
}
