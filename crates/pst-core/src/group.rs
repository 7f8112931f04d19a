// Path: crates/pst-core/src/group.rs
//! P-384 group primitives: point/scalar encoding, hash-to-curve, hash-to-scalar.
//!
//! Points and scalars are distinct newtypes with no implicit conversion
//! between them (see `DESIGN.md`, "Dual-field representation"). All
//! comparisons that matter for protocol security happen over the canonical
//! byte encoding, never over parsed coordinates, so that equality checks on
//! the redeem path are constant-time by construction.

use crate::error::PstError;
use elliptic_curve::group::Curve;
use elliptic_curve::hash2curve::{ExpandMsgXmd, GroupDigest};
use elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use elliptic_curve::{Field, Group, PrimeField};
use p384::{AffinePoint, EncodedPoint, NistP384, ProjectivePoint, Scalar as P384Scalar};
use pst_api::crypto::SerializableElement;
use rand_core::CryptoRngCore;
use sha2::{Sha384, Sha512};
use subtle::ConstantTimeEq;

/// The length in bytes of the X9.62 uncompressed point encoding
/// (`0x04 ‖ X(48) ‖ Y(48)`).
pub const POINT_LEN: usize = 97;

/// The length in bytes of the canonical big-endian scalar encoding.
pub const SCALAR_LEN: usize = 48;

/// A non-identity element of the P-384 group.
///
/// Internally stored in projective coordinates so that repeated additions
/// and scalar multiplications (the inner loop of batch issuance) avoid an
/// affine conversion per step; conversion to the canonical 97-byte encoding
/// happens once, at serialization time.
///
/// Points are public by definition (nonces, signed elements, public keys),
/// so `Point` is `Copy` and carries no zeroization on drop.
#[derive(Clone, Copy, Debug)]
pub struct Point(ProjectivePoint);

/// A scalar in `[0, n)`, where `n` is the P-384 group order.
///
/// `Clone`-only, never `Copy`: every `Scalar` in this crate is either a
/// secret key or a proof intermediate derived from one, and a `Copy` type
/// would let the compiler silently duplicate that secret on every pass-by-
/// value, each duplicate going untouched by `Drop`-based zeroization. An
/// explicit `.clone()` at a call site is a visible, auditable duplication
/// of secret material instead of an invisible one.
#[derive(Clone)]
pub struct Scalar(P384Scalar);

impl zeroize::Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.0 = P384Scalar::ZERO;
    }
}

impl zeroize::ZeroizeOnDrop for Scalar {}

impl Drop for Scalar {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Point {
    /// The base generator `G`.
    pub fn generator() -> Self {
        Point(ProjectivePoint::GENERATOR)
    }

    /// Adds two points.
    pub fn add(&self, other: &Point) -> Point {
        Point(self.0 + other.0)
    }

    /// Multiplies a point by a scalar.
    pub fn mul(&self, scalar: &Scalar) -> Point {
        Point(self.0 * scalar.0)
    }

    /// Negates a point; used by DLEQ verification to express `a - b` as
    /// `a + (-b)`.
    pub fn negate(&self) -> Point {
        Point(-self.0)
    }

    /// `hash_to_curve(msg, DST)` instantiating `P384_XMD:SHA-384_SSWU_RO_`
    /// (V1) or `P384_XMD:SHA-512_SSWU_RO_` (V3) per
    /// draft-irtf-cfrg-hash-to-curve-16 §3, selected by `sha512`.
    pub fn hash_to_group(msg: &[u8], dst: &[u8], sha512: bool) -> Result<Point, PstError> {
        let projective = if sha512 {
            NistP384::hash_from_bytes::<ExpandMsgXmd<Sha512>>(&[msg], &[dst])
        } else {
            NistP384::hash_from_bytes::<ExpandMsgXmd<Sha384>>(&[msg], &[dst])
        }
        .map_err(|e| PstError::OperationFailed(format!("hash_to_curve failed: {e}")))?;
        Ok(Point(projective))
    }
}

impl SerializableElement for Point {
    const ENCODED_LEN: usize = POINT_LEN;

    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_affine().to_encoded_point(false).as_bytes().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, PstError> {
        if bytes.len() != POINT_LEN {
            return Err(PstError::InvalidPoint);
        }
        let encoded = EncodedPoint::from_bytes(bytes).map_err(|_| PstError::InvalidPoint)?;
        let affine = Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))
            .ok_or(PstError::InvalidPoint)?;
        if affine.to_curve().is_identity().into() {
            return Err(PstError::InvalidPoint);
        }
        Ok(Point(affine.to_curve()))
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes().ct_eq(&other.to_bytes()).into()
    }
}

impl Eq for Point {}

impl Scalar {
    /// Samples a scalar uniformly in `[1, n-1]` using the supplied RNG.
    pub fn random(rng: &mut impl CryptoRngCore) -> Result<Self, PstError> {
        loop {
            let candidate = P384Scalar::random(&mut *rng);
            if !bool::from(candidate.is_zero()) {
                return Ok(Scalar(candidate));
            }
        }
    }

    /// Adds two scalars modulo the group order.
    pub fn add(&self, other: &Scalar) -> Scalar {
        Scalar(self.0 + other.0)
    }

    /// Multiplies two scalars modulo the group order.
    pub fn mul(&self, other: &Scalar) -> Scalar {
        Scalar(self.0 * other.0)
    }

    /// `hash_to_scalar(msg, DST)`: `hash_to_field` with `m=1`, `L=72` (SHA-384)
    /// or `L=72`/`k=192` per the suite's security level, `expand_message_xmd`,
    /// modulus `n`.
    pub fn hash_to_scalar(msg: &[u8], dst: &[u8], sha512: bool) -> Result<Scalar, PstError> {
        let scalar = if sha512 {
            NistP384::hash_to_scalar::<ExpandMsgXmd<Sha512>>(&[msg], &[dst])
        } else {
            NistP384::hash_to_scalar::<ExpandMsgXmd<Sha384>>(&[msg], &[dst])
        }
        .map_err(|e| PstError::OperationFailed(format!("hash_to_scalar failed: {e}")))?;
        Ok(Scalar(scalar))
    }

    /// Returns true if this scalar is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero().into()
    }

    /// Returns `n - 1`, the additive inverse of `1` modulo the group order.
    ///
    /// Used only to reconstruct the fixed-nonce test vector from spec §8
    /// scenario 1 (`d = n-1`, `r = n-1`); see `test_fixtures`.
    #[cfg(any(test, feature = "test-fixtures"))]
    pub fn order_minus_one() -> Scalar {
        Scalar(-P384Scalar::ONE)
    }
}

impl SerializableElement for Scalar {
    const ENCODED_LEN: usize = SCALAR_LEN;

    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_repr().to_vec()
    }

    /// Interprets `bytes` as big-endian; does not reduce modulo `n` during
    /// decode (inputs from trusted key material are already canonical).
    fn from_bytes(bytes: &[u8]) -> Result<Self, PstError> {
        if bytes.len() != SCALAR_LEN {
            return Err(PstError::InvalidScalar);
        }
        let mut repr = p384::FieldBytes::default();
        repr.copy_from_slice(bytes);
        let scalar =
            Option::<P384Scalar>::from(P384Scalar::from_repr(repr)).ok_or(PstError::InvalidScalar)?;
        Ok(Scalar(scalar))
    }
}
