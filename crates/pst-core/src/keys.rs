// Path: crates/pst-core/src/keys.rs
//! Secret/public key types, key pairs, and JWK import (§3, §4.3, §6).

use crate::error::PstError;
use crate::group::{Point, Scalar};
use pst_api::crypto::SerializableElement;
use rand_core::CryptoRngCore;

/// A secret scalar key. `scalar` is never the zero scalar; immutable after
/// construction other than `id`/`expiry`, which the owning `KeyPair`
/// propagates to both sub-keys on mutation.
#[derive(Clone)]
pub struct SecretKey {
    /// The key identifier.
    pub id: u32,
    /// The secret scalar.
    pub scalar: Scalar,
    /// Expiry, in microseconds since the Unix epoch.
    pub expiry: u64,
}

/// A public point key. Should always equal `scalar · G` for the
/// corresponding `SecretKey`, though this invariant is not enforced at
/// construction — a key pair may be imported with an independent public
/// point (§3, `PublicKey`).
#[derive(Clone)]
pub struct PublicKey {
    /// The key identifier.
    pub id: u32,
    /// The public point.
    pub point: Point,
    /// Expiry, in microseconds since the Unix epoch.
    pub expiry: u64,
}

/// A secret/public key pair sharing one identifier and expiry.
#[derive(Clone)]
pub struct KeyPair {
    /// The key identifier, shared by `public` and `secret`.
    pub id: u32,
    /// The public half.
    pub public: PublicKey,
    /// The secret half.
    pub secret: SecretKey,
    /// Expiry, in microseconds since the Unix epoch, shared by both halves.
    pub expiry: u64,
}

/// The literal JWK ingest shape from §6:
/// `{kty:"EC", crv:"P-384", kid:<u32>, x:<b64u>, y:<b64u>, d:<b64u>, exp:<integer>}`.
#[derive(Clone, Debug)]
pub struct Jwk {
    /// Key type; expected to be `"EC"`.
    pub kty: String,
    /// Curve name; expected to be `"P-384"`.
    pub crv: String,
    /// The key identifier.
    pub kid: u32,
    /// Base64url (unpadded) encoding of the public X coordinate, 48 bytes.
    pub x: String,
    /// Base64url (unpadded) encoding of the public Y coordinate, 48 bytes.
    pub y: String,
    /// Base64url (unpadded) encoding of the private scalar, 48 bytes.
    pub d: String,
    /// Expiry, in whatever unit the source system used (see
    /// `commitment::normalize_expiry_micros`).
    pub exp: u64,
}

impl KeyPair {
    /// Generates a fresh key pair: a uniform secret scalar and its
    /// corresponding public point `sk · G`.
    pub fn generate(id: u32, expiry: u64, rng: &mut impl CryptoRngCore) -> Result<Self, PstError> {
        let scalar = Scalar::random(rng)?;
        let point = Point::generator().mul(&scalar);
        Ok(KeyPair {
            id,
            public: PublicKey {
                id,
                point,
                expiry,
            },
            secret: SecretKey {
                id,
                scalar,
                expiry,
            },
            expiry,
        })
    }

    /// Imports a key pair from a JWK-shaped record (§6). The public point is
    /// constructed from `0x04 ‖ x ‖ y`; the secret scalar from `d`. Does not
    /// verify that `point == d · G` (the spec's `PublicKey` invariant is
    /// "required for correctness" but "not enforced at construction").
    pub fn from_jwk(jwk: &Jwk) -> Result<Self, PstError> {
        if jwk.kty != "EC" || jwk.crv != "P-384" {
            return Err(PstError::InvalidKey(format!(
                "unsupported JWK kty/crv: {}/{}",
                jwk.kty, jwk.crv
            )));
        }
        let x = decode_b64url_fixed(&jwk.x, crate::group::SCALAR_LEN)?;
        let y = decode_b64url_fixed(&jwk.y, crate::group::SCALAR_LEN)?;
        let d = decode_b64url_fixed(&jwk.d, crate::group::SCALAR_LEN)?;

        let mut point_bytes = Vec::with_capacity(1 + x.len() + y.len());
        point_bytes.push(0x04);
        point_bytes.extend_from_slice(&x);
        point_bytes.extend_from_slice(&y);
        let point = Point::from_bytes(&point_bytes)?;
        let scalar = Scalar::from_bytes(&d)?;

        let expiry = crate::commitment::normalize_expiry_micros(jwk.exp);

        Ok(KeyPair {
            id: jwk.kid,
            public: PublicKey {
                id: jwk.kid,
                point,
                expiry,
            },
            secret: SecretKey {
                id: jwk.kid,
                scalar,
                expiry,
            },
            expiry,
        })
    }

    /// Rewrites `id` on both sub-keys, keeping the pair's invariant that
    /// `secret.id == public.id == self.id`.
    pub fn set_id(&mut self, id: u32) {
        self.id = id;
        self.public.id = id;
        self.secret.id = id;
    }

    /// Rewrites `expiry` on both sub-keys.
    pub fn set_expiry(&mut self, expiry: u64) {
        self.expiry = expiry;
        self.public.expiry = expiry;
        self.secret.expiry = expiry;
    }
}

fn decode_b64url_fixed(s: &str, expected_len: usize) -> Result<Vec<u8>, PstError> {
    use base64::Engine;
    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(s)
        .map_err(|e| PstError::InvalidKey(format!("invalid base64url field: {e}")))?;
    if bytes.len() != expected_len {
        return Err(PstError::InvalidKey(format!(
            "expected {expected_len} bytes, got {}",
            bytes.len()
        )));
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_produces_consistent_keypair() {
        let mut rng = rand::rngs::OsRng;
        let kp = KeyPair::generate(0, 0, &mut rng).unwrap();
        assert_eq!(Point::generator().mul(&kp.secret.scalar), kp.public.point);
        assert_eq!(kp.id, kp.public.id);
        assert_eq!(kp.id, kp.secret.id);
    }

    #[test]
    fn set_id_propagates_to_both_halves() {
        let mut rng = rand::rngs::OsRng;
        let mut kp = KeyPair::generate(0, 0, &mut rng).unwrap();
        kp.set_id(9);
        assert_eq!(kp.public.id, 9);
        assert_eq!(kp.secret.id, 9);
    }

    #[test]
    fn jwk_import_round_trips_generated_key() {
        use base64::Engine;
        let mut rng = rand::rngs::OsRng;
        let kp = KeyPair::generate(3, 1_700_000_000_000_000, &mut rng).unwrap();
        let point_bytes = kp.public.point.to_bytes();
        let (x, y) = point_bytes[1..].split_at(crate::group::SCALAR_LEN);
        let jwk = Jwk {
            kty: "EC".into(),
            crv: "P-384".into(),
            kid: kp.id,
            x: base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(x),
            y: base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(y),
            d: base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(kp.secret.scalar.to_bytes()),
            exp: 1_700_000_000_000_000,
        };
        let imported = KeyPair::from_jwk(&jwk).unwrap();
        assert_eq!(imported.public.point, kp.public.point);
        assert_eq!(imported.secret.scalar.to_bytes(), kp.secret.scalar.to_bytes());
    }

    #[test]
    fn jwk_import_rejects_wrong_curve() {
        let jwk = Jwk {
            kty: "EC".into(),
            crv: "P-256".into(),
            kid: 0,
            x: String::new(),
            y: String::new(),
            d: String::new(),
            exp: 0,
        };
        assert!(KeyPair::from_jwk(&jwk).is_err());
    }
}
