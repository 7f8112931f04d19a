// Path: crates/pst-core/src/redeem.rs
//! The redeem engine (§4.5): the `Evaluate` leg of VOPRF without the outer
//! `Finalize` hash — verifies that the client holds a valid
//! `(nonce, sk·H(nonce))` pair obtained via prior blind issuance.

use crate::error::PstError;
use crate::group::Point;
use crate::keys::KeyPair;
use crate::proto::ProtocolVersion;
use pst_api::crypto::SerializableElement;
use subtle::ConstantTimeEq;

/// Verifies a redeem request against `keypair`, returning `record`
/// unchanged on success.
///
/// The comparison between the recomputed element and `point` happens over
/// the canonical 97-byte point encoding using `subtle::ConstantTimeEq`,
/// never over parsed coordinates, so a mismatched byte cannot be detected
/// faster than a full-length compare (§4.5, §7).
pub fn redeem(
    keypair: &KeyPair,
    nonce: &[u8],
    point: &Point,
    record: Vec<u8>,
    version: ProtocolVersion,
) -> Result<Vec<u8>, PstError> {
    let dst = version.hash_to_group_dst();
    let sha512 = version.is_sha512();

    let base = Point::hash_to_group(nonce, dst, sha512)?;
    let expected = base.mul(&keypair.secret.scalar);

    let matches: bool = expected.to_bytes().ct_eq(&point.to_bytes()).into();
    if matches {
        Ok(record)
    } else {
        log::debug!("redeem mismatch for key id {}", keypair.id);
        Err(PstError::RedeemMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_keypair() -> KeyPair {
        let mut rng = rand::rngs::OsRng;
        KeyPair::generate(0, 0, &mut rng).unwrap()
    }

    #[test]
    fn redeem_succeeds_for_a_genuine_token() {
        let kp = test_keypair();
        let nonce = [0u8; 64];
        let point = Point::hash_to_group(&nonce, ProtocolVersion::V3.hash_to_group_dst(), true)
            .unwrap()
            .mul(&kp.secret.scalar);

        let record = b"redemption-record".to_vec();
        let result = redeem(&kp, &nonce, &point, record.clone(), ProtocolVersion::V3).unwrap();
        assert_eq!(result, record);
    }

    #[test]
    fn redeem_rejects_a_flipped_point_byte() {
        let kp = test_keypair();
        let nonce = [0u8; 64];
        let mut point_bytes = Point::hash_to_group(&nonce, ProtocolVersion::V3.hash_to_group_dst(), true)
            .unwrap()
            .mul(&kp.secret.scalar)
            .to_bytes();
        *point_bytes.last_mut().unwrap() ^= 0xFF;
        let point = Point::from_bytes(&point_bytes).unwrap();

        let err = redeem(&kp, &nonce, &point, b"r".to_vec(), ProtocolVersion::V3).unwrap_err();
        assert!(matches!(err, PstError::RedeemMismatch));
    }

    #[test]
    fn redeem_rejects_a_mutated_nonce() {
        let kp = test_keypair();
        let nonce = [0u8; 64];
        let point = Point::hash_to_group(&nonce, ProtocolVersion::V3.hash_to_group_dst(), true)
            .unwrap()
            .mul(&kp.secret.scalar);

        let mut mutated_nonce = nonce;
        mutated_nonce[0] ^= 1;
        let err = redeem(&kp, &mutated_nonce, &point, b"r".to_vec(), ProtocolVersion::V3).unwrap_err();
        assert!(matches!(err, PstError::RedeemMismatch));
    }

    #[test]
    fn v1_and_v3_disagree_on_the_same_nonce() {
        let kp = test_keypair();
        let nonce = [7u8; 64];
        let point_v3 = Point::hash_to_group(&nonce, ProtocolVersion::V3.hash_to_group_dst(), true)
            .unwrap()
            .mul(&kp.secret.scalar);

        let err = redeem(&kp, &nonce, &point_v3, b"r".to_vec(), ProtocolVersion::V1).unwrap_err();
        assert!(matches!(err, PstError::RedeemMismatch));
    }
}
