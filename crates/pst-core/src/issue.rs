// Path: crates/pst-core/src/issue.rs
//! The batched-DLEQ issue engine (§4.4).
//!
//! Per-nonce multiplication and the batch coefficient derivation are both
//! embarrassingly parallel over the input count, so both use `rayon`, the
//! same way the teacher crate's `CpuBatchVerifier` parallelizes independent
//! signature checks with `.par_iter()`.

use crate::codec::IssueResponse;
use crate::error::PstError;
use crate::group::{Point, Scalar};
use crate::keys::KeyPair;
use crate::proto::ProtocolVersion;
use pst_api::crypto::SerializableElement;
use rand_core::CryptoRngCore;
use rayon::prelude::*;

const BATCH_COEFFICIENT_LABEL: &[u8] = b"DLEQ BATCH\0";
const CHALLENGE_LABEL: &[u8] = b"DLEQ\0";

/// Issues tokens for every nonce in `nonces` under `keypair`, producing the
/// signed elements and a single batched DLEQ proof binding them to
/// `keypair.public`.
///
/// Rejects an empty batch (`PstError::EmptyBatch`) per the Open Question
/// resolution in `DESIGN.md`; the wire codec still round-trips an empty
/// `IssueRequest`/`IssueResponse`, only the engine refuses to process one.
pub fn issue(
    keypair: &KeyPair,
    nonces: &[Point],
    version: ProtocolVersion,
    rng: &mut impl CryptoRngCore,
) -> Result<IssueResponse, PstError> {
    if nonces.is_empty() {
        return Err(PstError::EmptyBatch);
    }
    if nonces.len() > u16::MAX as usize {
        return Err(PstError::BatchTooLarge {
            got: nonces.len(),
            max: u16::MAX as usize,
        });
    }

    let sk = &keypair.secret.scalar;
    let pk = &keypair.public.point;
    let dst = version.hash_to_scalar_dst();
    let sha512 = version.is_sha512();

    // Step 3: Z_i = sk * T_i, in order.
    let signed: Vec<Point> = nonces.par_iter().map(|t_i| t_i.mul(sk)).collect();

    // Step 4a: batch transcript B = pk_bytes || sum_i(T_i_bytes || Z_i_bytes).
    let pk_bytes = pk.to_bytes();
    let mut transcript = Vec::with_capacity(pk_bytes.len() + nonces.len() * 2 * Point::ENCODED_LEN);
    transcript.extend_from_slice(&pk_bytes);
    for (t_i, z_i) in nonces.iter().zip(signed.iter()) {
        transcript.extend_from_slice(&t_i.to_bytes());
        transcript.extend_from_slice(&z_i.to_bytes());
    }

    // Step 4b: e_i = hash_to_scalar("DLEQ BATCH\0" || B || u16(i), ...).
    let coefficients: Vec<Scalar> = (0..nonces.len())
        .into_par_iter()
        .map(|i| {
            let mut input = Vec::with_capacity(BATCH_COEFFICIENT_LABEL.len() + transcript.len() + 2);
            input.extend_from_slice(BATCH_COEFFICIENT_LABEL);
            input.extend_from_slice(&transcript);
            input.extend_from_slice(&(i as u16).to_be_bytes());
            Scalar::hash_to_scalar(&input, dst, sha512)
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Step 4c: T* = sum e_i * T_i, Z* = sum e_i * Z_i.
    let (t_star, z_star) = nonces
        .par_iter()
        .zip(signed.par_iter())
        .zip(coefficients.par_iter())
        .map(|((t_i, z_i), e_i)| (t_i.mul(e_i), z_i.mul(e_i)))
        .reduce_with(|(t_acc, z_acc), (t_i, z_i)| (t_acc.add(&t_i), z_acc.add(&z_i)))
        .ok_or(PstError::EmptyBatch)?;

    // Step 4d-e: proof nonce and commitments.
    let r = Scalar::random(rng)?;
    let k0 = Point::generator().mul(&r);
    let k1 = t_star.mul(&r);

    // Step 4f: challenge.
    let mut challenge_input = Vec::with_capacity(
        CHALLENGE_LABEL.len() + pk_bytes.len() + 4 * Point::ENCODED_LEN,
    );
    challenge_input.extend_from_slice(CHALLENGE_LABEL);
    challenge_input.extend_from_slice(&pk_bytes);
    challenge_input.extend_from_slice(&t_star.to_bytes());
    challenge_input.extend_from_slice(&z_star.to_bytes());
    challenge_input.extend_from_slice(&k0.to_bytes());
    challenge_input.extend_from_slice(&k1.to_bytes());
    let c = Scalar::hash_to_scalar(&challenge_input, dst, sha512)?;

    // Step 4g-h: response and proof assembly.
    let u = r.add(&c.mul(sk));
    let mut proof = c.to_bytes();
    proof.extend_from_slice(&u.to_bytes());

    Ok(IssueResponse {
        key_id: keypair.id,
        signed,
        proof,
    })
}
