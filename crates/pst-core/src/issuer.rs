// Path: crates/pst-core/src/issuer.rs
//! The `Issuer` façade (§4.6): owns the keyed map of key pairs, dispatches
//! issue/redeem to the right key, and emits key commitments.

use crate::codec::{IssueRequest, IssueResponse};
use crate::commitment::{build_key_commitment, CommitmentKey};
use crate::error::PstError;
use crate::group::Point;
use crate::keys::{Jwk, KeyPair, PublicKey};
use crate::proto::ProtocolVersion;
use dashmap::DashMap;
use rand_core::CryptoRngCore;
use serde_json::Value;

/// The richer return type of `Issuer::issue`: the wire-facing response (if
/// the key was known) alongside the number of malformed points the wire
/// codec dropped while decoding the request. Only `response` ever crosses
/// the wire; `skipped` is an in-process observability signal (§9).
#[derive(Debug)]
pub struct IssueOutcome {
    /// The issue response, or `None` if `keyID` was unknown.
    pub response: Option<IssueResponse>,
    /// The number of malformed points dropped while decoding the request.
    pub skipped: u32,
}

/// Owns a keyed map of key pairs and dispatches issue/redeem calls to the
/// right one.
///
/// The key map is a `dashmap::DashMap`, a sharded, lock-striped concurrent
/// map: `add_key`/`add_jwk` writers never block an in-flight `issue`/
/// `redeem` reader working a different shard (§5, "Shared state").
pub struct Issuer {
    /// Identifies the origin in key commitments.
    pub host: String,
    /// The advertised maximum batch size. The engine itself does not
    /// enforce this; policy is the caller's responsibility (§3).
    pub max_batch_size: u16,
    keys: DashMap<u32, KeyPair>,
}

impl Issuer {
    /// Constructs an issuer with an empty key map.
    pub fn new(host: impl Into<String>, max_batch_size: u16) -> Self {
        Issuer {
            host: host.into(),
            max_batch_size,
            keys: DashMap::new(),
        }
    }

    /// Constructs an issuer with a single freshly-generated key pair.
    pub fn generate(
        host: impl Into<String>,
        max_batch_size: u16,
        id: u32,
        rng: &mut impl CryptoRngCore,
    ) -> Result<Self, PstError> {
        let issuer = Issuer::new(host, max_batch_size);
        let keypair = KeyPair::generate(id, 0, rng)?;
        issuer.add_key(keypair);
        Ok(issuer)
    }

    /// Upserts `keypair` into the map, keyed by `keypair.id`.
    pub fn add_key(&self, keypair: KeyPair) {
        self.keys.insert(keypair.id, keypair);
    }

    /// Imports and upserts a key pair from a JWK-shaped record.
    pub fn add_jwk(&self, jwk: &Jwk) -> Result<(), PstError> {
        let keypair = KeyPair::from_jwk(jwk)?;
        self.add_key(keypair);
        Ok(())
    }

    /// Returns every public key, fixed in ascending-`id` order (§4.6,
    /// "implementations SHOULD fix one order and document it").
    pub fn public_keys(&self) -> Vec<PublicKey> {
        let mut keys: Vec<PublicKey> = self.keys.iter().map(|entry| entry.public.clone()).collect();
        keys.sort_by_key(|pk| pk.id);
        keys
    }

    /// Builds the key commitment document (§4.3) for `version`.
    pub fn key_commitment(&self, version: ProtocolVersion) -> Value {
        let keys: Vec<CommitmentKey> = self
            .public_keys()
            .into_iter()
            .map(|pk| CommitmentKey {
                id: pk.id,
                point: pk.point,
                expiry_micros: pk.expiry,
            })
            .collect();
        build_key_commitment(&self.host, version, self.max_batch_size, &keys)
    }

    /// Issues tokens for `request` under `key_id`.
    ///
    /// `skipped` is the count of malformed points the wire codec dropped
    /// while decoding `request` (see `codec::decode_issue_request`); it is
    /// threaded through unchanged so the caller gets a single outcome
    /// covering both the decode and the engine stage.
    ///
    /// An unknown `key_id` yields `IssueOutcome { response: None, .. }`
    /// rather than an error (§7, "distinguishable from successful empty
    /// responses"); any other engine failure (e.g. an empty surviving
    /// batch) is returned as `Err`.
    pub fn issue(
        &self,
        key_id: u32,
        request: &IssueRequest,
        skipped: u32,
        version: ProtocolVersion,
        rng: &mut impl CryptoRngCore,
    ) -> Result<IssueOutcome, PstError> {
        let keypair = match self.keys.get(&key_id) {
            Some(entry) => entry,
            None => {
                log::warn!("issue requested for unknown key id {key_id}");
                return Ok(IssueOutcome {
                    response: None,
                    skipped,
                });
            }
        };
        let response = crate::issue::issue(&keypair, &request.nonces, version, rng)?;
        Ok(IssueOutcome {
            response: Some(response),
            skipped,
        })
    }

    /// Verifies a redeem request under `request.key_id`, returning `record`
    /// on success.
    pub fn redeem(
        &self,
        key_id: u32,
        nonce: &[u8],
        point: &Point,
        record: Vec<u8>,
        version: ProtocolVersion,
    ) -> Result<Vec<u8>, PstError> {
        let keypair = self
            .keys
            .get(&key_id)
            .ok_or(PstError::UnknownKey(key_id))?;
        crate::redeem::redeem(&keypair, nonce, point, record, version)
    }
}
