// Path: crates/pst-core/src/commitment.rs
//! Key commitment document generation (§4.3).

use crate::codec::{encode_b64, encode_key_commitment_public_key};
use crate::group::Point;
use crate::proto::ProtocolVersion;
use serde_json::{json, Map, Value};

/// The fixed commitment id emitted in every document (§4.3: `"id": 1`).
pub const COMMITMENT_ID: u64 = 1;

/// One entry in the issuer's key map, as needed to render a commitment
/// document: identifier, public point, and expiry in microseconds.
pub struct CommitmentKey {
    /// The key identifier.
    pub id: u32,
    /// The public point.
    pub point: Point,
    /// Expiry, already normalized to microseconds since the Unix epoch.
    pub expiry_micros: u64,
}

/// Builds the key commitment document:
///
/// ```json
/// { "<host>": { "<protocol_name>": {
///     "protocol_version": "<protocol_name>",
///     "id": 1,
///     "batchsize": <max_batch_size>,
///     "keys": { "<key_id>": { "Y": <base64(u32_id ‖ point)>,
///                             "expiry": "<microseconds_since_epoch>" }, … }
/// } } }
/// ```
pub fn build_key_commitment(
    host: &str,
    version: ProtocolVersion,
    max_batch_size: u16,
    keys: &[CommitmentKey],
) -> Value {
    let mut key_entries = Map::new();
    for key in keys {
        let y = encode_b64(&encode_key_commitment_public_key(key.id, &key.point));
        key_entries.insert(
            key.id.to_string(),
            json!({
                "Y": y,
                // Emitted as a decimal string, not a JSON number, per §4.3.
                "expiry": key.expiry_micros.to_string(),
            }),
        );
    }

    let protocol_entry = json!({
        "protocol_version": version.protocol_name(),
        "id": COMMITMENT_ID,
        "batchsize": max_batch_size,
        "keys": Value::Object(key_entries),
    });

    let mut protocol_map = Map::new();
    protocol_map.insert(version.protocol_name().to_string(), protocol_entry);

    let mut host_map = Map::new();
    host_map.insert(host.to_string(), Value::Object(protocol_map));
    Value::Object(host_map)
}

/// Scales an ingested `expiry` value (seconds, milliseconds, or already
/// microseconds) up to microseconds, by multiplying by the smallest power
/// of `10^3` — `k ∈ {0, 3, 6, 9, 12, 15}` — that brings it to at least 16
/// decimal digits (§4.3).
///
/// This is the one piece of the spec's ingest behavior kept verbatim
/// despite the REDESIGN FLAGS note calling it out as ambiguity-prone: it is
/// the wire contract for `Jwk.exp`, not a reinterpretation left open to us
/// (see `DESIGN.md`, "Expiry unit normalization").
pub fn normalize_expiry_micros(raw: u64) -> u64 {
    if raw == 0 {
        return 0;
    }
    for exponent in [0u32, 3, 6, 9, 12, 15] {
        let scale = 10u128.pow(exponent);
        let scaled = (raw as u128) * scale;
        if digit_count(scaled) >= 16 {
            return scaled as u64;
        }
    }
    // Already past 16 digits even unscaled at k=15 means the input was
    // implausibly large; fall back to the k=15 scaling rather than panic.
    ((raw as u128) * 10u128.pow(15)) as u64
}

fn digit_count(value: u128) -> u32 {
    value.to_string().len() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_seconds_to_sixteen_digits() {
        // 10 digits (seconds) -> scale by 10^6 to reach 16 digits.
        let seconds = 1_700_000_000u64;
        let micros = normalize_expiry_micros(seconds);
        assert_eq!(digit_count(micros as u128), 16);
        assert_eq!(micros, seconds * 1_000_000);
    }

    #[test]
    fn normalizes_milliseconds_to_sixteen_digits() {
        // 13 digits (milliseconds) -> scale by 10^3 to reach 16 digits.
        let millis = 1_700_000_000_000u64;
        let micros = normalize_expiry_micros(millis);
        assert_eq!(digit_count(micros as u128), 16);
        assert_eq!(micros, millis * 1_000);
    }

    #[test]
    fn sixteen_digit_microseconds_pass_through() {
        let already_micros = 1_700_000_000_000_000u64;
        assert_eq!(digit_count(already_micros as u128), 16);
        assert_eq!(normalize_expiry_micros(already_micros), already_micros);
    }

    #[test]
    fn zero_expiry_passes_through() {
        assert_eq!(normalize_expiry_micros(0), 0);
    }

    #[test]
    fn commitment_document_has_expected_shape() {
        let keys = [CommitmentKey {
            id: 0,
            point: Point::generator(),
            expiry_micros: 1_700_000_000_000_000,
        }];
        let doc = build_key_commitment("issuer.example", ProtocolVersion::V3, 100, &keys);
        let entry = &doc["issuer.example"]["PrivateStateTokenV3VOPRF"];
        assert_eq!(entry["protocol_version"], "PrivateStateTokenV3VOPRF");
        assert_eq!(entry["id"], 1);
        assert_eq!(entry["batchsize"], 100);
        assert_eq!(entry["keys"]["0"]["expiry"], "1700000000000000");
        assert!(entry["keys"]["0"]["Y"].is_string());
    }
}
