// Path: crates/pst-core/src/codec.rs
//! Big-endian, length-prefixed wire codec for the issue and redeem messages,
//! plus the base64 wrappers the transport boundary needs (§4.2, §6).
//!
//! All multi-byte integers are big-endian. A malformed `Point` inside an
//! `IssueRequest` is dropped and counted rather than treated as a hard parse
//! error (§7, "Lenient point-parse policy"); every other length mismatch is
//! a `PstError::Decode`.

use crate::error::PstError;
use crate::group::Point;
use pst_api::crypto::SerializableElement;

/// The fixed length of the `nonce` field inside a `Token`.
pub const NONCE_LEN: usize = 64;

/// `4 (key_id) + 64 (nonce) + 97 (point)`.
pub const TOKEN_LEN: usize = 4 + NONCE_LEN + Point::ENCODED_LEN;

/// `48 (c) + 48 (u)`.
pub const PROOF_LEN: usize = 2 * crate::group::SCALAR_LEN;

/// An ordered sequence of blinded nonces submitted for issuance.
#[derive(Clone, Debug, Default)]
pub struct IssueRequest {
    /// The surviving, successfully-decoded nonces, in original order.
    pub nonces: Vec<Point>,
}

/// A previously-issued token, as presented at redemption time.
#[derive(Clone, Debug)]
pub struct Token {
    /// The id of the key that signed this token.
    pub key_id: u32,
    /// The 64-byte client nonce.
    pub nonce: [u8; NONCE_LEN],
    /// The signed element `W`.
    pub point: Point,
}

/// A redemption request: a `Token` plus an opaque client-data blob.
#[derive(Clone, Debug)]
pub struct RedeemRequest {
    /// The embedded token.
    pub token: Token,
    /// Opaque caller data (conventionally CBOR); not interpreted by this
    /// crate.
    pub client_data: Vec<u8>,
}

/// The issuer's response to an `IssueRequest`.
#[derive(Clone, Debug)]
pub struct IssueResponse {
    /// The id of the key that produced this response.
    pub key_id: u32,
    /// `signed[i] = sk · nonces[i]` for each surviving input nonce.
    pub signed: Vec<Point>,
    /// The batched DLEQ proof, `c ‖ u` (96 bytes).
    pub proof: Vec<u8>,
}

/// An opaque redemption record, returned verbatim on a successful redeem.
#[derive(Clone, Debug)]
pub struct RedeemResponse {
    /// The caller-supplied record bytes.
    pub record: Vec<u8>,
}

/// A cursor over a byte slice that returns `PstError::Decode` instead of
/// panicking on short reads, so the crate-wide `clippy::indexing_slicing`
/// deny holds even for hostile wire input.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Reader { buf, pos: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], PstError> {
        let end = self
            .pos
            .checked_add(len)
            .ok_or_else(|| PstError::Decode("length overflow".into()))?;
        let slice = self
            .buf
            .get(self.pos..end)
            .ok_or_else(|| PstError::Decode("unexpected end of input".into()))?;
        self.pos = end;
        Ok(slice)
    }

    fn take_u16(&mut self) -> Result<u16, PstError> {
        let bytes = self.take(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    fn take_u32(&mut self) -> Result<u32, PstError> {
        let bytes = self.take(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn remaining(&self) -> &'a [u8] {
        // `self.pos` is always `<= self.buf.len()` by construction of `take`.
        self.buf.get(self.pos..).unwrap_or(&[])
    }

    fn at_end(&self) -> bool {
        self.pos == self.buf.len()
    }
}

/// Decodes an `IssueRequest`: `u16 count ‖ Point nonces[count]`.
///
/// Returns the surviving nonces alongside a count of dropped, malformed
/// points (§9, "expose a counter on the response path").
pub fn decode_issue_request(bytes: &[u8]) -> Result<(IssueRequest, u32), PstError> {
    let mut reader = Reader::new(bytes);
    let count = reader.take_u16()?;
    let mut nonces = Vec::with_capacity(count as usize);
    let mut skipped = 0u32;
    for _ in 0..count {
        let raw = reader.take(Point::ENCODED_LEN)?;
        match Point::from_bytes(raw) {
            Ok(point) => nonces.push(point),
            Err(_) => {
                log::debug!("dropping malformed point inside IssueRequest");
                skipped = skipped.saturating_add(1);
            }
        }
    }
    Ok((IssueRequest { nonces }, skipped))
}

/// Encodes an `IssueRequest`.
pub fn encode_issue_request(req: &IssueRequest) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 + req.nonces.len() * Point::ENCODED_LEN);
    out.extend_from_slice(&(req.nonces.len() as u16).to_be_bytes());
    for point in &req.nonces {
        out.extend_from_slice(&point.to_bytes());
    }
    out
}

/// Decodes a `Token`: `u32 key_id ‖ opaque nonce[64] ‖ Point W`.
pub fn decode_token(bytes: &[u8]) -> Result<Token, PstError> {
    let mut reader = Reader::new(bytes);
    let key_id = reader.take_u32()?;
    let nonce_slice = reader.take(NONCE_LEN)?;
    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(nonce_slice);
    let point_bytes = reader.take(Point::ENCODED_LEN)?;
    let point = Point::from_bytes(point_bytes)?;
    if !reader.at_end() {
        return Err(PstError::Decode("trailing bytes after Token".into()));
    }
    Ok(Token {
        key_id,
        nonce,
        point,
    })
}

/// Encodes a `Token`.
pub fn encode_token(token: &Token) -> Vec<u8> {
    let mut out = Vec::with_capacity(TOKEN_LEN);
    out.extend_from_slice(&token.key_id.to_be_bytes());
    out.extend_from_slice(&token.nonce);
    out.extend_from_slice(&token.point.to_bytes());
    out
}

/// Decodes a `RedeemRequest`:
/// `u16 token_len ‖ Token ‖ u16 client_data_len ‖ opaque client_data`.
pub fn decode_redeem_request(bytes: &[u8]) -> Result<RedeemRequest, PstError> {
    let mut reader = Reader::new(bytes);
    let token_len = reader.take_u16()? as usize;
    if token_len != TOKEN_LEN {
        return Err(PstError::Decode(format!(
            "unexpected token_len: {token_len}, expected {TOKEN_LEN}"
        )));
    }
    let token_bytes = reader.take(token_len)?;
    let token = decode_token(token_bytes)?;
    let client_data_len = reader.take_u16()? as usize;
    let client_data = reader.take(client_data_len)?.to_vec();
    Ok(RedeemRequest { token, client_data })
}

/// Encodes a `RedeemRequest`.
pub fn encode_redeem_request(req: &RedeemRequest) -> Vec<u8> {
    let token_bytes = encode_token(&req.token);
    let mut out = Vec::with_capacity(2 + token_bytes.len() + 2 + req.client_data.len());
    out.extend_from_slice(&(token_bytes.len() as u16).to_be_bytes());
    out.extend_from_slice(&token_bytes);
    out.extend_from_slice(&(req.client_data.len() as u16).to_be_bytes());
    out.extend_from_slice(&req.client_data);
    out
}

/// Decodes an `IssueResponse`:
/// `u16 issued ‖ u32 key_id ‖ Point signed[issued] ‖ u16 proof_len ‖ opaque proof`.
pub fn decode_issue_response(bytes: &[u8]) -> Result<IssueResponse, PstError> {
    let mut reader = Reader::new(bytes);
    let issued = reader.take_u16()?;
    let key_id = reader.take_u32()?;
    let mut signed = Vec::with_capacity(issued as usize);
    for _ in 0..issued {
        let raw = reader.take(Point::ENCODED_LEN)?;
        signed.push(Point::from_bytes(raw)?);
    }
    let proof_len = reader.take_u16()? as usize;
    let proof = reader.take(proof_len)?.to_vec();
    if !reader.at_end() {
        return Err(PstError::Decode("trailing bytes after IssueResponse".into()));
    }
    Ok(IssueResponse {
        key_id,
        signed,
        proof,
    })
}

/// Encodes an `IssueResponse`.
pub fn encode_issue_response(res: &IssueResponse) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 + 4 + res.signed.len() * Point::ENCODED_LEN + 2 + res.proof.len());
    out.extend_from_slice(&(res.signed.len() as u16).to_be_bytes());
    out.extend_from_slice(&res.key_id.to_be_bytes());
    for point in &res.signed {
        out.extend_from_slice(&point.to_bytes());
    }
    out.extend_from_slice(&(res.proof.len() as u16).to_be_bytes());
    out.extend_from_slice(&res.proof);
    out
}

/// `RedeemResponse` carries no framing of its own; the transport applies
/// any outer length prefix.
pub fn encode_redeem_response(res: &RedeemResponse) -> Vec<u8> {
    res.record.clone()
}

/// Wraps `res.record` as a pass-through `RedeemResponse`.
pub fn decode_redeem_response(bytes: &[u8]) -> RedeemResponse {
    RedeemResponse {
        record: bytes.to_vec(),
    }
}

/// Encodes `u32 id ‖ Point pub` for a `KeyCommitmentPublicKey` entry.
pub fn encode_key_commitment_public_key(id: u32, point: &Point) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + Point::ENCODED_LEN);
    out.extend_from_slice(&id.to_be_bytes());
    out.extend_from_slice(&point.to_bytes());
    out
}

/// Encodes `bytes` as standard-alphabet, padded base64.
pub fn encode_b64(bytes: &[u8]) -> String {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Decodes standard-alphabet, padded base64 into raw bytes.
pub fn decode_b64(s: &str) -> Result<Vec<u8>, PstError> {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD
        .decode(s)
        .map_err(|e| PstError::Decode(format!("invalid base64: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_request_round_trip_empty() {
        let req = IssueRequest { nonces: vec![] };
        let bytes = encode_issue_request(&req);
        let (decoded, skipped) = decode_issue_request(&bytes).unwrap();
        assert!(decoded.nonces.is_empty());
        assert_eq!(skipped, 0);
    }

    #[test]
    fn issue_request_round_trip_nonempty() {
        let g = Point::generator();
        let req = IssueRequest {
            nonces: vec![g, g],
        };
        let bytes = encode_issue_request(&req);
        let (decoded, skipped) = decode_issue_request(&bytes).unwrap();
        assert_eq!(decoded.nonces.len(), 2);
        assert_eq!(skipped, 0);
    }

    #[test]
    fn issue_request_skips_malformed_middle_point() {
        let g = Point::generator();
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&3u16.to_be_bytes());
        bytes.extend_from_slice(&g.to_bytes());
        let mut bad = g.to_bytes();
        bad[0] = 0x02; // invalid tag byte: not on the curve / not uncompressed
        bytes.extend_from_slice(&bad);
        bytes.extend_from_slice(&g.to_bytes());

        let (decoded, skipped) = decode_issue_request(&bytes).unwrap();
        assert_eq!(decoded.nonces.len(), 2);
        assert_eq!(skipped, 1);
    }

    #[test]
    fn token_round_trip() {
        let token = Token {
            key_id: 7,
            nonce: [9u8; NONCE_LEN],
            point: Point::generator(),
        };
        let bytes = encode_token(&token);
        assert_eq!(bytes.len(), TOKEN_LEN);
        let decoded = decode_token(&bytes).unwrap();
        assert_eq!(decoded.key_id, 7);
        assert_eq!(decoded.nonce, [9u8; NONCE_LEN]);
        assert_eq!(decoded.point, token.point);
    }

    #[test]
    fn redeem_request_round_trip() {
        let req = RedeemRequest {
            token: Token {
                key_id: 1,
                nonce: [0u8; NONCE_LEN],
                point: Point::generator(),
            },
            client_data: b"hello".to_vec(),
        };
        let bytes = encode_redeem_request(&req);
        let decoded = decode_redeem_request(&bytes).unwrap();
        assert_eq!(decoded.token.key_id, 1);
        assert_eq!(decoded.client_data, b"hello");
    }

    #[test]
    fn issue_response_round_trip() {
        let res = IssueResponse {
            key_id: 42,
            signed: vec![Point::generator()],
            proof: vec![7u8; PROOF_LEN],
        };
        let bytes = encode_issue_response(&res);
        let decoded = decode_issue_response(&bytes).unwrap();
        assert_eq!(decoded.key_id, 42);
        assert_eq!(decoded.signed.len(), 1);
        assert_eq!(decoded.proof, vec![7u8; PROOF_LEN]);
    }

    #[test]
    fn base64_round_trip() {
        let bytes = b"the quick brown fox";
        let encoded = encode_b64(bytes);
        let decoded = decode_b64(&encoded).unwrap();
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn short_read_is_decode_error_not_panic() {
        assert!(decode_token(&[0u8; 3]).is_err());
        assert!(decode_redeem_request(&[]).is_err());
    }

    /// Boundary property from §8: `count = 2^16 - 1` encodes at the ceiling
    /// and decodes back without overflow or truncation.
    #[test]
    fn issue_request_round_trips_at_the_u16_ceiling() {
        let count = u16::MAX;
        let g_bytes = Point::generator().to_bytes();
        let mut bytes = Vec::with_capacity(2 + count as usize * Point::ENCODED_LEN);
        bytes.extend_from_slice(&count.to_be_bytes());
        for _ in 0..count {
            bytes.extend_from_slice(&g_bytes);
        }
        let (decoded, skipped) = decode_issue_request(&bytes).unwrap();
        assert_eq!(decoded.nonces.len(), count as usize);
        assert_eq!(skipped, 0);

        let re_encoded = encode_issue_request(&decoded);
        assert_eq!(re_encoded.len(), bytes.len());
        assert_eq!(&re_encoded[..2], &count.to_be_bytes());
    }
}
