//! Compact signed token decoding.
//!
//! A valid token is exactly three dot-separated base64 segments
//! (header.payload.signature). Only the payload is inspected here; the
//! signature is the issuing service's business and is never verified by
//! this crate.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use serde_json::Value;
use tracing::debug;

/// Decodes the payload segment of a three-part token into JSON.
///
/// A malformed or empty token is a valid "failed attestation" outcome,
/// not a programming error, so every failure path returns `None`.
pub fn decode(token: &str) -> Option<Value> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        debug!(segments = segments.len(), "token does not have three segments");
        return None;
    }

    let payload = decode_segment(segments[1])?;
    match serde_json::from_slice(&payload) {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(%err, "token payload is not valid JSON");
            None
        }
    }
}

/// JWS mandates base64url without padding, but legacy producers emit the
/// standard alphabet; accept both.
fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .or_else(|_| STANDARD.decode(segment))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn token_with_payload(json: &str) -> String {
        format!("hdr.{}.sig", URL_SAFE_NO_PAD.encode(json))
    }

    #[test]
    fn two_segments_are_rejected() {
        assert!(decode("aaa.bbb").is_none());
    }

    #[test]
    fn four_segments_are_rejected() {
        assert!(decode("a.b.c.d").is_none());
    }

    #[test]
    fn empty_token_is_rejected() {
        assert!(decode("").is_none());
    }

    #[test]
    fn valid_payload_decodes_to_json() {
        let token = token_with_payload(r#"{"ctsProfileMatch":true,"basicIntegrity":true}"#);
        let value = decode(&token).unwrap();
        assert_eq!(value["ctsProfileMatch"], true);
        assert_eq!(value["basicIntegrity"], true);
    }

    #[test]
    fn standard_alphabet_payload_also_decodes() {
        let token = format!("hdr.{}.sig", STANDARD.encode(r#"{"basicIntegrity":false}"#));
        let value = decode(&token).unwrap();
        assert_eq!(value["basicIntegrity"], false);
    }

    #[test]
    fn non_base64_payload_is_rejected() {
        assert!(decode("hdr.@@not-base64@@.sig").is_none());
    }

    #[test]
    fn non_json_payload_is_rejected() {
        let token = format!("hdr.{}.sig", URL_SAFE_NO_PAD.encode("not json"));
        assert!(decode(&token).is_none());
    }

    proptest! {
        #[test]
        fn decode_never_panics_and_needs_three_segments(token in ".*") {
            let decoded = decode(&token);
            if token.matches('.').count() != 2 {
                prop_assert!(decoded.is_none());
            }
        }
    }
}
