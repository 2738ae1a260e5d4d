//! Request nonce generation.

use crate::AttestError;
use chrono::Utc;
use ring::rand::{SecureRandom, SystemRandom};
use rootguard_api::AttestationRequest;

/// Number of cryptographically random bytes at the front of every nonce.
pub const NONCE_RANDOM_LEN: usize = 24;

/// Builds request nonces from a secure random source.
///
/// A nonce is 24 random bytes followed by the UTF-8 encoding of a label
/// that embeds a freshness marker. When the random source fails, nonce
/// generation fails loudly: callers must never submit an attestation
/// request with a forged or empty nonce.
pub struct NonceGenerator {
    rng: SystemRandom,
}

impl NonceGenerator {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }

    /// 24 secure random bytes concatenated with the label bytes.
    pub fn generate(&self, label: &str) -> Result<Vec<u8>, AttestError> {
        let mut random = [0u8; NONCE_RANDOM_LEN];
        self.rng
            .fill(&mut random)
            .map_err(|_| AttestError::NonceUnavailable)?;

        let mut nonce = Vec::with_capacity(NONCE_RANDOM_LEN + label.len());
        nonce.extend_from_slice(&random);
        nonce.extend_from_slice(label.as_bytes());
        Ok(nonce)
    }

    /// A complete request whose label carries the current timestamp,
    /// e.g. `"rootguard attestation: 1700000000000"`.
    pub fn request(&self, app_label: &str) -> Result<AttestationRequest, AttestError> {
        let label = format!("{}: {}", app_label, Utc::now().timestamp_millis());
        Ok(AttestationRequest {
            nonce: self.generate(&label)?,
        })
    }
}

impl Default for NonceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonce_is_random_prefix_plus_label() {
        let nonce = NonceGenerator::new().generate("app: 123").unwrap();
        assert_eq!(nonce.len(), NONCE_RANDOM_LEN + "app: 123".len());
        assert!(nonce.ends_with(b"app: 123"));
    }

    #[test]
    fn nonce_is_never_empty() {
        let nonce = NonceGenerator::new().generate("").unwrap();
        assert_eq!(nonce.len(), NONCE_RANDOM_LEN);
    }

    #[test]
    fn successive_nonces_are_distinct() {
        let generator = NonceGenerator::new();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..32 {
            assert!(seen.insert(generator.generate("label").unwrap()));
        }
    }

    #[test]
    fn request_label_embeds_a_timestamp() {
        let request = NonceGenerator::new().request("rootguard attestation").unwrap();
        let tail = &request.nonce[NONCE_RANDOM_LEN..];
        let label = std::str::from_utf8(tail).unwrap();
        let millis: i64 = label
            .strip_prefix("rootguard attestation: ")
            .unwrap()
            .parse()
            .unwrap();
        assert!(millis > 0);
    }
}
