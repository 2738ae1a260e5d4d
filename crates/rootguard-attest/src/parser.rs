//! Defensive parsing of the decoded attestation payload.

use rootguard_api::AttestationResult;
use serde_json::Value;
use tracing::debug;

/// Converts a decoded payload into an [`AttestationResult`].
///
/// The payload is formatted by an external service whose schema may
/// evolve: every recognized key is read only if present, an individually
/// wrong-typed key is skipped without aborting the rest, and absent keys
/// keep their documented defaults. Parsing the same payload twice yields
/// field-for-field identical results.
pub struct AttestationResponseParser {
    default_package: String,
}

impl AttestationResponseParser {
    /// `default_package` is the caller's own package id, used when the
    /// payload does not name one.
    pub fn new(default_package: impl Into<String>) -> Self {
        Self {
            default_package: default_package.into(),
        }
    }

    pub fn parse(&self, payload: &Value) -> AttestationResult {
        let mut result = AttestationResult::with_package(self.default_package.clone());

        if let Some(nonce) = payload.get("nonce").and_then(Value::as_str) {
            result.nonce = Some(nonce.to_string());
        }
        if let Some(timestamp) = payload.get("timestampMs").and_then(Value::as_i64) {
            result.timestamp_ms = Some(timestamp);
        }
        if let Some(package) = payload.get("apkPackageName").and_then(Value::as_str) {
            result.apk_package_name = package.to_string();
        }
        if let Some(digests) = payload
            .get("apkCertificateDigestSha256")
            .and_then(Value::as_array)
        {
            // Non-string entries are dropped individually.
            result.apk_certificate_digests = Some(
                digests
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
            );
        }
        if let Some(digest) = payload.get("apkDigestSha256").and_then(Value::as_str) {
            result.apk_digest_sha256 = Some(digest.to_string());
        }
        if let Some(cts) = payload.get("ctsProfileMatch").and_then(Value::as_bool) {
            result.cts_profile_match = cts;
        }
        if let Some(basic) = payload.get("basicIntegrity").and_then(Value::as_bool) {
            result.basic_integrity = basic;
        }
        if let Some(advice) = payload.get("advice").and_then(Value::as_str) {
            result.advice = advice.to_string();
        }

        debug!(
            cts_profile_match = result.cts_profile_match,
            basic_integrity = result.basic_integrity,
            "attestation payload parsed"
        );
        result
    }
}
