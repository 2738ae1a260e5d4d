//! Rootguard API - shared data model
//!
//! Result and request types exchanged between the detection engine, the
//! attestation flow and their callers. Everything here is plain data:
//! serializable, cloneable, no I/O.

use serde::{Deserialize, Serialize};

/// Default advice string when the attestation payload carries none.
pub const DEFAULT_ADVICE: &str = "/";

/// Verdict of one detection run.
///
/// `rooted` is the Boolean union of all counted probe matches; `reasons`
/// is the human-readable audit trail, in probe registration order. A run
/// that finds nothing returns `{ rooted: false, reasons: [] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub rooted: bool,
    pub reasons: Vec<String>,
}

/// Outcome of a single probe evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub matched: bool,
    pub evidence: Vec<String>,
}

impl ProbeOutcome {
    /// The expected, non-evidentiary case.
    pub fn no_match() -> Self {
        Self::default()
    }

    /// A positive hit. Every match must carry at least one evidence string.
    pub fn hit(evidence: Vec<String>) -> Self {
        debug_assert!(!evidence.is_empty());
        Self {
            matched: true,
            evidence,
        }
    }

    /// Evidence that is recorded but does not count toward the verdict.
    pub fn diagnostic(evidence: Vec<String>) -> Self {
        Self {
            matched: false,
            evidence,
        }
    }
}

/// Per-path result of the out-of-runtime binary cross-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathProbe {
    NotFound,
    Found,
    /// The native checker could not examine this path. Never a match.
    Unavailable,
}

/// Nonce-bearing request for the remote attestation service.
///
/// Consumed exactly once; a fresh nonce is generated for every attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttestationRequest {
    pub nonce: Vec<u8>,
}

/// Structured, partially-trusted view of a decoded attestation payload.
///
/// Every field is independently optional on the wire; absent keys keep
/// the documented defaults and never fail the parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttestationResult {
    pub nonce: Option<String>,
    pub timestamp_ms: Option<i64>,
    /// Defaults to the caller's own package id.
    pub apk_package_name: String,
    /// SHA-256 digests of the signing certificates, base64 encoded.
    #[serde(rename = "apkCertificateDigestSha256")]
    pub apk_certificate_digests: Option<Vec<String>>,
    /// SHA-256 digest of the APK itself, base64 encoded.
    #[serde(rename = "apkDigestSha256")]
    pub apk_digest_sha256: Option<String>,
    /// Device build matches a compatibility-tested reference profile.
    pub cts_profile_match: bool,
    /// Weaker signal that the device is not obviously tampered with.
    pub basic_integrity: bool,
    /// Remediation advice from the service; "/" when none was given.
    pub advice: String,
}

impl AttestationResult {
    /// A result with all fields at their documented defaults.
    pub fn with_package(package: impl Into<String>) -> Self {
        Self {
            nonce: None,
            timestamp_ms: None,
            apk_package_name: package.into(),
            apk_certificate_digests: None,
            apk_digest_sha256: None,
            cts_profile_match: false,
            basic_integrity: false,
            advice: DEFAULT_ADVICE.to_string(),
        }
    }
}
