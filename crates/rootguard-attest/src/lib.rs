// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Rootguard

//! Rootguard Attestation Engine
//!
//! Decodes a compact signed attestation token issued by a remote trust
//! service into a structured, partially-trusted result: nonce
//! generation, the three-segment token decoder, the defensive payload
//! parser, and the async client boundary to the service.
//!
//! Cryptographic signature verification of the token is explicitly out
//! of scope; it is the issuing service's job.

pub mod client;
pub mod flow;
pub mod nonce;
pub mod parser;
pub mod token;

pub use client::{AttestationClient, HttpAttestationClient};
pub use flow::AttestationFlow;
pub use nonce::NonceGenerator;
pub use parser::AttestationResponseParser;

/// Attestation failures.
///
/// `Service` and `Transport` keep remote failures distinct from a
/// successful-but-untrusted attestation: a failed call must never look
/// like a result with forged trust fields.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AttestError {
    /// The secure random source failed; no nonce, no request.
    #[error("secure random source unavailable")]
    NonceUnavailable,
    /// Wrong segment count, bad base64 or bad JSON in the token.
    #[error("attestation token is malformed")]
    MalformedToken,
    /// The service reported a structured failure status.
    #[error("attestation service returned status {code}")]
    Service { code: u16 },
    /// The request never completed.
    #[error("attestation transport failure: {0}")]
    Transport(String),
}
