//! Public attestation surface: nonce, round trip, token handling.

use crate::client::AttestationClient;
use crate::nonce::NonceGenerator;
use crate::parser::AttestationResponseParser;
use crate::{token, AttestError};
use rootguard_api::{AttestationRequest, AttestationResult};

/// Ties the attestation pieces together for one call site.
///
/// A flow is stateless between attempts: every [`run`] builds a fresh
/// nonce, performs a single in-flight request and resolves exactly once.
/// Cancellation is dropping the returned future; there is no in-flight
/// state to clean up beyond the connection, which the client owns.
///
/// [`run`]: AttestationFlow::run
pub struct AttestationFlow {
    nonce: NonceGenerator,
    parser: AttestationResponseParser,
}

impl AttestationFlow {
    /// `package_name` becomes the default `apkPackageName` of parsed
    /// results.
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            nonce: NonceGenerator::new(),
            parser: AttestationResponseParser::new(package_name),
        }
    }

    /// A nonce-bearing request whose label embeds the current time.
    pub fn build_request(&self, label: &str) -> Result<AttestationRequest, AttestError> {
        self.nonce.request(label)
    }

    /// Decodes and parses a signed token received from the service.
    ///
    /// A malformed token yields [`AttestError::MalformedToken`] — a
    /// clearly failed outcome, distinct from a successfully parsed but
    /// untrusted result.
    pub fn on_token(&self, token: &str) -> Result<AttestationResult, AttestError> {
        let payload = token::decode(token).ok_or(AttestError::MalformedToken)?;
        Ok(self.parser.parse(&payload))
    }

    /// Full round trip: nonce, remote call, decode, parse.
    pub async fn run(
        &self,
        client: &dyn AttestationClient,
        label: &str,
    ) -> Result<AttestationResult, AttestError> {
        let request = self.build_request(label)?;
        let token = client.attest(request).await?;
        self.on_token(&token)
    }
}
