//! Remote attestation service boundary.

use crate::AttestError;
use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rootguard_api::AttestationRequest;
use serde_json::Value;
use tracing::{debug, error};

/// Sends a nonce to the remote trust service and returns the signed
/// token. One resolution per call, no retries; dropping the future
/// cancels the attempt.
#[async_trait]
pub trait AttestationClient: Send + Sync {
    async fn attest(&self, request: AttestationRequest) -> Result<String, AttestError>;
}

/// HTTP implementation of the attestation boundary.
///
/// Posts the base64url nonce as JSON to the configured endpoint with the
/// API key as a query parameter, and extracts the signed token from the
/// response body. Service-reported failure statuses and transport
/// failures are surfaced as distinct error variants; neither is ever
/// converted into a "trusted" result.
pub struct HttpAttestationClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpAttestationClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl AttestationClient for HttpAttestationClient {
    async fn attest(&self, request: AttestationRequest) -> Result<String, AttestError> {
        let body = serde_json::json!({
            "nonce": URL_SAFE_NO_PAD.encode(&request.nonce),
        });

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                error!(%err, "attestation transport failure");
                AttestError::Transport(err.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(code = status.as_u16(), "attestation service error");
            return Err(AttestError::Service {
                code: status.as_u16(),
            });
        }

        let value: Value = response
            .json()
            .await
            .map_err(|err| AttestError::Transport(err.to_string()))?;
        debug!("attestation response received");
        value
            .get("signedAttestation")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or(AttestError::MalformedToken)
    }
}
