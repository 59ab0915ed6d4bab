//! OAuth 1.0a credential types and helpers.
//!
//! The flow: the service grants temporary credentials, the user approves
//! them at the authorization URL, and the verifier delivered to the callback
//! is exchanged for permanent access credentials. Requests use the PLAINTEXT
//! signature method over TLS; credential responses come back form-urlencoded.

use serde::Deserialize;

use crate::error::{ClientError, ClientResult};

/// Temporary credentials plus the URL the user must visit to approve them.
#[derive(Debug, Clone)]
pub struct TemporaryCredentials {
    pub token: String,
    pub secret: String,
    pub authorize_url: String,
}

/// Permanent access credentials.
#[derive(Debug, Clone)]
pub struct AccessCredentials {
    pub token: String,
    pub secret: String,
}

#[derive(Deserialize)]
struct CredentialResponse {
    oauth_token: String,
    oauth_token_secret: String,
}

/// PLAINTEXT signature: the consumer secret and token secret joined by `&`.
/// The token secret is empty on the temporary-credential request.
pub(crate) fn plaintext_signature(consumer_secret: &str, token_secret: &str) -> String {
    format!("{}&{}", consumer_secret, token_secret)
}

/// Parse a form-urlencoded credential response into (token, secret).
pub(crate) fn parse_credentials(body: &str) -> ClientResult<(String, String)> {
    let parsed: CredentialResponse =
        serde_urlencoded::from_str(body).map_err(|e| ClientError::Credentials(e.to_string()))?;
    Ok((parsed.oauth_token, parsed.oauth_token_secret))
}

/// URL the user visits to approve a temporary token.
pub(crate) fn authorize_url(base_url: &str, token: &str) -> String {
    format!("{}/OAuth.action?oauth_token={}", base_url, token)
}
