//! Client credentials for one participant in one environment.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

/// OAuth2 client-credentials for a participant/environment pair.
///
/// Immutable once built; the secret is redacted from `Debug` output.
#[derive(Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: SecretString,
    audience: String,
}

impl Credentials {
    /// The only grant type the Littlepay token endpoint accepts.
    pub const GRANT_TYPE: &'static str = "client_credentials";

    /// Create a credential set.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
            audience: audience.into(),
        }
    }

    /// The OAuth2 client ID.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The token audience.
    pub fn audience(&self) -> &str {
        &self.audience
    }

    /// Returns `true` when every field is non-blank.
    pub fn is_complete(&self) -> bool {
        !self.client_id.trim().is_empty()
            && !self.client_secret.expose_secret().trim().is_empty()
            && !self.audience.trim().is_empty()
    }

    /// JSON body for the token endpoint.
    pub(crate) fn token_request(&self) -> TokenRequest<'_> {
        TokenRequest {
            audience: &self.audience,
            client_id: &self.client_id,
            client_secret: self.client_secret.expose_secret(),
            grant_type: Self::GRANT_TYPE,
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("audience", &self.audience)
            .finish()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct TokenRequest<'a> {
    audience: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    grant_type: &'static str,
}
