//! Access tokens and their validity.

use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::{Error, Result};

/// Where a token manager stands in its lifecycle.
///
/// `NoToken -> Valid -> Expired -> Valid -> ...`; a refresh is the only
/// way out of `NoToken` or `Expired`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    /// No token has been acquired (or the supplied one was unusable)
    NoToken,
    /// A token is held and usable
    Valid,
    /// A token is held but within the safety margin of its expiry, or past it
    Expired,
}

impl TokenState {
    /// Classify an optional token at `now`.
    pub fn of(token: Option<&AccessToken>, now: DateTime<Utc>, margin: Duration) -> Self {
        match token {
            None => TokenState::NoToken,
            Some(t) if t.is_valid_at(now, margin) => TokenState::Valid,
            Some(_) => TokenState::Expired,
        }
    }
}

/// An OAuth2 access token with its absolute expiry.
#[derive(Clone)]
pub struct AccessToken {
    value: SecretString,
    token_type: String,
    expires_in: i64,
    expires_at: DateTime<Utc>,
    scope: Option<String>,
}

impl AccessToken {
    /// Create a token from its parts.
    pub fn new(
        value: impl Into<String>,
        token_type: impl Into<String>,
        expires_in: i64,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            value: SecretString::from(value.into()),
            token_type: token_type.into(),
            expires_in,
            expires_at,
            scope: None,
        }
    }

    /// Attach the granted scope.
    pub fn with_scope(mut self, scope: Option<String>) -> Self {
        self.scope = scope;
        self
    }

    /// Build a token from a token endpoint response received at `acquired_at`.
    ///
    /// A server-supplied `expires_at` wins; otherwise it is
    /// `acquired_at + expires_in`. A lifetime that does not fit a datetime
    /// is rejected.
    pub(crate) fn from_response(response: TokenResponse, acquired_at: DateTime<Utc>) -> Result<Self> {
        let server_expiry = response
            .expires_at
            .and_then(|secs| DateTime::from_timestamp(secs as i64, 0));

        let expires_at = match server_expiry {
            Some(expires_at) => expires_at,
            None => Duration::try_seconds(response.expires_in)
                .and_then(|lifetime| acquired_at.checked_add_signed(lifetime))
                .ok_or_else(|| {
                    Error::Authentication(format!(
                        "Token lifetime out of range: expires_in={}",
                        response.expires_in
                    ))
                })?,
        };

        Ok(Self::new(
            response.access_token,
            response.token_type,
            response.expires_in,
            expires_at,
        )
        .with_scope(response.scope))
    }

    /// The raw token value.
    pub fn secret(&self) -> &str {
        self.value.expose_secret()
    }

    /// The token type reported by the server (usually `Bearer`).
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Lifetime in seconds as reported by the server.
    pub fn expires_in(&self) -> i64 {
        self.expires_in
    }

    /// Absolute expiry.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Granted scope, if the server reported one.
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Whether the token can still be used at `now`, keeping `margin` in
    /// reserve before the expiry boundary.
    pub fn is_valid_at(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        self.expires_at
            .checked_sub_signed(margin)
            .is_some_and(|limit| now <= limit)
    }

    /// Whether the token is past its expiry right now.
    pub fn is_expired(&self) -> bool {
        !self.is_valid_at(Utc::now(), Duration::zero())
    }

    /// Value for the `Authorization` header: the bare token, never
    /// prefixed with a `Bearer ` scheme word.
    pub fn authorization_value(&self) -> &str {
        let token = self.secret().trim();
        match token.get(..7) {
            Some(prefix) if prefix.eq_ignore_ascii_case("bearer ") => token[7..].trim_start(),
            _ => token,
        }
    }

    /// Whether two tokens carry the same value and expiry.
    pub fn same_as(&self, other: &AccessToken) -> bool {
        self.secret() == other.secret() && self.expires_at == other.expires_at
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("expires_at", &self.expires_at)
            .field("scope", &self.scope)
            .finish()
    }
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub(crate) access_token: String,
    #[serde(default = "default_token_type")]
    pub(crate) token_type: String,
    pub(crate) expires_in: i64,
    #[serde(default)]
    pub(crate) expires_at: Option<f64>,
    #[serde(default)]
    pub(crate) scope: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn response(expires_in: i64) -> TokenResponse {
        serde_json::from_value(serde_json::json!({
            "access_token": "token123",
            "expires_in": expires_in
        }))
        .unwrap()
    }

    #[test]
    fn test_expiry_boundary_with_one_second_margin() {
        let token = AccessToken::from_response(response(300), at(100)).unwrap();
        let margin = Duration::seconds(1);

        assert_eq!(token.expires_at(), at(400));
        assert!(token.is_valid_at(at(399), margin));
        assert!(!token.is_valid_at(at(400), margin));
    }

    #[test]
    fn test_server_expires_at_wins() {
        let mut raw = response(300);
        raw.expires_at = Some(1_000.0);

        let token = AccessToken::from_response(raw, at(100)).unwrap();
        assert_eq!(token.expires_at(), at(1_000));
        assert_eq!(token.expires_in(), 300);
        assert_eq!(token.token_type(), "Bearer");
    }

    #[test]
    fn test_out_of_range_lifetime_is_auth_error() {
        let err = AccessToken::from_response(response(i64::MAX), Utc::now()).unwrap_err();
        assert!(err.is_auth_error());

        let err = AccessToken::from_response(response(i64::MAX / 2_000), at(100)).unwrap_err();
        assert!(err.is_auth_error());
    }

    #[test]
    fn test_huge_margin_is_never_valid() {
        let token = AccessToken::from_response(response(300), at(100)).unwrap();
        assert!(!token.is_valid_at(at(100), Duration::MAX));
    }

    #[test]
    fn test_state_machine() {
        let margin = Duration::seconds(1);
        let token = AccessToken::from_response(response(300), at(100)).unwrap();

        assert_eq!(TokenState::of(None, at(100), margin), TokenState::NoToken);
        assert_eq!(TokenState::of(Some(&token), at(200), margin), TokenState::Valid);
        assert_eq!(TokenState::of(Some(&token), at(400), margin), TokenState::Expired);
    }

    #[test]
    fn test_authorization_value_never_has_bearer() {
        let plain = AccessToken::new("token123", "Bearer", 300, at(400));
        assert_eq!(plain.authorization_value(), "token123");

        let prefixed = AccessToken::new("Bearer token123", "Bearer", 300, at(400));
        assert_eq!(prefixed.authorization_value(), "token123");

        let lower = AccessToken::new("bearer  token123", "Bearer", 300, at(400));
        assert_eq!(lower.authorization_value(), "token123");
    }

    #[test]
    fn test_debug_redacts_token() {
        let token = AccessToken::new("super-secret-token", "Bearer", 300, at(400));
        let debug_str = format!("{:?}", token);
        assert!(!debug_str.contains("super-secret-token"));
        assert!(debug_str.contains("REDACTED"));
    }
}
