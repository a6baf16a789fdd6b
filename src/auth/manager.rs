//! Token lifecycle for one participant in one environment.

use chrono::{Duration, Utc};
use reqwest::header::ACCEPT;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::credentials::Credentials;
use super::token::{AccessToken, TokenResponse, TokenState};
use crate::{ApiEnvironment, Error, Result};

/// Acquires, caches and refreshes the access token for one credential set.
///
/// The manager never hands out a token that is within `margin` of its
/// expiry. Clones share the same cached token, and refreshes are serialized
/// behind a write lock so concurrent callers cannot race redundant token
/// requests.
///
/// # Example
///
/// ```no_run
/// use chrono::Duration;
/// use littlepay_rs::{ApiEnvironment, Credentials, TokenManager};
///
/// # async fn example() -> littlepay_rs::Result<()> {
/// let manager = TokenManager::new(
///     reqwest::Client::new(),
///     &ApiEnvironment::qa(),
///     Credentials::new("client-id", "client-secret", "audience"),
///     Duration::seconds(60),
/// );
///
/// let token = manager.get_token().await?;
/// println!("expires at {}", token.expires_at());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TokenManager {
    inner: Arc<RwLock<TokenManagerInner>>,
}

struct TokenManagerInner {
    http: reqwest::Client,
    token_endpoint: String,
    credentials: Credentials,
    margin: Duration,
    token: Option<AccessToken>,
}

impl TokenManagerInner {
    fn valid_token(&self) -> Option<&AccessToken> {
        self.token
            .as_ref()
            .filter(|t| t.is_valid_at(Utc::now(), self.margin))
    }
}

impl TokenManager {
    /// Smallest refresh margin a manager will use, in seconds.
    pub const MIN_MARGIN_SECS: i64 = 1;

    /// Create a manager with no token; the first [`get_token`](Self::get_token)
    /// performs a refresh.
    pub fn new(
        http: reqwest::Client,
        env: &ApiEnvironment,
        credentials: Credentials,
        margin: Duration,
    ) -> Self {
        Self::with_token(http, env, credentials, margin, None)
    }

    /// Create a manager seeded with a previously acquired token.
    ///
    /// A seed that is already past `expiry - margin` is discarded, leaving
    /// the manager in [`TokenState::NoToken`]. Margins under one second are
    /// raised to one second.
    pub fn with_token(
        http: reqwest::Client,
        env: &ApiEnvironment,
        credentials: Credentials,
        margin: Duration,
        token: Option<AccessToken>,
    ) -> Self {
        let margin = margin.max(Duration::seconds(Self::MIN_MARGIN_SECS));
        let token = token.filter(|t| t.is_valid_at(Utc::now(), margin));

        Self {
            inner: Arc::new(RwLock::new(TokenManagerInner {
                http,
                token_endpoint: env.token_endpoint(),
                credentials,
                margin,
                token,
            })),
        }
    }

    /// Return a currently valid token, refreshing first if needed.
    pub async fn get_token(&self) -> Result<AccessToken> {
        if let Some(token) = self.inner.read().await.valid_token() {
            tracing::debug!("Using cached access token");
            return Ok(token.clone());
        }

        let mut inner = self.inner.write().await;

        // Another caller may have refreshed while we waited for the lock.
        if let Some(token) = inner.valid_token() {
            return Ok(token.clone());
        }

        let token = Self::request_token(&inner).await?;
        inner.token = Some(token.clone());
        Ok(token)
    }

    /// Request a new token unconditionally and cache it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] if the token endpoint responds with
    /// a non-success status.
    pub async fn refresh(&self) -> Result<AccessToken> {
        let mut inner = self.inner.write().await;
        let token = Self::request_token(&inner).await?;
        inner.token = Some(token.clone());
        Ok(token)
    }

    /// Where the manager is in its lifecycle right now.
    pub async fn state(&self) -> TokenState {
        let inner = self.inner.read().await;
        TokenState::of(inner.token.as_ref(), Utc::now(), inner.margin)
    }

    /// The cached token, valid or not, without refreshing.
    pub async fn current_token(&self) -> Option<AccessToken> {
        self.inner.read().await.token.clone()
    }

    /// The endpoint tokens are requested from.
    pub async fn token_endpoint(&self) -> String {
        self.inner.read().await.token_endpoint.clone()
    }

    async fn request_token(inner: &TokenManagerInner) -> Result<AccessToken> {
        tracing::info!(
            endpoint = %inner.token_endpoint,
            client_id = %inner.credentials.client_id(),
            "Requesting access token"
        );

        let acquired_at = Utc::now();
        let response = inner
            .http
            .post(&inner.token_endpoint)
            .header(ACCEPT, "application/json")
            .json(&inner.credentials.token_request())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Authentication(format!(
                "Token request failed ({}): {}",
                status, body
            )));
        }

        let token_response: TokenResponse = response.json().await?;
        let token = AccessToken::from_response(token_response, acquired_at)?;
        tracing::debug!(expires_at = %token.expires_at(), "Access token acquired");
        Ok(token)
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn env_for(server: &MockServer) -> ApiEnvironment {
        ApiEnvironment::new("test", server.uri(), "v1")
    }

    fn credentials() -> Credentials {
        Credentials::new("client_id", "client_secret", "audience")
    }

    fn token_body() -> serde_json::Value {
        json!({
            "access_token": "token123",
            "token_type": "Bearer",
            "expires_in": 300
        })
    }

    async fn mount_token_endpoint(server: &MockServer, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path("/api/v1/oauth/token"))
            .and(header("content-type", "application/json"))
            .and(header("accept", "application/json"))
            .and(body_json(json!({
                "audience": "audience",
                "client_id": "client_id",
                "client_secret": "client_secret",
                "grant_type": "client_credentials"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
            .expect(expected_calls)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_get_token_twice_refreshes_once() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server, 1).await;

        let manager = TokenManager::new(
            reqwest::Client::new(),
            &env_for(&server),
            credentials(),
            Duration::seconds(1),
        );
        assert_eq!(manager.state().await, TokenState::NoToken);

        let first = manager.get_token().await.unwrap();
        let second = manager.get_token().await.unwrap();

        assert_eq!(first.secret(), "token123");
        assert!(first.same_as(&second));
        assert_eq!(manager.state().await, TokenState::Valid);
    }

    #[tokio::test]
    async fn test_expired_seed_is_refreshed_once() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server, 1).await;

        let stale = AccessToken::new("old", "Bearer", 300, Utc::now() - Duration::seconds(10));
        let manager = TokenManager::with_token(
            reqwest::Client::new(),
            &env_for(&server),
            credentials(),
            Duration::seconds(1),
            Some(stale),
        );
        assert_eq!(manager.state().await, TokenState::NoToken);

        let token = manager.get_token().await.unwrap();
        assert_eq!(token.secret(), "token123");
    }

    #[tokio::test]
    async fn test_valid_seed_is_reused() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server, 0).await;

        let seed = AccessToken::new("seeded", "Bearer", 300, Utc::now() + Duration::seconds(300));
        let manager = TokenManager::with_token(
            reqwest::Client::new(),
            &env_for(&server),
            credentials(),
            Duration::seconds(1),
            Some(seed),
        );

        let token = manager.get_token().await.unwrap();
        assert_eq!(token.secret(), "seeded");
    }

    #[tokio::test]
    async fn test_zero_margin_is_raised_to_one_second() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server, 1).await;

        // Half a second from expiry: valid with no margin, inside a 1s margin.
        let seed = AccessToken::new(
            "seeded",
            "Bearer",
            300,
            Utc::now() + Duration::milliseconds(500),
        );
        let manager = TokenManager::with_token(
            reqwest::Client::new(),
            &env_for(&server),
            credentials(),
            Duration::zero(),
            Some(seed),
        );
        assert_eq!(manager.state().await, TokenState::NoToken);

        let token = manager.get_token().await.unwrap();
        assert_eq!(token.secret(), "token123");
    }

    #[tokio::test]
    async fn test_huge_lifetime_is_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/oauth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "token123",
                "expires_in": i64::MAX
            })))
            .mount(&server)
            .await;

        let manager = TokenManager::new(
            reqwest::Client::new(),
            &env_for(&server),
            credentials(),
            Duration::seconds(1),
        );

        let err = manager.get_token().await.unwrap_err();
        assert!(err.is_auth_error(), "Expected auth error, got {:?}", err);
        assert_eq!(manager.state().await, TokenState::NoToken);
    }

    #[tokio::test]
    async fn test_token_inside_margin_is_refreshed() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server, 1).await;

        let seed = AccessToken::new("seeded", "Bearer", 300, Utc::now() + Duration::seconds(30));
        let manager = TokenManager::with_token(
            reqwest::Client::new(),
            &env_for(&server),
            credentials(),
            Duration::seconds(60),
            Some(seed),
        );

        let token = manager.get_token().await.unwrap();
        assert_eq!(token.secret(), "token123");
    }

    #[tokio::test]
    async fn test_refresh_forces_request() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server, 2).await;

        let manager = TokenManager::new(
            reqwest::Client::new(),
            &env_for(&server),
            credentials(),
            Duration::seconds(1),
        );

        manager.get_token().await.unwrap();
        manager.refresh().await.unwrap();
        assert!(manager.current_token().await.is_some());
    }

    #[tokio::test]
    async fn test_rejected_credentials_are_authentication_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/oauth/token"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "error": "access_denied" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let manager = TokenManager::new(
            reqwest::Client::new(),
            &env_for(&server),
            credentials(),
            Duration::seconds(1),
        );

        let err = manager.get_token().await.unwrap_err();
        assert!(err.is_auth_error());
        assert!(err.to_string().contains("401"));
        assert_eq!(manager.state().await, TokenState::NoToken);
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_refresh() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server, 1).await;

        let manager = TokenManager::new(
            reqwest::Client::new(),
            &env_for(&server),
            credentials(),
            Duration::seconds(1),
        );

        let shared = manager.clone();
        let (a, b, c) = tokio::join!(
            manager.get_token(),
            shared.get_token(),
            manager.get_token()
        );
        assert!(a.is_ok() && b.is_ok() && c.is_ok());
    }
}
