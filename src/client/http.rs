//! HTTP client implementation for the Littlepay API.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::{
    CardTokenizationService, FundingSourcesService, GroupsService, ProductsService,
};
use crate::auth::{AccessToken, Credentials, TokenManager};
use crate::models::tolerant;
use crate::{ApiEnvironment, Error, Result};

use super::config::ClientConfig;

/// The main client for interacting with the Littlepay API.
///
/// This client provides access to all API services through method calls
/// that return service structs. Every request carries a valid access token;
/// the client acquires and refreshes it on demand.
///
/// # Example
///
/// ```no_run
/// use futures_util::TryStreamExt;
/// use littlepay_rs::{ApiEnvironment, ClientConfig, Credentials, LittlepayClient};
///
/// # async fn example() -> littlepay_rs::Result<()> {
/// let client = LittlepayClient::new(
///     ApiEnvironment::qa(),
///     Credentials::new("client-id", "client-secret", "audience"),
///     ClientConfig::default(),
/// )?;
///
/// // Use the groups service
/// let groups: Vec<_> = client.groups().list().try_collect().await?;
///
/// // Products linked to the first group
/// if let Some(group) = groups.first() {
///     let products: Vec<_> = client.groups().products(&group.id).try_collect().await?;
///     println!("{} has {} products", group.label, products.len());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct LittlepayClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) env: ApiEnvironment,
    pub(crate) tokens: TokenManager,
    pub(crate) config: ClientConfig,
}

impl LittlepayClient {
    /// Create a new client that acquires its first token on demand.
    pub fn new(env: ApiEnvironment, credentials: Credentials, config: ClientConfig) -> Result<Self> {
        Self::with_token(env, credentials, None, config)
    }

    /// Create a new client seeded with a previously acquired token.
    ///
    /// A token that is no longer valid is discarded and replaced on the first
    /// request.
    pub fn with_token(
        env: ApiEnvironment,
        credentials: Credentials,
        token: Option<AccessToken>,
        config: ClientConfig,
    ) -> Result<Self> {
        url::Url::parse(&env.api_base_url())?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let tokens = TokenManager::with_token(
            http.clone(),
            &env,
            credentials,
            config.refresh_margin(),
            token,
        );

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                env,
                tokens,
                config,
            }),
        })
    }

    /// Get the concession groups service.
    pub fn groups(&self) -> GroupsService {
        GroupsService::new(self.inner.clone())
    }

    /// Get the products service.
    pub fn products(&self) -> ProductsService {
        ProductsService::new(self.inner.clone())
    }

    /// Get the funding sources service.
    pub fn funding_sources(&self) -> FundingSourcesService {
        FundingSourcesService::new(self.inner.clone())
    }

    /// Get the card tokenization service.
    pub fn card_tokenization(&self) -> CardTokenizationService {
        CardTokenizationService::new(self.inner.clone())
    }

    /// Return a valid access token, acquiring or refreshing it if needed.
    pub async fn access_token(&self) -> Result<AccessToken> {
        self.inner.tokens.get_token().await
    }

    /// Get a reference to the token manager.
    pub fn token_manager(&self) -> &TokenManager {
        &self.inner.tokens
    }

    /// The environment this client talks to.
    pub fn environment(&self) -> &ApiEnvironment {
        &self.inner.env
    }
}

impl ClientInner {
    /// Complete URL for a resource path relative to the API base.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        self.env.endpoint(path.split('/'))
    }

    /// Build request headers with authentication.
    pub(crate) async fn build_headers(&self) -> Result<HeaderMap> {
        let token = self.tokens.get_token().await?;

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(token.authorization_value())
                .map_err(|_| Error::InvalidInput("Invalid token format".to_string()))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(headers)
    }

    /// GET a single record, decoded tolerantly.
    pub(crate) async fn get_record<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned + Serialize,
    {
        let url = self.endpoint(path);
        tracing::debug!(%url, "GET");
        let headers = self.build_headers().await?;

        let response = self.http.get(&url).headers(headers).send().await?;
        let body = Self::handle_response(response).await?;

        tolerant::from_value(body)
    }

    /// Make a GET request with query parameters.
    pub(crate) async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T> {
        let url = self.endpoint(path);
        tracing::debug!(%url, "GET");
        let headers = self.build_headers().await?;

        let response = self
            .http
            .get(&url)
            .headers(headers)
            .query(query)
            .send()
            .await?;
        let body = Self::handle_response(response).await?;

        Ok(serde_json::from_value(body)?)
    }

    /// Make a POST request, with or without a JSON body.
    pub(crate) async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value> {
        let url = self.endpoint(path);
        tracing::debug!(%url, "POST");
        let headers = self.build_headers().await?;

        let mut request = self.http.post(&url).headers(headers);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        Self::handle_mutation(response).await
    }

    /// Make a PUT request.
    pub(crate) async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        let url = self.endpoint(path);
        tracing::debug!(%url, "PUT");
        let headers = self.build_headers().await?;

        let response = self.http.put(&url).headers(headers).json(body).send().await?;
        Self::handle_mutation(response).await
    }

    /// Make a DELETE request. Returns `true` once the server accepted it.
    pub(crate) async fn delete(&self, path: &str) -> Result<bool> {
        let url = self.endpoint(path);
        tracing::debug!(%url, "DELETE");
        let headers = self.build_headers().await?;

        let response = self.http.delete(&url).headers(headers).send().await?;
        Self::handle_response(response).await?;
        Ok(true)
    }

    /// Mutation responses: the decoded body, or `{"status_code": N}` when the
    /// server sent none.
    async fn handle_mutation(response: reqwest::Response) -> Result<Value> {
        let status = response.status().as_u16();
        let body = Self::handle_response(response).await?;

        if body.is_null() {
            Ok(json!({ "status_code": status }))
        } else {
            Ok(body)
        }
    }

    /// Handle an API response.
    ///
    /// Success bodies are returned as JSON (`Null` when empty). Any non-2xx
    /// status becomes [`Error::Api`], with the body kept for inspection.
    async fn handle_response(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        let text = response.text().await?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else if status.is_success() {
            serde_json::from_str(&text)?
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        if status.is_success() {
            Ok(body)
        } else {
            tracing::debug!(status = status.as_u16(), "API request failed");
            Err(Error::from_api_response(status.as_u16(), body))
        }
    }
}

impl std::fmt::Debug for LittlepayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LittlepayClient")
            .field("environment", &self.inner.env.name)
            .field("config", &self.inner.config)
            .finish()
    }
}
