//! API environments.
//!
//! An environment is a deployment of the Littlepay API with its own base
//! URL, API version and participant credentials.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Littlepay API environment.
///
/// # Example
///
/// ```
/// use littlepay_rs::ApiEnvironment;
///
/// let env = ApiEnvironment::qa();
/// assert_eq!(env.api_base_url(), "https://api.qa.littlepay.com/api/v1");
/// assert_eq!(
///     env.endpoint(["concession_groups", "1234"]),
///     "https://api.qa.littlepay.com/api/v1/concession_groups/1234"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEnvironment {
    /// Short name used to select the environment (e.g. `qa`)
    pub name: String,
    /// Scheme and host, without the `/api/{version}` suffix
    pub url: String,
    /// API version path segment (e.g. `v1`)
    pub version: String,
}

impl ApiEnvironment {
    /// Name of the production environment.
    pub const PRODUCTION: &'static str = "prod";
    /// Name of the QA environment.
    pub const QA: &'static str = "qa";

    /// Create an environment from its parts.
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            version: version.into(),
        }
    }

    /// The production environment.
    pub fn production() -> Self {
        Self::new(Self::PRODUCTION, "https://api.littlepay.com", "v1")
    }

    /// The QA environment.
    pub fn qa() -> Self {
        Self::new(Self::QA, "https://api.qa.littlepay.com", "v1")
    }

    /// Base URL all endpoints hang off: `{url}/api/{version}`.
    pub fn api_base_url(&self) -> String {
        format!(
            "{}/api/{}",
            self.url.trim_end_matches('/'),
            self.version.trim_matches('/')
        )
    }

    /// Build a complete endpoint URL from path parts. Empty parts are skipped.
    pub fn endpoint<I, S>(&self, parts: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut url = self.api_base_url();
        for part in parts {
            let part = part.as_ref().trim_matches('/');
            if !part.is_empty() {
                url.push('/');
                url.push_str(part);
            }
        }
        url
    }

    /// The OAuth2 token endpoint for this environment.
    pub fn token_endpoint(&self) -> String {
        self.endpoint(["oauth", "token"])
    }

    /// Returns `true` if this is the production environment.
    pub fn is_production(&self) -> bool {
        self.name == Self::PRODUCTION
    }
}

impl fmt::Display for ApiEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
