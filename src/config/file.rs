//! On-disk shape of the config file.

use std::collections::BTreeMap;

use chrono::DateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::auth::AccessToken;
use crate::ApiEnvironment;

/// The whole YAML document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// The selected environment and participant
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: ActiveSelection,
    /// Known environments by name
    #[serde(default = "default_envs", deserialize_with = "null_as_default")]
    pub envs: BTreeMap<String, EnvEntry>,
    /// Participant settings, by participant id then environment name
    #[serde(default, deserialize_with = "null_as_default")]
    pub participants: BTreeMap<String, BTreeMap<String, ParticipantEnv>>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            active: ActiveSelection::default(),
            envs: default_envs(),
            participants: BTreeMap::new(),
        }
    }
}

/// The active environment/participant pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSelection {
    /// Active environment name
    #[serde(default = "default_env_name")]
    pub env: String,
    /// Active participant id, empty when none is selected
    #[serde(default, deserialize_with = "null_as_default")]
    pub participant: String,
}

impl Default for ActiveSelection {
    fn default() -> Self {
        Self {
            env: default_env_name(),
            participant: String::new(),
        }
    }
}

/// Location of one API environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvEntry {
    /// Scheme and host
    pub url: String,
    /// API version segment
    pub version: String,
}

impl EnvEntry {
    pub(crate) fn to_environment(&self, name: &str) -> ApiEnvironment {
        ApiEnvironment::new(name, &self.url, &self.version)
    }
}

/// A participant's settings for one environment.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParticipantEnv {
    /// Token audience
    #[serde(default, deserialize_with = "null_as_default")]
    pub audience: String,
    /// OAuth2 client id
    #[serde(default, deserialize_with = "null_as_default")]
    pub client_id: String,
    /// OAuth2 client secret
    #[serde(default, deserialize_with = "null_as_default")]
    pub client_secret: String,
    /// Last token acquired for this participant and environment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<StoredToken>,
}

/// A persisted access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredToken {
    /// Token value
    pub access_token: String,
    /// Token type
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime in seconds at acquisition
    pub expires_in: i64,
    /// Absolute expiry, unix seconds
    pub expires_at: i64,
    /// Granted scope
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl StoredToken {
    /// Capture a token for persisting.
    pub fn from_token(token: &AccessToken) -> Self {
        Self {
            access_token: token.secret().to_string(),
            token_type: token.token_type().to_string(),
            expires_in: token.expires_in(),
            expires_at: token.expires_at().timestamp(),
            scope: token.scope().map(String::from),
        }
    }

    /// Rebuild the token. `None` if the stored expiry is out of range.
    pub fn to_token(&self) -> Option<AccessToken> {
        let expires_at = DateTime::from_timestamp(self.expires_at, 0)?;
        Some(
            AccessToken::new(
                self.access_token.clone(),
                self.token_type.clone(),
                self.expires_in,
                expires_at,
            )
            .with_scope(self.scope.clone()),
        )
    }
}

fn default_env_name() -> String {
    ApiEnvironment::QA.to_string()
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

fn default_envs() -> BTreeMap<String, EnvEntry> {
    [ApiEnvironment::production(), ApiEnvironment::qa()]
        .into_iter()
        .map(|env| {
            let entry = EnvEntry {
                url: env.url,
                version: env.version,
            };
            (env.name, entry)
        })
        .collect()
}

/// YAML keys left empty (`participants:`) read as `null`; treat them as absent.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
