//! Client configuration.

use config::{Config as ConfigLoader, ConfigError, Environment};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the backend, without the `/api` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}
fn default_timeout() -> u64 {
    30
}

impl ClientConfig {
    /// Load from `USER_DIRECTORY_CLIENT__BASE_URL` / `USER_DIRECTORY_CLIENT__TIMEOUT_SECS`.
    pub fn load() -> Result<Self, ConfigError> {
        ConfigLoader::builder()
            .set_default("base_url", default_base_url())?
            .set_default("timeout_secs", default_timeout() as i64)?
            .add_source(
                Environment::with_prefix("USER_DIRECTORY_CLIENT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
