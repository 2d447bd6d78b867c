// Client configuration loaded from environment variables.
// Decision: RENTHUB_ prefix for all client config
// Decision: Defaults point at a local user service for development

use std::path::PathBuf;

/// Configuration for the auth client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the user service
    pub api_base_url: String,
    /// Location of the persisted bearer token
    pub credentials_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            credentials_path: default_credentials_path(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let api_base_url = std::env::var("RENTHUB_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string());

        let credentials_path = std::env::var("RENTHUB_CREDENTIALS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_credentials_path());

        Self {
            api_base_url,
            credentials_path,
        }
    }
}

/// Default token location under the user's home directory
fn default_credentials_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".renthub")
        .join("token")
}
