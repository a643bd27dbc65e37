//! Client configuration
//!
//! Built once per client and passed by reference; nothing here is mutated
//! after construction.

use std::path::PathBuf;

pub const API_BASE_URL: &str = "https://api.scryfall.com";
pub const DEFAULT_APP_NAME: &str = "ScryfallSync";
pub const DEFAULT_ACCEPT: &str = "application/json;q=0.9,*/*;q=0.8";

/// Request settings for a [`ScryfallClient`](crate::client::ScryfallClient)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without trailing slash
    pub api_url: String,
    /// Scryfall asks for `{AppName}/1.0`
    pub user_agent: String,
    pub accept: String,
}

impl ClientConfig {
    /// Defaults for the public API with a user agent derived from `app_name`
    pub fn for_app(app_name: &str) -> Self {
        Self {
            api_url: API_BASE_URL.to_string(),
            user_agent: user_agent_for(app_name),
            accept: DEFAULT_ACCEPT.to_string(),
        }
    }

    /// Same configuration pointed at another base URL
    pub fn with_api_url(self, api_url: &str) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            ..self
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_app(DEFAULT_APP_NAME)
    }
}

fn user_agent_for(app_name: &str) -> String {
    format!("{}/1.0", app_name.trim())
}

/// Returns the default database path: ~/.local/share/scryfall_sync/scryfall.db
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scryfall_sync")
        .join("scryfall.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent_uses_trimmed_app_name() {
        let config = ClientConfig::for_app("  MagicClubDB ");
        assert_eq!(config.user_agent, "MagicClubDB/1.0");
        assert_eq!(config.api_url, API_BASE_URL);
        assert_eq!(config.accept, DEFAULT_ACCEPT);
    }

    #[test]
    fn configs_are_independent_values() {
        let first = ClientConfig::for_app("First");
        let second = ClientConfig::for_app("Second");
        assert_eq!(first.user_agent, "First/1.0");
        assert_eq!(second.user_agent, "Second/1.0");
        assert_eq!(ClientConfig::default().user_agent, "ScryfallSync/1.0");
    }

    #[test]
    fn with_api_url_strips_trailing_slash() {
        let config = ClientConfig::for_app("Test").with_api_url("http://127.0.0.1:8080/");
        assert_eq!(config.api_url, "http://127.0.0.1:8080");
        assert_eq!(config.user_agent, "Test/1.0");
    }

    #[test]
    fn default_db_path_ends_with_file_name() {
        let path = default_db_path();
        assert!(path.ends_with("scryfall_sync/scryfall.db"));
    }
}
