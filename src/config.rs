use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Address the server binds to
    #[serde(default = "default_listen")]
    pub listen: String,
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// REST backend the dashboard talks to; defaults to this server
    #[serde(default)]
    pub backend_url: Option<String>,
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

fn default_listen() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_database_url() -> String {
    "sqlite:startpage.db?mode=rwc".to_string()
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    #[serde(default = "default_relay_endpoint")]
    pub endpoint: String,
    /// Query parameter carrying the target feed URL
    #[serde(default = "default_relay_param")]
    pub param: String,
}

fn default_relay_endpoint() -> String {
    "https://api.allorigins.win/raw".to_string()
}

fn default_relay_param() -> String {
    "url".to_string()
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            endpoint: default_relay_endpoint(),
            param: default_relay_param(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct NotificationConfig {
    #[serde(default = "default_visible_secs")]
    pub visible_secs: u64,
    #[serde(default = "default_fade_millis")]
    pub fade_millis: u64,
}

fn default_visible_secs() -> u64 {
    3
}

fn default_fade_millis() -> u64 {
    300
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            visible_secs: default_visible_secs(),
            fade_millis: default_fade_millis(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            database_url: default_database_url(),
            backend_url: None,
            relay: RelayConfig::default(),
            notifications: NotificationConfig::default(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a TOML string (useful for testing)
    pub fn from_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    pub fn backend_url(&self) -> String {
        self.backend_url
            .clone()
            .unwrap_or_else(|| format!("http://{}", self.listen))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.listen, "127.0.0.1:5000");
        assert_eq!(config.database_url, "sqlite:startpage.db?mode=rwc");
        assert_eq!(config.relay.endpoint, "https://api.allorigins.win/raw");
        assert_eq!(config.relay.param, "url");
        assert_eq!(config.notifications.visible_secs, 3);
        assert_eq!(config.notifications.fade_millis, 300);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.listen, default_listen());
        assert_eq!(config.relay, RelayConfig::default());
        assert_eq!(config.notifications, NotificationConfig::default());
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
            listen = "0.0.0.0:8080"
            database_url = "sqlite::memory:"
            backend_url = "http://backend.local:9000"

            [relay]
            endpoint = "https://relay.example.com/get"
            param = "target"

            [notifications]
            visible_secs = 5
            fade_millis = 100
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();

        assert_eq!(config.listen, "0.0.0.0:8080");
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.backend_url(), "http://backend.local:9000");
        assert_eq!(config.relay.endpoint, "https://relay.example.com/get");
        assert_eq!(config.relay.param, "target");
        assert_eq!(config.notifications.visible_secs, 5);
        assert_eq!(config.notifications.fade_millis, 100);
    }

    #[test]
    fn test_partial_relay_section() {
        let content = r#"
            [relay]
            endpoint = "https://relay.example.com/get"
        "#;

        let config = Config::from_str(content).unwrap();
        assert_eq!(config.relay.endpoint, "https://relay.example.com/get");
        assert_eq!(config.relay.param, "url");
    }

    #[test]
    fn test_backend_url_defaults_to_listen_address() {
        let config = Config::from_str(r#"listen = "127.0.0.1:7000""#).unwrap();
        assert_eq!(config.backend_url(), "http://127.0.0.1:7000");
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = Config::load("/nonexistent/path/startpage.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default("/nonexistent/path/startpage.toml").unwrap();
        assert_eq!(config.listen, default_listen());
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let content = "this is not valid toml {{{";

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();

        assert!(Config::load(temp_file.path()).is_err());
        assert!(Config::load_or_default(temp_file.path()).is_err());
    }

    #[test]
    fn test_wrong_field_type() {
        let result = Config::from_str("[notifications]\nvisible_secs = \"three\"");
        assert!(result.is_err());
    }
}
