//! Configuration management for portfolio-qa
//!
//! Settings come from an optional TOML file, then from the process
//! environment. The provider credential is only ever read from the
//! environment, never from the file.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::str::FromStr;

/// Environment variable that overrides `server.port`
pub const PORT_ENV: &str = "PORT";

/// Upper bound for the provider request timeout
const MAX_REQUEST_TIMEOUT_SECONDS: u64 = 3600;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Address to bind, from `host` and `port`
    ///
    /// `host` must be a literal IP address; hostnames such as `localhost`
    /// are rejected rather than guessed at.
    pub fn socket_addr(&self) -> AppResult<SocketAddr> {
        let ip: IpAddr = self.host.trim().parse().map_err(|_| {
            AppError::Config(format!(
                "server.host '{}' must be an IP address such as 127.0.0.1 or 0.0.0.0",
                self.host
            ))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Provider API key
///
/// Debug output is redacted so the key never reaches the logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a raw key, treating empty or whitespace-only values as unset
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Completion provider configuration
///
/// Fields are private; values are validated by [`Config::validate`] and read
/// through accessors.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    #[serde(default = "default_model")]
    model: String,
    #[serde(default = "default_base_url")]
    base_url: String,
    #[serde(default = "default_max_tokens")]
    max_tokens: u32,
    #[serde(default = "default_temperature")]
    temperature: f64,
    #[serde(default = "default_request_timeout")]
    request_timeout_seconds: u64,
    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    api_key_env: String,
    #[serde(skip)]
    api_key: Option<ApiKey>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            request_timeout_seconds: default_request_timeout(),
            api_key_env: default_api_key_env(),
            api_key: None,
        }
    }
}

impl ProviderConfig {
    /// Model identifier sent to the provider and echoed as `model_used`
    pub fn model(&self) -> &str {
        &self.model
    }

    /// API base URL, e.g. `https://api.openai.com/v1`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn request_timeout_seconds(&self) -> u64 {
        self.request_timeout_seconds
    }

    pub fn api_key_env(&self) -> &str {
        &self.api_key_env
    }

    /// Credential read from the environment, if any
    pub fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    /// Point the provider at a different base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the credential directly instead of reading the environment
    pub fn with_api_key(mut self, api_key: Option<ApiKey>) -> Self {
        self.api_key = api_key;
        self
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f64 {
    0.7
}

fn default_request_timeout() -> u64 {
    600
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

/// Knowledge document configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KnowledgeConfig {
    #[serde(default = "default_knowledge_path")]
    pub path: String,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            path: default_knowledge_path(),
        }
    }
}

fn default_knowledge_path() -> String {
    "knowledge.txt".to_string()
}

/// Observability configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path_display = path.as_ref().display().to_string();

        let content = std::fs::read_to_string(path.as_ref()).map_err(|source| {
            AppError::ConfigFileRead {
                path: path_display.clone(),
                source,
            }
        })?;

        let config: Self =
            toml::from_str(&content).map_err(|source| AppError::ConfigParseFailed {
                path: path_display.clone(),
                source,
            })?;

        config
            .validate()
            .map_err(|e| AppError::ConfigValidationFailed {
                path: path_display,
                reason: e.to_string(),
            })?;

        Ok(config)
    }

    /// Load configuration for start-up
    ///
    /// An explicit `path` must exist. Without one, `default_path` is used if
    /// present, otherwise the built-in defaults.
    pub fn load<P, D>(path: Option<P>, default_path: D) -> AppResult<Self>
    where
        P: AsRef<Path>,
        D: AsRef<Path>,
    {
        match path {
            Some(path) => Self::from_file(path),
            None if default_path.as_ref().exists() => Self::from_file(default_path),
            None => Ok(Self::default()),
        }
    }

    /// Apply environment overrides using `lookup` to read variables
    ///
    /// `PORT` replaces `server.port`; the variable named by
    /// `provider.api_key_env` supplies the credential.
    pub fn apply_env<F>(&mut self, lookup: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(PORT_ENV) {
            self.server.port = raw.trim().parse().map_err(|_| {
                AppError::Config(format!(
                    "{} must be a port number between 0 and 65535, got '{}'",
                    PORT_ENV, raw
                ))
            })?;
        }

        self.provider.api_key = lookup(&self.provider.api_key_env).and_then(ApiKey::new);
        Ok(())
    }

    /// Apply overrides from the real process environment
    pub fn apply_process_env(&mut self) -> AppResult<()> {
        self.apply_env(|key| std::env::var(key).ok())
    }

    /// Validate configuration after parsing
    ///
    /// Called by `from_file()` and `from_str()`; call it explicitly when
    /// building a `Config` by hand.
    pub fn validate(&self) -> AppResult<()> {
        self.server.socket_addr()?;

        let provider = &self.provider;

        if provider.model.trim().is_empty() {
            return Err(AppError::Config(
                "provider.model must not be empty".to_string(),
            ));
        }

        if !(provider.base_url.starts_with("http://") || provider.base_url.starts_with("https://"))
        {
            return Err(AppError::Config(format!(
                "provider.base_url '{}' must start with http:// or https://",
                provider.base_url
            )));
        }

        if provider.max_tokens == 0 {
            return Err(AppError::Config(
                "provider.max_tokens must be greater than 0".to_string(),
            ));
        }

        if !provider.temperature.is_finite() || !(0.0..=2.0).contains(&provider.temperature) {
            return Err(AppError::Config(format!(
                "provider.temperature must be between 0.0 and 2.0, got {}",
                provider.temperature
            )));
        }

        if provider.request_timeout_seconds == 0
            || provider.request_timeout_seconds > MAX_REQUEST_TIMEOUT_SECONDS
        {
            return Err(AppError::Config(format!(
                "provider.request_timeout_seconds must be in (0, {}], got {}",
                MAX_REQUEST_TIMEOUT_SECONDS, provider.request_timeout_seconds
            )));
        }

        if provider.api_key_env.trim().is_empty() {
            return Err(AppError::Config(
                "provider.api_key_env must name an environment variable".to_string(),
            ));
        }

        if self.knowledge.path.trim().is_empty() {
            return Err(AppError::Config(
                "knowledge.path must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl FromStr for Config {
    type Err = AppError;

    fn from_str(toml_str: &str) -> Result<Self, Self::Err> {
        let config: Config =
            toml::from_str(toml_str).map_err(|source| AppError::ConfigParseFailed {
                path: "<string>".to_string(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const TEST_CONFIG: &str = r#"
[server]
host = "127.0.0.1"
port = 9000

[provider]
model = "gpt-4o"
base_url = "http://localhost:1234/v1"
max_tokens = 256
temperature = 0.2
request_timeout_seconds = 30
api_key_env = "PORTFOLIO_KEY"

[knowledge]
path = "data/about.txt"

[observability]
log_level = "debug"
"#;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_parse_full_config() {
        let config: Config = TEST_CONFIG.parse().expect("should parse");

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.provider.model(), "gpt-4o");
        assert_eq!(config.provider.base_url(), "http://localhost:1234/v1");
        assert_eq!(config.provider.max_tokens(), 256);
        assert_eq!(config.provider.temperature(), 0.2);
        assert_eq!(config.provider.request_timeout_seconds(), 30);
        assert_eq!(config.provider.api_key_env(), "PORTFOLIO_KEY");
        assert_eq!(config.knowledge.path, "data/about.txt");
        assert_eq!(config.observability.log_level, "debug");
        assert!(config.provider.api_key().is_none());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = "".parse().expect("empty config should parse");

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.provider.model(), "gpt-4o-mini");
        assert_eq!(config.provider.base_url(), "https://api.openai.com/v1");
        assert_eq!(config.provider.max_tokens(), 500);
        assert_eq!(config.provider.temperature(), 0.7);
        assert_eq!(config.provider.api_key_env(), "OPENAI_API_KEY");
        assert_eq!(config.knowledge.path, "knowledge.txt");
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_default_matches_empty_file() {
        let parsed: Config = "".parse().unwrap();
        let default = Config::default();
        assert_eq!(parsed.server.port, default.server.port);
        assert_eq!(parsed.provider.model(), default.provider.model());
        assert!(default.validate().is_ok());
    }

    #[test]
    fn test_api_key_in_toml_is_ignored() {
        let config: Config = "[provider]\napi_key = \"sk-from-file\"\n".parse().unwrap();
        assert!(config.provider.api_key().is_none());
    }

    #[test]
    fn test_env_port_overrides_file() {
        let mut config: Config = TEST_CONFIG.parse().unwrap();
        config.apply_env(env(&[("PORT", "8123")])).unwrap();
        assert_eq!(config.server.port, 8123);
    }

    #[test]
    fn test_env_invalid_port_is_config_error() {
        let mut config = Config::default();
        let err = config.apply_env(env(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("eighty"));
    }

    #[test]
    fn test_env_api_key_uses_configured_variable() {
        let mut config: Config = TEST_CONFIG.parse().unwrap();
        config
            .apply_env(env(&[("OPENAI_API_KEY", "wrong"), ("PORTFOLIO_KEY", "sk-right")]))
            .unwrap();
        assert_eq!(config.provider.api_key().unwrap().expose(), "sk-right");
    }

    #[test]
    fn test_blank_api_key_counts_as_unset() {
        let mut config = Config::default();
        config.apply_env(env(&[("OPENAI_API_KEY", "   ")])).unwrap();
        assert!(config.provider.api_key().is_none());
    }

    #[test]
    fn test_api_key_debug_is_redacted() {
        let key = ApiKey::new("sk-secret").unwrap();
        assert_eq!(format!("{:?}", key), "ApiKey(***)");

        let config = Config::default().provider.with_api_key(Some(key));
        assert!(!format!("{:?}", config).contains("sk-secret"));
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let err = "[provider]\nbase_url = \"api.openai.com\"\n"
            .parse::<Config>()
            .unwrap_err();
        assert!(err.to_string().contains("http://"));
    }

    #[test]
    fn test_rejects_zero_max_tokens() {
        let result = "[provider]\nmax_tokens = 0\n".parse::<Config>();
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_out_of_range_temperature() {
        assert!("[provider]\ntemperature = 2.5\n".parse::<Config>().is_err());
        assert!("[provider]\ntemperature = -0.1\n".parse::<Config>().is_err());
        assert!("[provider]\ntemperature = nan\n".parse::<Config>().is_err());
    }

    #[test]
    fn test_rejects_bad_timeout() {
        assert!(
            "[provider]\nrequest_timeout_seconds = 0\n"
                .parse::<Config>()
                .is_err()
        );
        assert!(
            "[provider]\nrequest_timeout_seconds = 3601\n"
                .parse::<Config>()
                .is_err()
        );
    }

    #[test]
    fn test_rejects_unparseable_host() {
        for host in ["localhost", "127.0.0.l", ""] {
            let toml = format!("[server]\nhost = \"{host}\"\n");
            let err = toml.parse::<Config>().unwrap_err();
            assert!(matches!(err, AppError::Config(_)), "host {host:?} accepted");
            assert!(err.to_string().contains("server.host"));
        }
    }

    #[test]
    fn test_socket_addr_uses_host_and_port() {
        let config: Config = "[server]\nhost = \"127.0.0.1\"\nport = 9001\n"
            .parse()
            .unwrap();
        assert_eq!(
            config.server.socket_addr().unwrap(),
            "127.0.0.1:9001".parse::<SocketAddr>().unwrap()
        );

        let config: Config = "[server]\nhost = \"::1\"\n".parse().unwrap();
        assert!(config.server.socket_addr().unwrap().is_ipv6());
    }

    #[test]
    fn test_rejects_empty_knowledge_path() {
        assert!("[knowledge]\npath = \"\"\n".parse::<Config>().is_err());
    }

    #[test]
    fn test_from_file_reports_path() {
        let err = Config::from_file("/nonexistent/portfolio-qa.toml").unwrap_err();
        assert!(matches!(err, AppError::ConfigFileRead { .. }));
        assert!(err.to_string().contains("/nonexistent/portfolio-qa.toml"));
    }

    #[test]
    fn test_load_explicit_missing_path_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let explicit = dir.path().join("config.toml");

        let err = Config::load(Some(&explicit), &explicit).unwrap_err();
        assert!(matches!(err, AppError::ConfigFileRead { .. }));
    }

    #[test]
    fn test_load_without_path_falls_back_to_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let default_path = dir.path().join("config.toml");

        let config = Config::load(None::<&Path>, &default_path).unwrap();
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_load_without_path_reads_existing_default() {
        let dir = tempfile::TempDir::new().unwrap();
        let default_path = dir.path().join("config.toml");
        std::fs::write(&default_path, "[server]\nport = 9100\n").unwrap();

        let config = Config::load(None::<&Path>, &default_path).unwrap();
        assert_eq!(config.server.port, 9100);
    }

    #[test]
    fn test_from_file_wraps_validation_errors() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[provider]\nmax_tokens = 0\n").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, AppError::ConfigValidationFailed { .. }));
    }
}
