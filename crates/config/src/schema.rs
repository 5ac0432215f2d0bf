use caselink_types::{BridgeError, Credential};
use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Yaml},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, path::Path};

/// Prefix for environment variable overrides (`CASELINK_PASSWORD`, ...).
const ENV_PREFIX: &str = "CASELINK_";

/// Capitalised keys from the legacy `conf.json` layout and their current names.
const LEGACY_KEYS: &[(&str, &str)] = &[
    ("Email", "email"),
    ("Password", "password"),
    ("Token", "verification_token"),
];

fn default_port() -> u16 {
    3200
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_base_url() -> String {
    "https://app.figure1.com/s".to_string()
}
fn default_collections_base_url() -> Option<String> {
    Some("https://api.figure1.com".to_string())
}
fn default_log_level() -> String {
    "info".to_string()
}

/// Where the upstream API lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base for case, profile and login endpoints.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Base for collection endpoints. Falls back to `base_url` when unset.
    #[serde(default = "default_collections_base_url")]
    pub collections_base_url: Option<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            collections_base_url: default_collections_base_url(),
        }
    }
}

impl UpstreamConfig {
    /// Base URL used for collection lookups.
    #[must_use]
    pub fn collections_base(&self) -> &str {
        self.collections_base_url
            .as_deref()
            .unwrap_or(&self.base_url)
    }
}

/// Logging options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Write logs to this file (rotated daily) instead of stderr.
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Top-level application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Listen port (defaults to 3200).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Listen address (defaults to `0.0.0.0`).
    #[serde(default = "default_host")]
    pub host: String,
    /// Upstream login email.
    #[serde(default)]
    pub email: String,
    /// Upstream login password.
    #[serde(default)]
    pub password: String,
    /// Token Slack sends with every slash command.
    #[serde(default)]
    pub verification_token: String,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            email: String::new(),
            password: String::new(),
            verification_token: String::new(),
            upstream: UpstreamConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("host", &self.host)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("verification_token", &"[REDACTED]")
            .field("upstream", &self.upstream)
            .field("log", &self.log)
            .finish()
    }
}

impl Config {
    /// Parses configuration from a YAML string, merged with defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the YAML is invalid or extraction fails.
    #[allow(clippy::result_large_err)]
    pub fn from_yaml(yaml: &str) -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Yaml::string(yaml))
            .extract()
    }

    /// Parses configuration from a JSON string, merged with defaults.
    ///
    /// Accepts the legacy capitalised keys (`Email`, `Password`, `Token`).
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the JSON is invalid or extraction fails.
    #[allow(clippy::result_large_err)]
    pub fn from_json(json: &str) -> Result<Self, figment::Error> {
        Self::json_figment(json)?.extract()
    }

    /// Loads configuration from a file path, merged with defaults and then
    /// with `CASELINK_*` environment variables. Files ending in `.json` are
    /// read as JSON, anything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the file cannot be read or parsed.
    #[allow(clippy::result_large_err)]
    pub fn from_file(path: &Path) -> Result<Self, figment::Error> {
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let figment = if is_json {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| figment::Error::from(format!("{}: {e}", path.display())))?;
            Self::json_figment(&raw)?
        } else {
            Figment::from(Serialized::defaults(Config::default())).merge(Yaml::file(path))
        };
        figment.merge(Self::env()).extract()
    }

    /// Defaults merged with environment variables only.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if an environment value has the wrong type.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Self::env())
            .extract()
    }

    fn env() -> Env {
        Env::prefixed(ENV_PREFIX).split("__")
    }

    #[allow(clippy::result_large_err)]
    fn json_figment(json: &str) -> Result<Figment, figment::Error> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(Figment::from(Serialized::defaults(Config::default()))
            .merge(Serialized::defaults(normalize_legacy_keys(value))))
    }

    /// Checks that the credentials and verification token are present.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Config`] naming the first missing setting.
    pub fn validate(&self) -> Result<(), BridgeError> {
        for (name, value) in [
            ("email", &self.email),
            ("password", &self.password),
            ("verification_token", &self.verification_token),
        ] {
            if value.trim().is_empty() {
                return Err(BridgeError::Config(format!("`{name}` must be set")));
            }
        }
        Ok(())
    }

    /// Upstream login credentials.
    #[must_use]
    pub fn credential(&self) -> Credential {
        Credential::new(self.email.clone(), self.password.clone())
    }

    /// `host:port` socket address string.
    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Renames legacy top-level keys unless the current name is already present.
fn normalize_legacy_keys(value: Value) -> Value {
    let Value::Object(mut map) = value else {
        return value;
    };
    for (legacy, current) in LEGACY_KEYS {
        if map.contains_key(*current) {
            continue;
        }
        if let Some(v) = map.remove(*legacy) {
            map.insert((*current).to_string(), v);
        }
    }
    Value::Object(map)
}
