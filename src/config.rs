use config::{
    Config, ConfigBuilder, ConfigError, Environment, File, Map, builder::DefaultState,
};
use serde::{Deserialize, Serialize};
use std::env;

use std::path::Path;
use std::time::Duration;

/// Flat variable names accepted alongside the nested `SMS__` form, as
/// `(variable, key)`. These win over `SMS__SERVER__*`.
pub const FLAT_ENV: [(&str, &str); 2] = [
    ("SMS_LISTEN_ADDRESS", "server.listen_address"),
    ("SMS_LISTEN_PORT", "server.listen_port"),
];

/// Application configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// SMS gateway configuration
    pub gateway: GatewayConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Listen address (default: 0.0.0.0)
    pub listen_address: String,
    /// Listen port (default: 8080)
    pub listen_port: u16,
    /// Request timeout in seconds (default: 30)
    pub timeout_seconds: u64,
}

/// AWS Pinpoint gateway configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// AWS region (default: us-east-1)
    pub region: String,
    /// Static credentials; the default AWS credential chain is used when unset
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level (default: info)
    pub level: String,
    /// Log format: json or pretty (default: json)
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: "0.0.0.0".to_string(),
            listen_port: 8080,
            timeout_seconds: 30,
        }
    }
}

impl ServerConfig {
    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.listen_address, self.listen_port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            access_key_id: None,
            secret_access_key: None,
        }
    }
}

impl GatewayConfig {
    /// Both halves of a static key pair, if configured.
    pub fn static_credentials(&self) -> Option<(&str, &str)> {
        match (&self.access_key_id, &self.secret_access_key) {
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => {
                Some((id.as_str(), secret.as_str()))
            }
            _ => None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "json".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(None)
    }

    /// As [`AppConfig::load`], with an explicit file layered above the
    /// `config/` directory and below the environment.
    pub fn load_with(extra_file: Option<&Path>) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides (gitignored)
            .add_source(File::with_name("config/local").required(false));
        if let Some(path) = extra_file {
            builder = builder.add_source(File::from(path));
        }

        Self::with_environment(builder, None)
    }

    /// Top layers: `SMS__`-nested variables, then the flat names in
    /// [`FLAT_ENV`]. `vars` replaces the process environment when set.
    fn with_environment(
        builder: ConfigBuilder<DefaultState>,
        vars: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        // Environment variables, e.g. SMS__SERVER__LISTEN_PORT
        let mut builder = builder.add_source(
            Environment::with_prefix("SMS")
                .separator("__")
                .source(vars.clone()),
        );
        for (var, key) in FLAT_ENV {
            let value = match &vars {
                Some(vars) => vars.get(var).cloned(),
                None => env::var(var).ok(),
            };
            builder = builder.set_override_option(key, value)?;
        }

        builder.build()?.try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Ok(Config::builder().add_source(Config::try_from(&AppConfig::default())?))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            gateway: GatewayConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
