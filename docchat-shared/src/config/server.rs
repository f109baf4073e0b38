use crate::config::llm::LlmConfig;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};
use thiserror::Error;

/// Failures while resolving the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yml::Error),
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported configuration format. Use 'yaml' or 'json'.")]
    UnsupportedFormat,
    #[error("Invalid {name} value: {reason}")]
    InvalidEnv { name: &'static str, reason: String },
    #[error("Invalid server port. Must be greater than 0.")]
    InvalidPort,
}

/// Output format of the log subscriber
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// HTTP listener settings
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// Port for the HTTP server
    pub port: u16,

    /// Origins allowed by CORS; empty means any origin
    pub allowed_origins: Vec<String>,

    /// Header carrying the per-request id
    pub request_id_header: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            allowed_origins: Vec::new(),
            request_id_header: "x-request-id".to_string(),
        }
    }
}

/// Logging settings
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset
    pub level: String,

    /// Text or JSON lines
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// Location of the compiled single-page app
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct WebConfig {
    /// Directory served as static assets
    pub static_dir: PathBuf,

    /// Document returned for unknown paths
    pub spa_index: PathBuf,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("../docchat-web/dist"),
            spa_index: PathBuf::from("../docchat-web/dist/index.html"),
        }
    }
}

/// Upload acceptance rules and storage
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct UploadConfig {
    /// Directory receiving uploaded files
    pub directory: PathBuf,

    /// Accepted lowercase extensions, including the dot
    pub allowed_extensions: Vec<String>,

    /// Accepted content types
    pub allowed_mime_types: Vec<String>,

    /// Largest accepted request body
    pub max_body_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("uploads"),
            allowed_extensions: vec![".txt".to_string(), ".pdf".to_string()],
            allowed_mime_types: vec!["text/plain".to_string(), "application/pdf".to_string()],
            max_body_bytes: 25 * 1024 * 1024,
        }
    }
}

/// The main configuration structure for the DocChat service
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub web: WebConfig,
    pub uploads: UploadConfig,
    pub llm: LlmConfig,
}

impl Config {
    /// Generates a default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Loads the configuration from a file, environment variables, or defaults.
    ///
    /// File values win over environment variables; environment variables only
    /// fill values still at their defaults. `port_override` wins over both.
    ///
    /// # Arguments
    /// * `config_path` - Optional path to a `.yaml`/`.yml` or `.json` file.
    /// * `port_override` - Optional port number to override the configuration.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] when the file cannot be read or parsed, an
    /// environment variable is malformed, or the resulting port is 0.
    pub fn load_config(
        config_path: Option<PathBuf>,
        port_override: Option<u16>,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::with_defaults();
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => defaults.clone(),
        };

        if config.server.port == defaults.server.port
            && let Ok(port) = env::var("DOCCHAT_SERVER_PORT")
        {
            config.server.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                name: "DOCCHAT_SERVER_PORT",
                reason: "must be a valid number between 1 and 65535".to_string(),
            })?;
        }
        if config.server.host == defaults.server.host
            && let Ok(host) = env::var("DOCCHAT_SERVER_HOST")
        {
            config.server.host = host;
        }
        if config.logging.level == defaults.logging.level
            && let Ok(level) = env::var("DOCCHAT_LOG_LEVEL")
        {
            config.logging.level = level;
        }
        if config.logging.format == defaults.logging.format
            && let Ok(format) = env::var("DOCCHAT_LOG_FORMAT")
        {
            config.logging.format = match format.to_ascii_lowercase().as_str() {
                "json" => LogFormat::Json,
                "text" => LogFormat::Text,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        name: "DOCCHAT_LOG_FORMAT",
                        reason: "expected 'text' or 'json'".to_string(),
                    });
                }
            };
        }
        if config.web.static_dir == defaults.web.static_dir
            && let Ok(static_dir) = env::var("DOCCHAT_STATIC_DIR")
        {
            let static_dir = PathBuf::from(static_dir);
            config.web.spa_index = static_dir.join("index.html");
            config.web.static_dir = static_dir;
        }
        if config.uploads.directory == defaults.uploads.directory
            && let Ok(upload_dir) = env::var("DOCCHAT_UPLOAD_DIR")
        {
            config.uploads.directory = PathBuf::from(upload_dir);
        }

        config.llm.apply_env_overrides(&defaults.llm)?;

        if let Some(port) = port_override {
            config.server.port = port;
        }

        if config.server.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        Ok(config)
    }

    fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Ok(serde_yml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            _ => Err(ConfigError::UnsupportedFormat),
        }
    }

    /// Socket address string the server binds to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Validate the complete configuration including LLM settings
    ///
    /// # Errors
    /// Returns every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.server.port == 0 {
            errors.push("Invalid server port. Must be greater than 0.".to_string());
        }

        if self.uploads.allowed_extensions.is_empty() {
            errors.push("At least one upload extension must be allowed".to_string());
        }

        for ext in &self.uploads.allowed_extensions {
            if !ext.starts_with('.') || ext.to_lowercase() != *ext {
                errors.push(format!(
                    "Upload extension must be lowercase and start with '.': {ext}"
                ));
            }
        }

        if self.uploads.allowed_mime_types.is_empty() {
            errors.push("At least one upload content type must be allowed".to_string());
        }

        for mime in &self.uploads.allowed_mime_types {
            if mime.to_ascii_lowercase() != *mime || mime.contains(';') || !mime.contains('/') {
                errors.push(format!(
                    "Upload content type must be a lowercase type/subtype without parameters: {mime}"
                ));
            }
        }

        if let Err(llm_errors) = self.llm.validate() {
            errors.extend(llm_errors);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
