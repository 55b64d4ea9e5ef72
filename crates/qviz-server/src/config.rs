//! Configuration management for the QuantumViz server.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with QVIZ_ prefix)
//! 3. .env files
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::path::Path;

use qviz_adapter_braket::BraketConfig;

/// Complete server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Simulation limits and defaults
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// AWS Braket backend
    #[serde(default)]
    pub braket: BraketSettings,

    /// Explanation model
    #[serde(default)]
    pub explanation: ExplanationConfig,

    /// Visualization artifact storage
    #[serde(default)]
    pub visualization: VisualizationConfig,

    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:5001")
    #[serde(default = "default_address")]
    pub address: String,

    /// API key required on POST routes (set via QVIZ_API_KEY)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Allowed CORS origins: "*" or a comma-separated list
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("address", &self.address)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("cors_origins", &self.cors_origins)
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            api_key: None,
            cors_origins: default_cors_origins(),
        }
    }
}

/// Simulation limits and defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Shots used when a request omits them
    #[serde(default = "default_shots")]
    pub default_shots: u32,

    /// Largest shot count a request may ask for
    #[serde(default = "default_max_shots")]
    pub max_shots: u32,

    /// Widest circuit accepted by the local simulator
    #[serde(default = "default_max_qubits")]
    pub max_qubits: u32,

    /// Backend used when a request names none: "simulator" or "braket"
    #[serde(default = "default_backend")]
    pub default_backend: String,

    /// Fixed RNG seed for reproducible sampling
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            default_shots: default_shots(),
            max_shots: default_max_shots(),
            max_qubits: default_max_qubits(),
            default_backend: default_backend(),
            seed: None,
        }
    }
}

/// AWS Braket backend settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BraketSettings {
    /// Register the Braket backend at startup
    #[serde(default)]
    pub enabled: bool,

    /// Device and result bucket
    #[serde(flatten)]
    pub connection: BraketConfig,
}

/// Explanation model settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct ExplanationConfig {
    /// Provider: "gemini" or "none"
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Provider API key (set via QVIZ_LLM_API_KEY or GEMINI_API_KEY)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Override for the provider endpoint
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_seconds: u64,

    /// Completion length limit
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl fmt::Debug for ExplanationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExplanationConfig")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl Default for ExplanationConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_key: None,
            model: default_model(),
            base_url: None,
            timeout_seconds: default_llm_timeout(),
            max_output_tokens: default_max_output_tokens(),
            temperature: default_temperature(),
        }
    }
}

/// Visualization artifact storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualizationConfig {
    /// Store: "memory" or "s3"
    #[serde(default = "default_store")]
    pub store: String,

    /// S3 bucket
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// S3 region
    #[serde(default = "default_region")]
    pub region: String,

    /// Key prefix for stored pages
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for VisualizationConfig {
    fn default() -> Self {
        Self {
            store: default_store(),
            bucket: default_bucket(),
            region: default_region(),
            prefix: default_prefix(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: "console" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Default value functions
fn default_address() -> String {
    "0.0.0.0:5001".to_string()
}

fn default_cors_origins() -> String {
    "*".to_string()
}

fn default_shots() -> u32 {
    qviz_hal::DEFAULT_SHOTS
}

fn default_max_shots() -> u32 {
    100_000
}

fn default_max_qubits() -> u32 {
    20
}

fn default_backend() -> String {
    "simulator".to_string()
}

fn default_provider() -> String {
    "gemini".to_string()
}

fn default_model() -> String {
    qviz_explain::DEFAULT_MODEL.to_string()
}

fn default_llm_timeout() -> u64 {
    30
}

fn default_max_output_tokens() -> u32 {
    500
}

fn default_temperature() -> f32 {
    0.7
}

fn default_store() -> String {
    "memory".to_string()
}

fn default_bucket() -> String {
    qviz_viz::S3ArtifactStore::DEFAULT_BUCKET.to_string()
}

fn default_region() -> String {
    qviz_viz::S3ArtifactStore::DEFAULT_REGION.to_string()
}

fn default_prefix() -> String {
    qviz_viz::DEFAULT_PREFIX.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "console".to_string()
}

/// Upper bound on `max_qubits`; a 2^28 state vector is already 4 GiB.
const QUBIT_CEILING: u32 = 28;

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Self::from_yaml(&contents)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml_ng::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load .env file if it exists
    /// 2. Load from file if provided
    /// 3. Apply environment variable overrides
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };

        let config = config.merge_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Merge environment variables into this configuration.
    ///
    /// Only variables that `lookup` returns override the file-loaded (or
    /// default) values. Unparseable numbers are ignored.
    pub fn merge_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parsed<T: std::str::FromStr>(v: Option<String>) -> Option<T> {
            v.and_then(|v| v.trim().parse().ok())
        }

        // Server
        if let Some(v) = lookup("QVIZ_ADDRESS") {
            self.server.address = v;
        }
        if let Some(v) = lookup("QVIZ_API_KEY") {
            self.server.api_key = Some(v);
        }
        if let Some(v) = lookup("QVIZ_CORS_ORIGINS") {
            self.server.cors_origins = v;
        }

        // Simulation
        if let Some(v) = parsed(lookup("QVIZ_DEFAULT_SHOTS")) {
            self.simulation.default_shots = v;
        }
        if let Some(v) = parsed(lookup("QVIZ_MAX_SHOTS")) {
            self.simulation.max_shots = v;
        }
        if let Some(v) = parsed(lookup("QVIZ_MAX_QUBITS")) {
            self.simulation.max_qubits = v;
        }
        if let Some(v) = lookup("QVIZ_DEFAULT_BACKEND") {
            self.simulation.default_backend = v;
        }
        if let Some(v) = parsed(lookup("QVIZ_SEED")) {
            self.simulation.seed = Some(v);
        }

        // Braket
        if let Some(v) = parsed(lookup("QVIZ_BRAKET_ENABLED")) {
            self.braket.enabled = v;
        }
        if let Some(v) = lookup("QVIZ_BRAKET_DEVICE") {
            self.braket.connection.device_arn = v;
        }
        if let Some(v) = lookup("QVIZ_BRAKET_REGION") {
            self.braket.connection.region = v;
        }
        if let Some(v) = lookup("QVIZ_BRAKET_BUCKET") {
            self.braket.connection.s3_bucket = v;
        }
        if let Some(v) = lookup("QVIZ_BRAKET_PREFIX") {
            self.braket.connection.s3_prefix = v;
        }

        // Explanation
        if let Some(v) = lookup("QVIZ_LLM_PROVIDER") {
            self.explanation.provider = v;
        }
        if let Some(v) = lookup("QVIZ_LLM_API_KEY").or_else(|| lookup("GEMINI_API_KEY")) {
            self.explanation.api_key = Some(v);
        }
        if let Some(v) = lookup("QVIZ_LLM_MODEL") {
            self.explanation.model = v;
        }
        if let Some(v) = lookup("QVIZ_LLM_BASE_URL") {
            self.explanation.base_url = Some(v);
        }
        if let Some(v) = parsed(lookup("QVIZ_LLM_TIMEOUT")) {
            self.explanation.timeout_seconds = v;
        }

        // Visualization
        if let Some(v) = lookup("QVIZ_VIZ_STORE") {
            self.visualization.store = v;
        }
        if let Some(v) = lookup("QVIZ_VIZ_BUCKET") {
            self.visualization.bucket = v;
        }
        if let Some(v) = lookup("QVIZ_VIZ_REGION") {
            self.visualization.region = v;
        }
        if let Some(v) = lookup("QVIZ_VIZ_PREFIX") {
            self.visualization.prefix = v;
        }

        // Logging
        if let Some(v) = lookup("QVIZ_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = lookup("QVIZ_LOG_FORMAT") {
            self.logging.format = v;
        }

        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind_address()?;

        if let Some(ref key) = self.server.api_key {
            if key.is_empty() {
                return Err(ConfigError::ValidationError(
                    "api_key must not be empty; omit the field to disable authentication".to_string(),
                ));
            }
        }

        let sim = &self.simulation;
        if sim.max_shots == 0 {
            return Err(ConfigError::ValidationError(
                "max_shots must be greater than 0".to_string(),
            ));
        }
        if sim.default_shots == 0 || sim.default_shots > sim.max_shots {
            return Err(ConfigError::ValidationError(format!(
                "default_shots must be in 1..={}, got {}",
                sim.max_shots, sim.default_shots
            )));
        }
        if sim.max_qubits == 0 || sim.max_qubits > QUBIT_CEILING {
            return Err(ConfigError::ValidationError(format!(
                "max_qubits must be in 1..={QUBIT_CEILING}, got {}",
                sim.max_qubits
            )));
        }
        match sim.default_backend.as_str() {
            "simulator" => {}
            "braket" if self.braket.enabled => {}
            "braket" => {
                return Err(ConfigError::ValidationError(
                    "default_backend is braket but braket.enabled is false".to_string(),
                ));
            }
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Unknown default backend: {other}"
                )));
            }
        }

        if self.braket.enabled && self.braket.connection.s3_bucket.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "braket.s3_bucket is required when braket is enabled".to_string(),
            ));
        }

        match self.explanation.provider.as_str() {
            "gemini" | "none" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Unknown explanation provider: {other}"
                )));
            }
        }
        if !(0.0..=2.0).contains(&self.explanation.temperature) {
            return Err(ConfigError::ValidationError(format!(
                "temperature must be in 0.0..=2.0, got {}",
                self.explanation.temperature
            )));
        }
        if self.explanation.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "explanation timeout_seconds must be greater than 0".to_string(),
            ));
        }

        match self.visualization.store.as_str() {
            "memory" => {}
            "s3" if !self.visualization.bucket.trim().is_empty() => {}
            "s3" => {
                return Err(ConfigError::ValidationError(
                    "visualization.bucket is required for the s3 store".to_string(),
                ));
            }
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Unknown visualization store: {other}"
                )));
            }
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {other}"
                )));
            }
        }

        match self.logging.format.as_str() {
            "console" | "json" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log format: {other}"
                )));
            }
        }

        Ok(())
    }

    /// Get the parsed bind address.
    pub fn bind_address(&self) -> Result<SocketAddr, ConfigError> {
        self.server.address.parse().map_err(|_| {
            ConfigError::ValidationError(format!("Invalid server address: {}", self.server.address))
        })
    }

    /// Whether an explanation model should be built at startup.
    pub fn explanation_model_enabled(&self) -> bool {
        self.explanation.provider != "none"
            && self
                .explanation
                .api_key
                .as_deref()
                .is_some_and(|k| !k.trim().is_empty())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
