use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub processor: ProcessorConfig,
    pub store: StoreConfig,
    pub driver: DriverConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Executable resolved through `PATH` when not absolute
    pub path: String,
    /// Flags placed before the query expression, which is always the last argument
    pub args: Vec<String>,
    pub timeout_ms: u64,
    pub read_chunk_size: usize,
    /// Upper bound on retained stderr; the rest is drained and discarded
    pub capture_stderr_bytes: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            path: "jp".to_string(),
            args: vec!["--compact".to_string(), "--unquoted".to_string()],
            timeout_ms: 10_000,
            read_chunk_size: 16 * 1024,
            capture_stderr_bytes: 4096,
        }
    }
}

impl ProcessorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    pub connect_timeout_ms: u64,
    /// Applied only when the connection URI does not set `serverSelectionTimeoutMS`
    pub server_selection_timeout_ms: u64,
    /// Bound on the whole fetch: connect, find, serialize, disconnect
    pub fetch_timeout_ms: u64,
    pub app_name: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 5_000,
            server_selection_timeout_ms: 5_000,
            fetch_timeout_ms: 10_000,
            app_name: "jmesq".to_string(),
        }
    }
}

impl StoreConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn server_selection_timeout(&self) -> Duration {
        Duration::from_millis(self.server_selection_timeout_ms)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DriverConfig {
    pub worker_threads: usize,
    pub shutdown_timeout_ms: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            worker_threads: 2,
            shutdown_timeout_ms: 2_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
    pub file_logging: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".to_string(),
            stdout_level: "warn".to_string(),
            file_level: "info".to_string(),
            file_logging: false,
        }
    }
}

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let config_path = env::var("JMESQ_CONFIG").unwrap_or_else(|_| "jmesq".to_string());
    load_settings_from(&config_path)
}

/// Reads `path` (extension optional) if present, then `JMESQ_*` environment overrides.
pub fn load_settings_from(path: &str) -> Result<Settings, config::ConfigError> {
    let settings: Settings = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(
            config::Environment::with_prefix("JMESQ")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
