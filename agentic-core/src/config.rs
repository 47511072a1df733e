use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{AgenticError, AgenticResult};
use crate::models::{DEFAULT_PROMPT, DEFAULT_ROUNDS, MIN_ROUNDS};

pub const APP_DIR_NAME: &str = "agentic-sim";
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AgenticConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub simulation: SimulationDefaults,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationDefaults {
    #[serde(default = "default_prompt")]
    pub prompt: String,

    #[serde(default = "default_rounds")]
    pub rounds: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json_format: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiConfig {
    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_connect_timeout_ms() -> u64 {
    2000
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}

fn default_rounds() -> u32 {
    DEFAULT_ROUNDS
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_theme() -> String {
    "Tokyo Night".to_string()
}

fn default_tick_rate_ms() -> u64 {
    100
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

impl Default for SimulationDefaults {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            rounds: default_rounds(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl AgenticConfig {
    pub fn load() -> AgenticResult<Self> {
        load_dotenv_files();
        Self::load_from_paths(get_config_paths())
    }

    /// Layers the given files (later wins), then `AGENTIC_*` environment
    /// variables, e.g. `AGENTIC_SERVICE__BASE_URL`.
    pub fn load_from_paths(paths: Vec<PathBuf>) -> AgenticResult<Self> {
        let mut builder = ConfigBuilder::builder();

        for path in paths {
            if path.exists() {
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("AGENTIC")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let mut agentic_config: AgenticConfig = config.try_deserialize()?;

        if let Ok(url) = std::env::var("AGENTIC_URL") {
            agentic_config.service.base_url = url;
        }

        if let Ok(level) = std::env::var("AGENTIC_LOG_LEVEL") {
            agentic_config.logging.level = level;
        } else if let Ok(level) = std::env::var("RUST_LOG") {
            agentic_config.logging.level = level;
        }

        agentic_config.validate()?;

        Ok(agentic_config)
    }

    pub fn validate(&self) -> AgenticResult<()> {
        let url = self.service.base_url.trim();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(AgenticError::InvalidConfigValue {
                key: "service.base_url".to_string(),
                message: "Must start with http:// or https://".to_string(),
            });
        }

        if self.service.timeout_secs == 0 {
            return Err(AgenticError::InvalidConfigValue {
                key: "service.timeout_secs".to_string(),
                message: "Must be greater than 0".to_string(),
            });
        }

        if self.simulation.rounds < MIN_ROUNDS {
            return Err(AgenticError::InvalidConfigValue {
                key: "simulation.rounds".to_string(),
                message: format!("Must be at least {}", MIN_ROUNDS),
            });
        }

        if self.tui.tick_rate_ms == 0 {
            return Err(AgenticError::InvalidConfigValue {
                key: "tui.tick_rate_ms".to_string(),
                message: "Must be greater than 0".to_string(),
            });
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        let level_lower = self.logging.level.to_lowercase();
        if !valid_levels.contains(&level_lower.as_str()) && !level_lower.contains('=') {
            return Err(AgenticError::InvalidConfigValue {
                key: "logging.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Must be one of: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        Ok(())
    }

    pub fn to_toml_string(&self) -> AgenticResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Serializes this config to `path`. Refuses to clobber an existing file
    /// unless `force` is set.
    pub fn write_to(&self, path: &Path, force: bool) -> AgenticResult<()> {
        if path.exists() && !force {
            return Err(AgenticError::IoError(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(path) = default_config_file() {
        paths.push(path);
    }

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join("agentic.toml"));
    }

    paths
}

fn load_dotenv_files() {
    let mut paths = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".env"));
        paths.push(cwd.join(".env.local"));
    }

    if let Some(config_dir) = get_config_dir() {
        paths.push(config_dir.join(".env"));
    }

    for path in paths {
        if path.exists() {
            let _ = dotenvy::from_path(&path);
        }
    }
}

pub fn get_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME))
}

pub fn get_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join(APP_DIR_NAME))
}

pub fn default_config_file() -> Option<PathBuf> {
    get_config_dir().map(|d| d.join(CONFIG_FILE_NAME))
}

pub fn ensure_data_dir() -> AgenticResult<PathBuf> {
    let data_dir = get_data_dir().ok_or_else(|| {
        AgenticError::ConfigDirUnavailable("Could not determine data directory".to_string())
    })?;

    if !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)?;
    }

    Ok(data_dir)
}
