//! Configuration loading and typed config structures for the calendar CLI.
//!
//! The configuration lives in `calendar-config.yaml` (or the path named by
//! `CALENDAR_CONFIG`). Every section is optional; missing keys fall back to
//! the defaults below. Two environment variables override the file:
//!
//! - `CALENDAR_DEFAULT_ZONE` overrides `display.default_zone`
//! - `CALENDAR_LOG_LEVEL` overrides `logging.level`

use std::path::Path;

use calendar_zones::Zone;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// Env var naming the config file.
pub const CONFIG_PATH_VAR: &str = "CALENDAR_CONFIG";

/// Config file used when [`CONFIG_PATH_VAR`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "calendar-config.yaml";

/// Upper bound on `demo.threads` and `stress.threads`. Racing threads meet
/// at a barrier, so every one of them must be spawned.
pub const MAX_THREADS: usize = 256;

const DEFAULT_ZONE_VAR: &str = "CALENDAR_DEFAULT_ZONE";
const LOG_LEVEL_VAR: &str = "CALENDAR_LOG_LEVEL";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is unusable.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending key.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level CLI configuration.
///
/// Mirrors the structure of `calendar-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CliConfig {
    /// Output rendering.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Log filtering.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// The `demo` command.
    #[serde(default)]
    pub demo: DemoConfig,

    /// The `stress` command.
    #[serde(default)]
    pub stress: StressConfig,
}

impl CliConfig {
    /// Load configuration from a YAML file at the given path, then apply
    /// environment overrides.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, then apply environment
    /// overrides.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse_with(yaml, env_lookup)
    }

    /// Defaults plus environment overrides, for when no file exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().finish(env_lookup)
    }

    /// Parse `yaml` and resolve overrides through `lookup` instead of the
    /// process environment.
    pub fn parse_with(
        yaml: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.finish(lookup)
    }

    fn finish(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        self.apply_overrides(lookup)?;
        self.validate()?;
        Ok(self)
    }

    /// Apply `CALENDAR_DEFAULT_ZONE` and `CALENDAR_LOG_LEVEL` as resolved by
    /// `lookup`.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = lookup(DEFAULT_ZONE_VAR) {
            self.display.default_zone = val.parse().map_err(|err| ConfigError::Invalid {
                field: "display.default_zone",
                reason: format!("{err}"),
            })?;
        }
        if let Some(val) = lookup(LOG_LEVEL_VAR) {
            self.logging.level = val;
        }
        Ok(())
    }

    /// Reject values the commands cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        EnvFilter::try_new(&self.logging.level).map_err(|err| ConfigError::Invalid {
            field: "logging.level",
            reason: format!("{err}"),
        })?;

        thread_count("demo.threads", self.demo.threads)?;
        if self.demo.lead_time_secs < 0 {
            return Err(ConfigError::Invalid {
                field: "demo.lead_time_secs",
                reason: "must not be negative".to_owned(),
            });
        }
        positive_secs("demo.duration_secs", self.demo.duration_secs)?;

        thread_count("stress.threads", self.stress.threads)?;
        positive("stress.attempts_per_thread", self.stress.attempts_per_thread)?;
        positive_secs("stress.horizon_secs", self.stress.horizon_secs)?;
        positive_secs("stress.max_duration_secs", self.stress.max_duration_secs)?;
        Ok(())
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn positive(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid {
            field,
            reason: "must be at least 1".to_owned(),
        });
    }
    Ok(())
}

fn thread_count(field: &'static str, value: usize) -> Result<(), ConfigError> {
    positive(field, value)?;
    if value > MAX_THREADS {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("must be at most {MAX_THREADS}, got {value}"),
        });
    }
    Ok(())
}

fn positive_secs(field: &'static str, value: i64) -> Result<(), ConfigError> {
    if value <= 0 {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("must be a positive number of seconds, got {value}"),
        });
    }
    Ok(())
}

/// Output rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DisplayConfig {
    /// Zone used by `list all` when none is given.
    #[serde(default = "default_zone")]
    pub default_zone: Zone,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_zone: default_zone(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Line format written to stderr.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Concurrency demonstration settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DemoConfig {
    /// Threads racing for the same slot.
    #[serde(default = "default_demo_threads")]
    pub threads: usize,

    /// Seconds from now until the contested slot starts.
    #[serde(default = "default_lead_time_secs")]
    pub lead_time_secs: i64,

    /// Length of the contested slot.
    #[serde(default = "default_demo_duration_secs")]
    pub duration_secs: i64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            threads: default_demo_threads(),
            lead_time_secs: default_lead_time_secs(),
            duration_secs: default_demo_duration_secs(),
        }
    }
}

/// Randomized stress workload settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StressConfig {
    /// Worker threads.
    #[serde(default = "default_stress_threads")]
    pub threads: usize,

    /// Create attempts made by each worker.
    #[serde(default = "default_attempts_per_thread")]
    pub attempts_per_thread: usize,

    /// Start times are drawn from `[0, horizon_secs)`.
    #[serde(default = "default_horizon_secs")]
    pub horizon_secs: i64,

    /// Durations are drawn from `[1, max_duration_secs]`.
    #[serde(default = "default_max_duration_secs")]
    pub max_duration_secs: i64,

    /// Base RNG seed. Worker `n` uses `seed + n`.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            threads: default_stress_threads(),
            attempts_per_thread: default_attempts_per_thread(),
            horizon_secs: default_horizon_secs(),
            max_duration_secs: default_max_duration_secs(),
            seed: default_seed(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_zone() -> Zone {
    Zone::Utc
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_demo_threads() -> usize {
    2
}

const fn default_lead_time_secs() -> i64 {
    3600
}

const fn default_demo_duration_secs() -> i64 {
    1800
}

const fn default_stress_threads() -> usize {
    8
}

const fn default_attempts_per_thread() -> usize {
    250
}

const fn default_horizon_secs() -> i64 {
    // One week.
    604_800
}

const fn default_max_duration_secs() -> i64 {
    // Four hours.
    14_400
}

const fn default_seed() -> u64 {
    42
}
