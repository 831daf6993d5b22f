//! Application configuration management
//!
//! Configuration is loaded from environment variables (and a `.env` file if
//! present). Command-line flags override individual values afterwards.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    BYTES_PER_MB, DEFAULT_BENCHMARK_SIZES, DEFAULT_FAIL_ON_MEMORY_LIMIT, DEFAULT_HARD_DEADLINE,
    DEFAULT_LOG_FILTER, DEFAULT_MEMORY_LIMIT_MB, DEFAULT_TEST_CASES_DIR,
    DEFAULT_TEST_TIMEOUT_SECS, DEFAULT_TIME_LIMITS_SECS,
};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub runner: RunnerConfig,
    pub analyzer: AnalyzerConfig,
    pub storage: StorageConfig,
    pub log_filter: String,
}

/// Test runner configuration
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Timeout applied when a test case does not carry its own
    pub default_timeout: Duration,
    /// Memory ceiling per test case in bytes
    pub memory_limit_bytes: u64,
    /// Whether exceeding the memory ceiling fails the test case
    pub fail_on_memory_limit: bool,
    /// Abandon calls at their deadline instead of measuring after the fact
    pub hard_deadline: bool,
}

/// Performance analyzer configuration
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Synthetic input sizes, ascending
    pub sizes: Vec<usize>,
    /// Time limits tried by the timeout sweep
    pub time_limits: Vec<Duration>,
}

/// File storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub test_cases_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            runner: RunnerConfig::from_env()?,
            analyzer: AnalyzerConfig::from_env()?,
            storage: StorageConfig::from_env(),
            log_filter: env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            runner: RunnerConfig::default(),
            analyzer: AnalyzerConfig::default(),
            storage: StorageConfig::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl RunnerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs: f64 = parse_var("DSA_TEST_TIMEOUT_SECS", DEFAULT_TEST_TIMEOUT_SECS)?;
        let memory_limit_mb: u64 = parse_var("DSA_MEMORY_LIMIT_MB", DEFAULT_MEMORY_LIMIT_MB)?;

        Ok(Self {
            default_timeout: positive_duration("DSA_TEST_TIMEOUT_SECS", timeout_secs)?,
            memory_limit_bytes: (memory_limit_mb as f64 * BYTES_PER_MB) as u64,
            fail_on_memory_limit: parse_var("DSA_FAIL_ON_MEMORY_LIMIT", DEFAULT_FAIL_ON_MEMORY_LIMIT)?,
            hard_deadline: parse_var("DSA_HARD_DEADLINE", DEFAULT_HARD_DEADLINE)?,
        })
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            default_timeout: Duration::from_secs_f64(DEFAULT_TEST_TIMEOUT_SECS),
            memory_limit_bytes: (DEFAULT_MEMORY_LIMIT_MB as f64 * BYTES_PER_MB) as u64,
            fail_on_memory_limit: DEFAULT_FAIL_ON_MEMORY_LIMIT,
            hard_deadline: DEFAULT_HARD_DEADLINE,
        }
    }
}

impl AnalyzerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let sizes = match env::var("DSA_BENCHMARK_SIZES") {
            Ok(raw) => parse_sizes(&raw)
                .ok_or_else(|| ConfigError::InvalidValue("DSA_BENCHMARK_SIZES".to_string()))?,
            Err(_) => DEFAULT_BENCHMARK_SIZES.to_vec(),
        };

        let time_limits = match env::var("DSA_TIME_LIMITS") {
            Ok(raw) => parse_time_limits(&raw)
                .ok_or_else(|| ConfigError::InvalidValue("DSA_TIME_LIMITS".to_string()))?,
            Err(_) => default_time_limits(),
        };

        Ok(Self { sizes, time_limits })
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_BENCHMARK_SIZES.to_vec(),
            time_limits: default_time_limits(),
        }
    }
}

impl StorageConfig {
    fn from_env() -> Self {
        Self {
            test_cases_path: PathBuf::from(
                env::var("DSA_TEST_CASES_DIR").unwrap_or_else(|_| DEFAULT_TEST_CASES_DIR.to_string()),
            ),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            test_cases_path: PathBuf::from(DEFAULT_TEST_CASES_DIR),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        Err(_) => Ok(default),
    }
}

fn positive_duration(name: &str, secs: f64) -> Result<Duration, ConfigError> {
    if secs.is_finite() && secs > 0.0 {
        Ok(Duration::from_secs_f64(secs))
    } else {
        Err(ConfigError::InvalidValue(name.to_string()))
    }
}

fn default_time_limits() -> Vec<Duration> {
    DEFAULT_TIME_LIMITS_SECS
        .iter()
        .map(|s| Duration::from_secs_f64(*s))
        .collect()
}

/// Parse a comma-separated, strictly ascending list of sizes (at least two)
pub fn parse_sizes(raw: &str) -> Option<Vec<usize>> {
    let sizes: Vec<usize> = raw
        .split(',')
        .map(|s| s.trim().parse().ok())
        .collect::<Option<_>>()?;

    let ascending = sizes.windows(2).all(|w| w[0] < w[1]);
    (sizes.len() >= 2 && ascending && sizes[0] > 0).then_some(sizes)
}

/// Parse a comma-separated list of positive time limits in seconds
pub fn parse_time_limits(raw: &str) -> Option<Vec<Duration>> {
    raw.split(',')
        .map(|s| {
            let secs: f64 = s.trim().parse().ok()?;
            (secs.is_finite() && secs > 0.0).then(|| Duration::from_secs_f64(secs))
        })
        .collect::<Option<Vec<_>>>()
        .filter(|limits| !limits.is_empty())
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
