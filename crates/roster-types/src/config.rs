//! Global configuration types for Roster.
//!
//! `RosterConfig` represents the top-level `config.toml` that controls
//! logging, availability defaults, and similarity search defaults.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Loaded from `~/.roster/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub availability: AvailabilityConfig,

    #[serde(default)]
    pub search: SearchConfig,
}

/// Output format of the tracing `fmt` layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset (e.g. "warn", "roster=debug").
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    /// Bridge spans to OpenTelemetry with a stdout exporter.
    #[serde(default)]
    pub otel: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            otel: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityConfig {
    /// Allocation used when a booking request omits one.
    #[serde(default = "default_allocation")]
    pub default_allocation: f64,
}

fn default_allocation() -> f64 {
    crate::availability::DEFAULT_REQUESTED_ALLOCATION
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            default_allocation: default_allocation(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of neighbors returned when the caller does not pass `k`.
    #[serde(default = "default_k")]
    pub default_k: usize,

    /// Drop results scoring below this threshold.
    #[serde(default)]
    pub min_score: Option<f64>,
}

fn default_k() -> usize {
    3
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_k: default_k(),
            min_score: None,
        }
    }
}
