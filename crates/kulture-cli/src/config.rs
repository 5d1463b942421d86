//! CLI configuration from environment variables.

use kulture_ranking::WORST_TAKES_LIMIT;
use thiserror::Error;

/// Invalid configuration value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}={value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Report settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Maximum rows in the worst-takes report
    pub worst_takes_limit: usize,

    /// Ancestor levels kept per take before verification (None = all).
    /// Mirrors loaders that only fetch a fixed number of parents.
    pub max_chain_depth: Option<usize>,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            worst_takes_limit: WORST_TAKES_LIMIT,
            max_chain_depth: None,
            pretty: false,
        }
    }
}

impl CliConfig {
    /// Create config from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let worst_takes_limit = match lookup("KULTURE_WORST_TAKES_LIMIT") {
            Some(value) => parse_count("KULTURE_WORST_TAKES_LIMIT", &value)?,
            None => defaults.worst_takes_limit,
        };

        let max_chain_depth = match lookup("KULTURE_MAX_CHAIN_DEPTH") {
            Some(value) if value.trim().is_empty() => None,
            Some(value) => {
                let depth = parse_count("KULTURE_MAX_CHAIN_DEPTH", &value)?;
                if depth == 0 {
                    return Err(ConfigError::Invalid {
                        var: "KULTURE_MAX_CHAIN_DEPTH",
                        value,
                        reason: "must keep at least the take's own kulture".into(),
                    });
                }
                Some(depth)
            }
            None => defaults.max_chain_depth,
        };

        let pretty = match lookup("KULTURE_PRETTY") {
            Some(value) => parse_flag("KULTURE_PRETTY", &value)?,
            None => defaults.pretty,
        };

        Ok(Self {
            worst_takes_limit,
            max_chain_depth,
            pretty,
        })
    }
}

fn parse_count(var: &'static str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value: value.to_string(),
            reason: "expected a boolean".into(),
        }),
    }
}
