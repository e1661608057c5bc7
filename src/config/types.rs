use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::modal::ResolutionPolicy;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Defaults applied when a script or the command line leaves them open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    /// Policy for `present` steps that do not name one.
    #[serde(default)]
    pub policy: ResolutionPolicy,
    /// Tracing filter used when `RUST_LOG` is unset (e.g. "warn", "waymark=debug").
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Upper bound on steps per script (default: 10000).
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
}

/// Transcript output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_max_steps() -> usize {
    10_000
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            policy: ResolutionPolicy::default(),
            log_level: default_log_level(),
            max_steps: default_max_steps(),
        }
    }
}
