//! Configuration for the `waymark` command line.
//!
//! The coordinator core takes no configuration beyond its initial screen;
//! these settings only drive the script runner and logging.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, Defaults, OutputConfig, OutputFormat};
