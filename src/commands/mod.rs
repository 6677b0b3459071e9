//! CLI command implementations.
//!
//! Each submodule handles one command with its configuration and execution
//! logic:
//! - **analyze**: run the full regional analysis and render a report
//! - **trend**: report per-region Mann-Kendall trends only
//! - **init**: write a default configuration file

pub mod analyze;
pub mod init;
pub mod trend;

pub use analyze::{handle_analyze, AnalyzeConfig};
pub use init::init_config;
pub use trend::{handle_trend, TrendConfig};

use crate::config::RegionConfig;
use anyhow::{Context, Result};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "forestwatch.toml";

/// Resolve the configuration: an explicit path must load, the default file
/// is used when present, and built-in defaults apply otherwise.
pub(crate) fn load_region_config(path: Option<&Path>) -> Result<RegionConfig> {
    match path {
        Some(explicit) => RegionConfig::from_toml_file(explicit)
            .with_context(|| format!("loading configuration from {}", explicit.display())),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                log::info!("using {DEFAULT_CONFIG_FILE}");
                RegionConfig::from_toml_file(default_path)
                    .with_context(|| format!("loading configuration from {DEFAULT_CONFIG_FILE}"))
            } else {
                log::info!("no {DEFAULT_CONFIG_FILE} found, using built-in defaults");
                Ok(RegionConfig::default())
            }
        }
    }
}
