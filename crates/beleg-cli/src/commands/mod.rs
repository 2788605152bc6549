//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod process;
pub mod validate;

use std::path::Path;

use beleg_core::BelegConfig;

/// Load the configuration from `path`, or the defaults when none is given.
pub fn load_config(path: Option<&str>) -> anyhow::Result<BelegConfig> {
    match path {
        Some(path) => Ok(BelegConfig::from_file(Path::new(path))?),
        None => Ok(BelegConfig::default()),
    }
}
