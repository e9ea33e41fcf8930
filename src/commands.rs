pub mod build;
pub mod check;
pub mod clean;
pub mod init;

use std::path::{Path, PathBuf};

use crate::build::base_path_from_config;
use crate::build::tool::ToolError;
use crate::config::{CompendiumConfig, resolve_config_path};

/// Load the config named on the command line (default `compendium.yaml`).
///
/// Returns the config and the directory relative paths in it resolve against.
fn load_config(config_file: Option<&Path>) -> Result<(CompendiumConfig, PathBuf), anyhow::Error> {
    let config_path = resolve_config_path(config_file)?;
    let config = CompendiumConfig::load_from_arg(config_file)?;
    if !config_path.exists() {
        tracing::debug!("no config file at {}, using defaults", config_path.display());
    }

    Ok((config, base_path_from_config(&config_path)))
}

/// Process exit code for a failed command: a failing external tool's own
/// exit code when there is one, otherwise 1.
pub fn exit_code(error: &anyhow::Error) -> u8 {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<ToolError>())
        .map(ToolError::exit_code)
        .and_then(|code| u8::try_from(code).ok())
        .unwrap_or(1)
}
