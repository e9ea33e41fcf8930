//! Configuration loading and types for compendium.
//!
//! This module handles all aspects of configuration:
//! - Type definitions for config structures (`types`)
//! - Loading configs from files and the environment (`load`)

mod load;
mod types;

use std::path::{Component, Path, PathBuf};

pub use load::{DEFAULT_CONFIG_FILE, resolve_config_path};
pub use types::{CompendiumConfig, ConverterConfig};

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to deserialize config: {0}")]
    Deserialize(#[from] config::ConfigError),

    #[error("failed to get current working directory: {0}")]
    CwdFailure(std::io::Error),

    #[error("{0}")]
    Validation(String),
}

// =============================================================================
// Validation
// =============================================================================

impl CompendiumConfig {
    /// Check the settings that the pipeline relies on being well formed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_glob.trim().is_empty() {
            return Err(ConfigError::Validation(
                "invalid config: 'input_glob' must not be empty".to_string(),
            ));
        }
        if self.converter.program.trim().is_empty() {
            return Err(ConfigError::Validation(
                "invalid config: 'converter.program' must not be empty".to_string(),
            ));
        }
        if self.generator.program.trim().is_empty() {
            return Err(ConfigError::Validation(
                "invalid config: 'generator.program' must not be empty".to_string(),
            ));
        }
        if !is_plain_name(&self.generator.site_dir) {
            return Err(ConfigError::Validation(format!(
                "invalid config: 'generator.site_dir' must be a single directory name, got '{}'",
                self.generator.site_dir
            )));
        }
        if !is_plain_name(&self.archive.name) {
            return Err(ConfigError::Validation(format!(
                "invalid config: 'archive.name' must be a file name, got '{}'",
                self.archive.name
            )));
        }
        Ok(())
    }
}

/// True if `name` is exactly one normal path component ("_site", not "a/b" or "..").
fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
