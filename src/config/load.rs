//! Configuration loading from files and the environment.
//!
//! Layers, lowest priority first: built-in defaults, the YAML config file,
//! then `COMPENDIUM_*` environment variables.

use std::path::{Path, PathBuf};

use super::{CompendiumConfig, ConfigError};

/// Environment variable prefix, e.g. `COMPENDIUM_INPUT_GLOB`.
const ENV_PREFIX: &str = "COMPENDIUM";

/// Config file looked up in the current directory when none is named.
pub const DEFAULT_CONFIG_FILE: &str = "compendium.yaml";

impl CompendiumConfig {
    /// Load the config from the command line argument.
    ///
    /// A file named on the command line must exist. Without one,
    /// `compendium.yaml` in the current directory is used if present.
    pub fn load_from_arg(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let required = config_file.is_some();
        let config_file = resolve_config_path(config_file)?;
        Self::load_from_file(&config_file, required)
    }

    /// Load the config from a file path, layered under the process environment.
    fn load_from_file(path: &Path, required: bool) -> Result<Self, ConfigError> {
        Self::load_with_env(path, required, None)
    }

    /// Load the config with `env` standing in for the process environment.
    /// `None` reads the real environment.
    pub(crate) fn load_with_env(
        path: &Path,
        required: bool,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        if required && !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(required))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("assets")
                    .with_list_parse_key("converter.args")
                    .with_list_parse_key("generator.args")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let config: CompendiumConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

/// Absolute path of the config file, defaulting to `compendium.yaml` and
/// resolving relative paths against the current directory.
pub fn resolve_config_path(config_file: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let config_file = config_file.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
    if config_file.is_relative() {
        Ok(std::env::current_dir()
            .map_err(ConfigError::CwdFailure)?
            .join(config_file))
    } else {
        Ok(config_file.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> Option<config::Map<String, String>> {
        Some(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("compendium.yaml");
        std::fs::write(&path, "input_glob: \"notes/*.md\"\nconverter:\n  program: pandoc2\n")
            .unwrap();

        let config = CompendiumConfig::load_with_env(
            &path,
            true,
            env(&[("COMPENDIUM_CONVERTER__PROGRAM", "pandoc3")]),
        )
        .unwrap();
        assert_eq!(config.converter.program, "pandoc3");
        assert_eq!(config.input_glob, "notes/*.md");
    }

    #[test]
    fn test_env_lists_are_split_on_commas() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = CompendiumConfig::load_with_env(
            &dir.path().join("compendium.yaml"),
            false,
            env(&[
                ("COMPENDIUM_GENERATOR__ARGS", "@11ty/eleventy,--quiet"),
                ("COMPENDIUM_CONVERTER__ARGS", "run,pandoc/core"),
                ("COMPENDIUM_ASSETS", "img,*.css"),
                ("COMPENDIUM_OUTPUT_DIR", "build"),
            ]),
        )
        .unwrap();
        assert_eq!(config.generator.args, vec!["@11ty/eleventy", "--quiet"]);
        assert_eq!(config.converter.args, vec!["run", "pandoc/core"]);
        assert_eq!(config.assets, vec!["img", "*.css"]);
        assert_eq!(config.output_dir, Path::new("build"));
    }

    #[test]
    fn test_unrelated_env_ignored() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = CompendiumConfig::load_with_env(
            &dir.path().join("compendium.yaml"),
            false,
            env(&[("OTHER_CONVERTER__PROGRAM", "nope"), ("PATH", "/bin")]),
        )
        .unwrap();
        assert_eq!(config.converter.program, "pandoc");
    }

    #[test]
    fn test_named_config_file_must_exist() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("typo.yaml");

        let err = CompendiumConfig::load_from_arg(Some(missing.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(ref p) if p == &missing));
    }

    #[test]
    fn test_resolve_config_path() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(
            resolve_config_path(None).unwrap(),
            cwd.join(DEFAULT_CONFIG_FILE)
        );
        assert_eq!(
            resolve_config_path(Some(Path::new("site/c.yaml"))).unwrap(),
            cwd.join("site/c.yaml")
        );
        assert_eq!(
            resolve_config_path(Some(Path::new("/etc/c.yaml"))).unwrap(),
            Path::new("/etc/c.yaml")
        );
    }
}
