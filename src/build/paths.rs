//! Path utilities.
//!
//! This module handles conversions between:
//! - Input document paths (relative paths within the input directory)
//! - Converted output paths (where the HTML lands in the output directory)
//! - Archive entry names (paths relative to the generated site root)

use std::path::{Path, PathBuf};

use crate::config::CompendiumConfig;

/// All absolute paths a single build touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Directory the input glob is matched against
    pub input_dir: PathBuf,
    /// Directory the converted HTML is written to (the generator's working directory)
    pub output_dir: PathBuf,
    /// Directory the generator renders the site into
    pub site_dir: PathBuf,
    /// Final archive, placed next to `site_dir`
    pub archive_path: PathBuf,
    /// Page template handed to the converter
    pub template: PathBuf,
}

impl Layout {
    /// Resolve the configured paths against `base_path`.
    ///
    /// `input_dir` and `output_dir` are relative to `base_path`; the template is
    /// relative to the input directory, like the inputs themselves.
    pub fn resolve(config: &CompendiumConfig, base_path: &Path) -> Self {
        let input_dir = resolve_against(base_path, &config.input_dir);
        let output_dir = resolve_against(base_path, &config.output_dir);
        let template = resolve_against(&input_dir, &config.converter.template);

        Self {
            site_dir: output_dir.join(&config.generator.site_dir),
            archive_path: output_dir.join(&config.archive.name),
            input_dir,
            output_dir,
            template,
        }
    }
}

/// Join `path` onto `base` unless it is already absolute.
fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        base.join(path)
    } else {
        path.to_path_buf()
    }
}

/// Convert an input-relative document path to its converted output path.
///
/// # Examples
/// ```ignore
/// html_output_path(Path::new("a.md"), out) => out/a.html
/// html_output_path(Path::new("notes/week 1.md"), out) => out/notes/week 1.html
/// ```
pub fn html_output_path(relative: &Path, output_dir: &Path) -> PathBuf {
    output_dir.join(relative.with_extension("html"))
}

/// Name of an archive entry for `path` under `root`, always with `/` separators.
///
/// Returns `None` if `path` is not under `root`.
pub fn archive_entry_name(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

/// Relative path with `/` separators, for glob matching.
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Get the base path from a config file path (its parent directory).
pub fn base_path_from_config(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
