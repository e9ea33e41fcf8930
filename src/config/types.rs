//! Configuration type definitions.
//!
//! This module contains all the data structures used in compendium
//! configuration files. These types are pure data - no I/O.
//!
//! Every field has a default, so an empty (or missing) config file yields the
//! stock pandoc + eleventy setup.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// =============================================================================
// Root config
// =============================================================================

/// Full compendium configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompendiumConfig {
    /// Directory holding the markdown inputs
    pub input_dir: PathBuf,
    /// Glob (relative to `input_dir`) selecting the documents to convert
    pub input_glob: String,
    /// Directory the converted HTML is written to; the generator runs here
    pub output_dir: PathBuf,
    /// Extra globs (relative to `input_dir`) copied into `output_dir`
    /// before the generator runs
    pub assets: Vec<String>,
    pub converter: ConverterConfig,
    pub generator: GeneratorConfig,
    pub archive: ArchiveConfig,
}

impl Default for CompendiumConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            input_glob: "*.md".to_string(),
            output_dir: PathBuf::from("output"),
            assets: Vec::new(),
            converter: ConverterConfig::default(),
            generator: GeneratorConfig::default(),
            archive: ArchiveConfig::default(),
        }
    }
}

// =============================================================================
// Tools
// =============================================================================

/// The document converter. The program, any launcher arguments and the page
/// template can be changed; the conversion flags passed to it are fixed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub program: String,
    /// Arguments placed before the conversion flags (e.g. for `docker run`)
    pub args: Vec<String>,
    /// Page template, resolved against `input_dir` when relative
    pub template: PathBuf,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            program: "pandoc".to_string(),
            args: Vec::new(),
            template: PathBuf::from("_toc.html"),
        }
    }
}

/// The static-site generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub program: String,
    pub args: Vec<String>,
    /// Name of the directory (inside `output_dir`) the generator renders into
    pub site_dir: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            program: "npx".to_string(),
            args: vec!["eleventy".to_string()],
            site_dir: "_site".to_string(),
        }
    }
}

// =============================================================================
// Packaging
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// File name of the archive, written next to the site directory
    pub name: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            name: "_render_site.zip".to_string(),
        }
    }
}
