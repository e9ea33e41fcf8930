//! Pipeline context for sharing state across stages.

use crate::build::archive::ArchiveSummary;
use crate::build::paths::Layout;
use crate::config::CompendiumConfig;

/// Shared context for pipeline stages.
///
/// Holds the resolved paths and tool settings, and collects what each stage
/// produced for the final build summary.
pub struct PipelineContext<'a> {
    /// Resolved paths for this build
    pub layout: &'a Layout,

    /// Tool and asset settings
    pub config: &'a CompendiumConfig,

    /// Documents successfully converted so far
    pub converted: usize,

    /// Asset files copied into the output directory
    pub assets_copied: usize,

    /// Set once the archive stage has written the archive
    pub archive: Option<ArchiveSummary>,
}

impl<'a> PipelineContext<'a> {
    pub fn new(layout: &'a Layout, config: &'a CompendiumConfig) -> Self {
        Self {
            layout,
            config,
            converted: 0,
            assets_copied: 0,
            archive: None,
        }
    }
}
