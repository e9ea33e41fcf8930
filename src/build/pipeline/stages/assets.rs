//! Asset copying stage.
//!
//! Copies files matched by the configured asset globs from the input
//! directory into the output directory, so the site generator finds them
//! next to the converted HTML.

use std::path::Path;

use walkdir::WalkDir;

use crate::build::pipeline::{PipelineContext, PipelineError, Stage};
use crate::build::source::{SourceDocument, find_matches};

/// Stage that copies asset files and directories into the output directory,
/// keeping their input-relative paths.
pub struct AssetsStage;

impl Stage for AssetsStage {
    fn name(&self) -> &'static str {
        "assets"
    }

    fn process(
        &self,
        _docs: &[SourceDocument],
        ctx: &mut PipelineContext,
    ) -> Result<(), PipelineError> {
        let layout = ctx.layout;

        for pattern in &ctx.config.assets {
            let matches = find_matches(&layout.input_dir, pattern, &layout.output_dir, true)?;
            if matches.is_empty() {
                tracing::warn!(pattern = %pattern, "asset glob matched nothing");
            }

            for relative in matches {
                let source = layout.input_dir.join(&relative);
                let target = layout.output_dir.join(&relative);
                let copied = copy_recursive(&source, &target)?;
                tracing::info!("copied {} ({} file(s))", relative.display(), copied);
                ctx.assets_copied += copied;
            }
        }

        Ok(())
    }
}

/// Copy a file, or a directory tree, to `target`. Returns the number of
/// files copied.
fn copy_recursive(source: &Path, target: &Path) -> Result<usize, PipelineError> {
    if source.is_file() {
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(source, target)?;
        return Ok(1);
    }

    let mut copied = 0;
    for entry in WalkDir::new(source).follow_links(false) {
        let entry = entry.map_err(|e| PipelineError::stage("assets", e.to_string()))?;
        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let destination = target.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&destination)?;
        } else if entry.file_type().is_file() {
            std::fs::copy(entry.path(), &destination)?;
            copied += 1;
        }
    }
    Ok(copied)
}
