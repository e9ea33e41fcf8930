use std::path::PathBuf;

use crate::config::CompendiumConfig;
use crate::util::remove_file_if_exists;

use super::paths::Layout;
use super::pipeline::{Pipeline, PipelineContext, PipelineError};
use super::source::{SourceError, discover_documents};

#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    #[error("{0}")]
    Pipeline(#[from] PipelineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug)]
pub struct BuildResult {
    pub output_dir: PathBuf,
    pub archive_path: PathBuf,
    pub documents: usize,
    pub assets: usize,
    pub archive_entries: usize,
}

pub struct Builder {
    config: CompendiumConfig,
    layout: Layout,
}

impl Builder {
    pub fn new(config: CompendiumConfig, layout: Layout) -> Self {
        Self { config, layout }
    }

    /// Run a full build. Blocks until every external tool has finished.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        // Build pipeline:
        // 1. Remove the previous archive so a failed run leaves none behind
        // 2. Discover input documents
        // 3. Convert -> copy assets -> generate -> archive

        if remove_file_if_exists(&self.layout.archive_path)? {
            tracing::debug!("removed previous archive {}", self.layout.archive_path.display());
        }

        let documents = discover_documents(&self.layout, &self.config.input_glob)?;
        tracing::info!(
            "found {} document(s) matching '{}' in {}",
            documents.len(),
            self.config.input_glob,
            self.layout.input_dir.display()
        );

        let pipeline = Pipeline::default_pipeline();
        let mut ctx = PipelineContext::new(&self.layout, &self.config);
        pipeline.run(&documents, &mut ctx)?;

        let archive_entries = ctx.archive.as_ref().map_or(0, |a| a.entries);
        Ok(BuildResult {
            output_dir: self.layout.output_dir.clone(),
            archive_path: self.layout.archive_path.clone(),
            documents: ctx.converted,
            assets: ctx.assets_copied,
            archive_entries,
        })
    }
}
