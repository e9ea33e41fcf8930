//! Build pipeline for rendering a site.
//!
//! The pipeline runs a fixed series of stages, each starting only after the
//! previous one succeeded:
//! 1. Convert (one converter process per markdown document)
//! 2. Assets (copy extra files next to the converted HTML)
//! 3. Generate (clear the stale site, run the site generator)
//! 4. Archive (zip the generated site)
//!
//! Stages talk to each other only through the file system.

mod context;
mod error;
mod stages;

pub use context::PipelineContext;
pub use error::PipelineError;

use stages::{ArchiveStage, AssetsStage, ConvertStage, GenerateStage};

use super::source::SourceDocument;

/// A stage in the build pipeline.
///
/// Every stage sees the full list of discovered documents; most only need
/// the paths in `ctx.layout`.
pub trait Stage: Send + Sync {
    /// Unique name for this stage (used in logs and errors).
    fn name(&self) -> &'static str;

    /// Run this stage to completion.
    fn process(
        &self,
        docs: &[SourceDocument],
        ctx: &mut PipelineContext,
    ) -> Result<(), PipelineError>;
}

/// The build pipeline.
///
/// The default pipeline is: convert → assets → generate → archive.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// Create an empty pipeline with no stages.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Create the default pipeline with standard stages.
    pub fn default_pipeline() -> Self {
        let mut pipeline = Self::new();
        pipeline.add_stage(ConvertStage);
        pipeline.add_stage(AssetsStage);
        pipeline.add_stage(GenerateStage);
        pipeline.add_stage(ArchiveStage);
        pipeline
    }

    /// Add a stage to the end of the pipeline.
    pub fn add_stage<S: Stage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Run every stage in order, stopping at the first failure.
    pub fn run(
        &self,
        docs: &[SourceDocument],
        ctx: &mut PipelineContext,
    ) -> Result<(), PipelineError> {
        for stage in &self.stages {
            tracing::info!(stage = stage.name(), "running stage");
            stage.process(docs, ctx)?;
        }
        Ok(())
    }

    /// Get the names of all stages in order.
    #[cfg(test)]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }
}
