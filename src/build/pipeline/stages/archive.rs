//! Archive stage.

use crate::build::archive::archive_site;
use crate::build::pipeline::{PipelineContext, PipelineError, Stage};
use crate::build::source::SourceDocument;

/// Stage that zips the generated site into the configured archive.
pub struct ArchiveStage;

impl Stage for ArchiveStage {
    fn name(&self) -> &'static str {
        "archive"
    }

    fn process(
        &self,
        _docs: &[SourceDocument],
        ctx: &mut PipelineContext,
    ) -> Result<(), PipelineError> {
        let summary = archive_site(&ctx.layout.site_dir, &ctx.layout.archive_path)?;
        tracing::info!(
            "archived {} file(s) to {}",
            summary.entries,
            summary.path.display()
        );
        ctx.archive = Some(summary);
        Ok(())
    }
}
