//! Pipeline error types.

use crate::build::archive::ArchiveError;
use crate::build::source::SourceError;
use crate::build::tool::ToolError;

/// Errors that can occur during pipeline processing.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("external tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("archive error: {0}")]
    Archive(#[from] ArchiveError),

    #[error("asset error: {0}")]
    Source(#[from] SourceError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stage '{stage}' failed: {message}")]
    Stage { stage: String, message: String },
}

impl PipelineError {
    /// Create a stage-specific error.
    pub fn stage(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Stage {
            stage: stage.into(),
            message: message.into(),
        }
    }
}
