//! Markdown conversion stage.
//!
//! Runs the converter once per discovered document, one after another.

use std::ffi::OsString;
use std::path::Path;

use crate::build::pipeline::{PipelineContext, PipelineError, Stage};
use crate::build::source::SourceDocument;
use crate::build::tool::Invocation;
use crate::config::ConverterConfig;

/// Flags passed to the converter for every document: standalone output,
/// markdown in, HTML5 out, KaTeX math, and a table of contents.
const CONVERTER_FLAGS: &[&str] = &["-s", "-f", "markdown", "-t", "html5", "--katex", "--toc"];

/// Stage that converts each markdown document into an HTML file in the
/// output directory.
///
/// The first conversion that fails aborts the stage; later documents are not
/// attempted.
pub struct ConvertStage;

impl Stage for ConvertStage {
    fn name(&self) -> &'static str {
        "convert"
    }

    fn process(
        &self,
        docs: &[SourceDocument],
        ctx: &mut PipelineContext,
    ) -> Result<(), PipelineError> {
        std::fs::create_dir_all(&ctx.layout.output_dir)?;

        for doc in docs {
            if let Some(parent) = doc.output.parent() {
                std::fs::create_dir_all(parent)?;
            }

            tracing::info!(
                "converting {} -> {}",
                doc.relative.display(),
                doc.output.display()
            );
            converter_invocation(
                &ctx.config.converter,
                &ctx.layout.template,
                &ctx.layout.input_dir,
                doc,
            )
            .run()?;
            ctx.converted += 1;
        }

        Ok(())
    }
}

/// Build the converter command line for one document.
fn converter_invocation(
    converter: &ConverterConfig,
    template: &Path,
    input_dir: &Path,
    doc: &SourceDocument,
) -> Invocation {
    let mut template_flag = OsString::from("--template=");
    template_flag.push(template);

    Invocation::new(converter.program.as_str())
        .args(&converter.args)
        .args(CONVERTER_FLAGS)
        .arg(template_flag)
        .arg(&doc.input)
        .arg("-o")
        .arg(&doc.output)
        .current_dir(input_dir)
}
