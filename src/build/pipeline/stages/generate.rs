//! Site generation stage.

use crate::build::pipeline::{PipelineContext, PipelineError, Stage};
use crate::build::source::SourceDocument;
use crate::build::tool::Invocation;
use crate::util::remove_dir_if_exists;

/// Stage that runs the static-site generator in the output directory.
///
/// Any site directory left over from a previous run is removed first so the
/// generator never sees stale output.
pub struct GenerateStage;

impl Stage for GenerateStage {
    fn name(&self) -> &'static str {
        "generate"
    }

    fn process(
        &self,
        _docs: &[SourceDocument],
        ctx: &mut PipelineContext,
    ) -> Result<(), PipelineError> {
        let layout = ctx.layout;
        let generator = &ctx.config.generator;

        if remove_dir_if_exists(&layout.site_dir)? {
            tracing::info!("removed stale site {}", layout.site_dir.display());
        }

        Invocation::new(generator.program.as_str())
            .args(&generator.args)
            .current_dir(&layout.output_dir)
            .run()?;

        if !layout.site_dir.is_dir() {
            return Err(PipelineError::stage(
                "generate",
                format!(
                    "generator finished but did not create {}",
                    layout.site_dir.display()
                ),
            ));
        }

        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::build::paths::Layout;
    use crate::config::CompendiumConfig;

    fn config_with_generator(script: &str) -> CompendiumConfig {
        let mut config = CompendiumConfig::default();
        config.generator.program = "sh".to_string();
        config.generator.args = vec!["-c".to_string(), script.to_string()];
        config
    }

    #[test]
    fn test_stale_site_removed_before_generation() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = config_with_generator(
            "test ! -e _site/stale.html && mkdir -p _site && echo new > _site/index.html",
        );
        let layout = Layout::resolve(&config, dir.path());
        std::fs::create_dir_all(&layout.site_dir).unwrap();
        std::fs::write(layout.site_dir.join("stale.html"), "old").unwrap();

        let mut ctx = PipelineContext::new(&layout, &config);
        GenerateStage.process(&[], &mut ctx).unwrap();

        assert!(!layout.site_dir.join("stale.html").exists());
        assert!(layout.site_dir.join("index.html").exists());
    }

    #[test]
    fn test_generator_failure_is_tool_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = config_with_generator("exit 2");
        let layout = Layout::resolve(&config, dir.path());
        std::fs::create_dir_all(&layout.output_dir).unwrap();

        let mut ctx = PipelineContext::new(&layout, &config);
        let err = GenerateStage.process(&[], &mut ctx).unwrap_err();
        match err {
            PipelineError::Tool(tool) => assert_eq!(tool.exit_code(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_site_after_generation() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = config_with_generator("true");
        let layout = Layout::resolve(&config, dir.path());
        std::fs::create_dir_all(&layout.output_dir).unwrap();

        let mut ctx = PipelineContext::new(&layout, &config);
        let err = GenerateStage.process(&[], &mut ctx).unwrap_err();
        assert!(matches!(err, PipelineError::Stage { .. }));
    }
}
