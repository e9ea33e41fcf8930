use std::path::PathBuf;

use crate::{
    CleanArgs,
    build::{Layout, source::discover_documents},
    config::CompendiumConfig,
};

pub async fn run(args: &CleanArgs) -> Result<(), anyhow::Error> {
    let (config, base_path) = super::load_config(args.config_file.as_deref())?;
    let layout = Layout::resolve(&config, &base_path);

    clean(&config, &layout, args.dry_run).await?;
    Ok(())
}

/// Delete the generated site, the converted pages and the archive.
///
/// Returns the paths that were deleted (or would be, with `dry_run`).
async fn clean(
    config: &CompendiumConfig,
    layout: &Layout,
    dry_run: bool,
) -> Result<Vec<PathBuf>, anyhow::Error> {
    let mut removed = Vec::new();

    // Converted pages for documents that still exist; a missing input
    // directory just means there are none to find
    let mut pages: Vec<PathBuf> = match discover_documents(layout, &config.input_glob) {
        Ok(docs) => docs.into_iter().map(|doc| doc.output).collect(),
        Err(e) => {
            tracing::warn!("not removing converted pages: {e}");
            Vec::new()
        }
    };
    pages.push(layout.archive_path.clone());

    // Delete the generated site folder
    if layout.site_dir.exists() {
        if dry_run {
            println!("Would delete {}", layout.site_dir.display());
        } else {
            tokio::fs::remove_dir_all(&layout.site_dir).await?;
            println!("Deleted {}", layout.site_dir.display());
        }
        removed.push(layout.site_dir.clone());
    }

    // Delete converted pages and the archive
    for path in pages {
        if !path.exists() {
            continue;
        }
        if dry_run {
            println!("Would delete {}", path.display());
        } else {
            tokio::fs::remove_file(&path).await?;
            println!("Deleted {}", path.display());
        }
        removed.push(path);
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    /// A project with one note that has already been built.
    fn built_project(dir: &Path) -> (CompendiumConfig, Layout) {
        let config = CompendiumConfig::default();
        let layout = Layout::resolve(&config, dir);
        write(&dir.join("a.md"), "# A\n");
        write(&layout.output_dir.join("a.html"), "<h1>A</h1>");
        write(&layout.output_dir.join("orphan.html"), "<h1>gone</h1>");
        write(&layout.site_dir.join("a/index.html"), "<h1>A</h1>");
        write(&layout.archive_path, "zip");
        (config, layout)
    }

    #[tokio::test]
    async fn test_clean_removes_build_outputs() {
        let dir = tempfile::TempDir::new().unwrap();
        let (config, layout) = built_project(dir.path());

        let removed = clean(&config, &layout, false).await.unwrap();

        assert_eq!(
            removed,
            vec![
                layout.site_dir.clone(),
                layout.output_dir.join("a.html"),
                layout.archive_path.clone(),
            ]
        );
        assert!(!layout.site_dir.exists());
        assert!(!layout.output_dir.join("a.html").exists());
        assert!(!layout.archive_path.exists());
        // Inputs and pages without a source document are left alone
        assert!(dir.path().join("a.md").exists());
        assert!(layout.output_dir.join("orphan.html").exists());
    }

    #[tokio::test]
    async fn test_dry_run_deletes_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let (config, layout) = built_project(dir.path());

        let removed = clean(&config, &layout, true).await.unwrap();

        assert_eq!(removed.len(), 3);
        assert!(layout.site_dir.join("a/index.html").exists());
        assert!(layout.output_dir.join("a.html").exists());
        assert!(layout.archive_path.exists());
    }

    #[tokio::test]
    async fn test_clean_without_build_is_noop() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = CompendiumConfig::default();
        let layout = Layout::resolve(&config, dir.path());

        let removed = clean(&config, &layout, false).await.unwrap();
        assert!(removed.is_empty());
    }
}
