use std::collections::HashMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use wax::{CandidatePath, Glob, Pattern};

use super::paths::{Layout, html_output_path, to_forward_slashes};

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("input path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("input path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("invalid glob '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    #[error("failed to read directory entry in {path}: {source}")]
    ReadEntry {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("{first} and {second} would both be converted to {output}")]
    DuplicateOutput {
        first: PathBuf,
        second: PathBuf,
        output: PathBuf,
    },
}

// =============================================================================
// Source documents
// =============================================================================

/// A markdown document discovered in the input directory, paired with the
/// HTML file the converter will write for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Absolute path of the markdown input
    pub input: PathBuf,
    /// Path relative to the input directory (e.g. "a.md")
    pub relative: PathBuf,
    /// Absolute path of the converted HTML
    pub output: PathBuf,
}

/// Find every document matching `pattern` in the input directory.
///
/// Documents come back sorted by path. Anything under the output directory is
/// skipped so converted output is never fed back in, and so are hidden
/// files and directories.
pub fn discover_documents(
    layout: &Layout,
    pattern: &str,
) -> Result<Vec<SourceDocument>, SourceError> {
    let matches = find_matches(&layout.input_dir, pattern, &layout.output_dir, false)?;

    let mut seen: HashMap<PathBuf, PathBuf> = HashMap::new();
    let mut documents = Vec::with_capacity(matches.len());

    for relative in matches {
        if is_hidden(&relative) {
            tracing::debug!("skipping hidden file {}", relative.display());
            continue;
        }
        let output = html_output_path(&relative, &layout.output_dir);
        if let Some(first) = seen.insert(output.clone(), relative.clone()) {
            return Err(SourceError::DuplicateOutput {
                first,
                second: relative,
                output,
            });
        }
        documents.push(SourceDocument {
            input: layout.input_dir.join(&relative),
            relative,
            output,
        });
    }

    Ok(documents)
}

/// True if any component of `relative` is a dotfile or dot-directory.
///
/// `.md` has no extension as far as `Path` is concerned, so it would become
/// `.md.html` rather than a page.
fn is_hidden(relative: &Path) -> bool {
    relative
        .components()
        .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
}

/// Walk `root` and return the root-relative paths matching `pattern`.
///
/// Only regular files are returned unless `include_dirs` is set. Entries under
/// `exclude` are never visited. A pattern without `/` or `**` only looks at
/// the top level of `root`.
pub fn find_matches(
    root: &Path,
    pattern: &str,
    exclude: &Path,
    include_dirs: bool,
) -> Result<Vec<PathBuf>, SourceError> {
    if !root.exists() {
        return Err(SourceError::PathNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(SourceError::NotADirectory(root.to_path_buf()));
    }

    let glob = Glob::new(pattern).map_err(|e| SourceError::InvalidGlob {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;

    let mut walker = WalkDir::new(root).min_depth(1).follow_links(false);
    if !pattern.contains('/') && !pattern.contains("**") {
        walker = walker.max_depth(1);
    }

    let mut matches = Vec::new();
    for entry in walker.into_iter().filter_entry(|e| !e.path().starts_with(exclude)) {
        let entry = entry.map_err(|e| SourceError::ReadEntry {
            path: root.to_path_buf(),
            source: e,
        })?;

        let file_type = entry.file_type();
        if !(file_type.is_file() || (include_dirs && file_type.is_dir())) {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let normalized = to_forward_slashes(relative);
        let candidate = CandidatePath::from(normalized.as_str());
        if glob.matched(&candidate).is_some() {
            matches.push(relative.to_path_buf());
        }
    }

    matches.sort();
    Ok(matches)
}
