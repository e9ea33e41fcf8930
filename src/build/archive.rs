//! Packaging the generated site into a zip archive.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use super::paths::archive_entry_name;

#[derive(thiserror::Error, Debug)]
pub enum ArchiveError {
    #[error("site directory does not exist: {0}")]
    MissingSite(PathBuf),

    #[error("failed to walk site directory {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("IO error on {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// What ended up in the archive.
#[derive(Debug, Clone)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    pub entries: usize,
}

/// Zip every regular file under `site_root` into `archive_path`.
///
/// Entry names are relative to `site_root`. Entries are written in file name
/// order with a fixed timestamp, so the same tree always yields the same
/// bytes. The archive is assembled in a temporary file next to
/// `archive_path` and only moved into place once it is complete; on failure
/// nothing is left at `archive_path`.
pub fn archive_site(
    site_root: &Path,
    archive_path: &Path,
) -> Result<ArchiveSummary, ArchiveError> {
    if !site_root.is_dir() {
        return Err(ArchiveError::MissingSite(site_root.to_path_buf()));
    }

    let parent = archive_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    std::fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;

    let mut staging = tempfile::Builder::new()
        .prefix(".compendium-")
        .suffix(".zip.partial")
        .tempfile_in(parent)
        .map_err(|e| io_error(parent, e))?;

    let mut zip = ZipWriter::new(staging.as_file_mut());
    let written = write_entries(&mut zip, site_root);
    // Always write the central directory, even if an entry failed
    let finished = zip.finish();
    let entries = written?;
    finished?;

    staging
        .persist(archive_path)
        .map_err(|e| io_error(archive_path, e.error))?;

    Ok(ArchiveSummary {
        path: archive_path.to_path_buf(),
        entries,
    })
}

fn write_entries<W: io::Write + io::Seek>(
    zip: &mut ZipWriter<W>,
    site_root: &Path,
) -> Result<usize, ArchiveError> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(0o644);

    let mut entries = 0;
    for entry in WalkDir::new(site_root).sort_by_file_name().follow_links(false) {
        let entry = entry.map_err(|e| ArchiveError::Walk {
            path: site_root.to_path_buf(),
            source: e,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(name) = archive_entry_name(entry.path(), site_root) else {
            continue;
        };

        tracing::debug!(entry = %name, "archiving");
        let mut file = File::open(entry.path()).map_err(|e| io_error(entry.path(), e))?;
        zip.start_file(name, options)?;
        io::copy(&mut file, &mut *zip).map_err(|e| io_error(entry.path(), e))?;
        entries += 1;
    }

    Ok(entries)
}

fn io_error(path: &Path, source: io::Error) -> ArchiveError {
    ArchiveError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::io::Read;

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn read_archive(path: &Path) -> BTreeMap<String, String> {
        let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
        let mut entries = BTreeMap::new();
        for i in 0..archive.len() {
            let mut file = archive.by_index(i).unwrap();
            let mut content = String::new();
            file.read_to_string(&mut content).unwrap();
            entries.insert(file.name().to_string(), content);
        }
        entries
    }

    #[test]
    fn test_archive_contains_every_file_relative_to_root() {
        let dir = tempfile::TempDir::new().unwrap();
        let site = dir.path().join("_site");
        write(&site.join("index.html"), "home");
        write(&site.join("a/index.html"), "page a");
        write(&site.join("assets/img/logo.svg"), "<svg/>");
        std::fs::create_dir_all(site.join("empty")).unwrap();

        let archive_path = dir.path().join("_render_site.zip");
        let summary = archive_site(&site, &archive_path).unwrap();
        assert_eq!(summary.entries, 3);

        let entries = read_archive(&archive_path);
        let expected: BTreeMap<String, String> = [
            ("a/index.html", "page a"),
            ("assets/img/logo.svg", "<svg/>"),
            ("index.html", "home"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(entries, expected);
    }

    #[test]
    fn test_archive_is_byte_identical_across_runs() {
        let dir = tempfile::TempDir::new().unwrap();
        let site = dir.path().join("_site");
        write(&site.join("index.html"), "home");
        write(&site.join("b/index.html"), "b");
        write(&site.join("a/index.html"), "a");

        let archive_path = dir.path().join("site.zip");
        archive_site(&site, &archive_path).unwrap();
        let first = std::fs::read(&archive_path).unwrap();

        archive_site(&site, &archive_path).unwrap();
        let second = std::fs::read(&archive_path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_site_produces_no_archive() {
        let dir = tempfile::TempDir::new().unwrap();
        let archive_path = dir.path().join("site.zip");

        let err = archive_site(&dir.path().join("_site"), &archive_path).unwrap_err();
        assert!(matches!(err, ArchiveError::MissingSite(_)));
        assert!(!archive_path.exists());
    }

    #[test]
    fn test_no_staging_files_left_behind() {
        let dir = tempfile::TempDir::new().unwrap();
        let site = dir.path().join("_site");
        write(&site.join("index.html"), "home");

        archive_site(&site, &dir.path().join("site.zip")).unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".partial"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_empty_site_yields_empty_archive() {
        let dir = tempfile::TempDir::new().unwrap();
        let site = dir.path().join("_site");
        std::fs::create_dir_all(&site).unwrap();

        let archive_path = dir.path().join("site.zip");
        let summary = archive_site(&site, &archive_path).unwrap();
        assert_eq!(summary.entries, 0);
        assert!(read_archive(&archive_path).is_empty());
    }
}
