//! Data directory discovery.

use std::fs;
use std::path::Path;

use crate::types::{LoaderError, LoaderResult, RefbookFiles};

/// File extensions recognised as tab-separated data files.
const DATA_EXTENSIONS: &[&str] = &["tsv", "txt"];

/// Discovers refbook data files in a directory.
///
/// Looks for files whose names start with `refbooks`, `versions` and
/// `elements` (case-insensitive) and end in `.tsv` or `.txt`. When several
/// files share a prefix the lexicographically last one wins, so dated
/// exports like `elements_20240101.tsv` resolve to the newest.
pub fn discover_refbook_files<P: AsRef<Path>>(path: P) -> LoaderResult<RefbookFiles> {
    let path = path.as_ref();

    if !path.is_dir() {
        return Err(LoaderError::DirectoryNotFound {
            path: path.display().to_string(),
        });
    }

    let mut entries: Vec<_> = fs::read_dir(path)?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|p| p.is_file())
        .collect();
    entries.sort();

    let mut files = RefbookFiles::new();

    for entry in entries {
        let Some(filename) = entry.file_name().map(|f| f.to_string_lossy().to_lowercase()) else {
            continue;
        };

        if !has_data_extension(&filename) {
            continue;
        }

        if filename.starts_with("refbooks") {
            files.refbook_file = Some(entry);
        } else if filename.starts_with("versions") {
            files.version_file = Some(entry);
        } else if filename.starts_with("elements") {
            files.element_file = Some(entry);
        }
    }

    if !files.has_required_files() {
        return Err(LoaderError::RequiredFileMissing {
            file_type: files.missing_files().join(", "),
            directory: path.display().to_string(),
        });
    }

    Ok(files)
}

fn has_data_extension(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| DATA_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}
