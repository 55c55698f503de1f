//! Discovery of source files in the input directory.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Lists the CSV exports in a directory, sorted by filename.
pub fn discover_input_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Name a source file is known by in the store and the reports: its stem.
pub fn source_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lists_csv_files_sorted() {
        let dir = TempDir::new().unwrap();
        for name in ["SEPANG_2024.csv", "KLANG_2024.CSV", "notes.txt"] {
            std::fs::write(dir.path().join(name), "header\n").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.csv")).unwrap();

        let files = discover_input_files(dir.path()).unwrap();
        let names: Vec<String> = files.iter().map(|p| source_name(p)).collect();
        assert_eq!(names, vec!["KLANG_2024", "SEPANG_2024"]);
    }

    #[test]
    fn missing_directory() {
        let err = discover_input_files(Path::new("/nonexistent/screening")).unwrap_err();
        assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
    }
}
