//! Directory scanner for task root folders.
//!
//! Lists the immediate children of a directory, keeps files whose extension
//! is on the image allow-list, and resolves them to absolute paths. The
//! returned order is stable (sorted by path) so annotation creation order,
//! and therefore "next unlabeled" order, is deterministic.

use std::path::Path;

use crate::error::CoreError;
use crate::validation::IMAGE_EXTENSIONS;

/// Scan `dir` for annotatable image files.
///
/// Non-recursive: subdirectories are ignored. Fails with
/// [`CoreError::Validation`] when the path does not exist or is not a
/// directory, and [`CoreError::Internal`] on read errors.
pub fn scan_image_files(dir: &Path) -> Result<Vec<String>, CoreError> {
    if !dir.exists() {
        return Err(CoreError::Validation(format!(
            "Path {} does not exist",
            dir.display()
        )));
    }
    if !dir.is_dir() {
        return Err(CoreError::Validation(format!(
            "Path {} is not a directory",
            dir.display()
        )));
    }

    let entries = std::fs::read_dir(dir)
        .map_err(|e| CoreError::Internal(format!("Failed to read {}: {e}", dir.display())))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| CoreError::Internal(format!("Failed to read directory entry: {e}")))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if is_image_file(&path) {
            let resolved = path.canonicalize().map_err(|e| {
                CoreError::Internal(format!("Failed to resolve {}: {e}", path.display()))
            })?;
            files.push(resolved.to_string_lossy().into_owned());
        }
    }

    files.sort();
    Ok(files)
}

/// Whether a path carries an extension on the image allow-list
/// (case-insensitive).
fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let lower = ext.to_lowercase();
            IMAGE_EXTENSIONS.contains(&lower.as_str())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"x").unwrap();
    }

    #[test]
    fn keeps_only_image_files() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "a.png");
        touch(tmp.path(), "b.jpg");
        touch(tmp.path(), "notes.txt");
        touch(tmp.path(), "data.csv");

        let files = scan_image_files(tmp.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.png"));
        assert!(files[1].ends_with("b.jpg"));
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "scan.PNG");

        let files = scan_image_files(tmp.path()).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn subdirectories_are_not_descended() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "top.png");
        let sub = tmp.path().join("nested");
        std::fs::create_dir(&sub).unwrap();
        touch(&sub, "deep.png");

        let files = scan_image_files(tmp.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("top.png"));
    }

    #[test]
    fn results_are_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "c.png");
        touch(tmp.path(), "a.png");
        touch(tmp.path(), "b.png");

        let files = scan_image_files(tmp.path()).unwrap();
        let names: Vec<&str> = files
            .iter()
            .map(|f| f.rsplit('/').next().unwrap())
            .collect();
        assert_eq!(names, vec!["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn empty_directory_yields_empty_list() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(scan_image_files(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_path_is_a_validation_error() {
        let err = scan_image_files(Path::new("/no/such/dir")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn file_path_is_a_validation_error() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "a.png");
        let err = scan_image_files(&tmp.path().join("a.png")).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }
}
