//! Input validation for task and keybind payloads.
//!
//! These checks back the request boundary: handlers run them before any
//! state is loaded, so a malformed payload never reaches the store.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::keybinds::RESERVED_KEYBINDS;

/// Maximum task title length.
pub const MAX_TITLE_LENGTH: usize = 50;

/// Maximum label length.
pub const MAX_LABEL_LENGTH: usize = 20;

/// File extensions treated as annotatable images by the directory scanner.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "bmp", "gif", "tiff", "webp", "dcm", "dicom",
];

static LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9 -]+$").expect("valid regex"));

/// A label/keybind pair as submitted by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelKeybindPair {
    pub label: String,
    pub keybind: String,
}

/// Validate a task title: non-empty, at most [`MAX_TITLE_LENGTH`] chars.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.is_empty() {
        return Err(CoreError::Validation("Title must not be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a label: 1-20 chars of alphanumerics, spaces, and hyphens.
pub fn validate_label(label: &str) -> Result<(), CoreError> {
    if label.is_empty() || label.chars().count() > MAX_LABEL_LENGTH {
        return Err(CoreError::Validation(format!(
            "Label must be 1-{MAX_LABEL_LENGTH} characters, got '{label}'"
        )));
    }
    if !LABEL_RE.is_match(label) {
        return Err(CoreError::Validation(format!(
            "Label '{label}' may only contain letters, digits, spaces, and hyphens"
        )));
    }
    Ok(())
}

/// Validate a keybind: exactly one printable character, not reserved.
pub fn validate_keybind(keybind: &str) -> Result<(), CoreError> {
    if RESERVED_KEYBINDS.contains(&keybind) {
        return Err(CoreError::Validation(format!(
            "Keybind '{keybind}' is reserved"
        )));
    }
    let mut chars = keybind.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_control() => Ok(()),
        _ => Err(CoreError::Validation(format!(
            "Keybind must be exactly one printable character, got '{keybind}'"
        ))),
    }
}

/// Validate a submitted keybind set: each pair well-formed, labels pairwise
/// unique, keybinds pairwise unique.
pub fn validate_keybind_set(pairs: &[LabelKeybindPair]) -> Result<(), CoreError> {
    let mut labels = HashSet::new();
    let mut keybinds = HashSet::new();

    for pair in pairs {
        validate_label(&pair.label)?;
        validate_keybind(&pair.keybind)?;

        if !labels.insert(pair.label.to_lowercase()) {
            return Err(CoreError::Validation(format!(
                "Duplicate label '{}'",
                pair.label
            )));
        }
        if !keybinds.insert(pair.keybind.clone()) {
            return Err(CoreError::Validation(format!(
                "Duplicate keybind '{}'",
                pair.keybind
            )));
        }
    }
    Ok(())
}

/// Validate a submitted file list: no duplicate paths.
pub fn validate_file_list(files: &[String]) -> Result<(), CoreError> {
    let mut seen = HashSet::new();
    for file in files {
        if !seen.insert(file.as_str()) {
            return Err(CoreError::Validation(format!("Duplicate filepath '{file}'")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(label: &str, keybind: &str) -> LabelKeybindPair {
        LabelKeybindPair {
            label: label.to_string(),
            keybind: keybind.to_string(),
        }
    }

    // -- validate_title ----------------------------------------------------

    #[test]
    fn title_within_limit_accepted() {
        assert!(validate_title("Femur X-rays batch 3").is_ok());
    }

    #[test]
    fn title_at_limit_accepted() {
        assert!(validate_title(&"x".repeat(MAX_TITLE_LENGTH)).is_ok());
    }

    #[test]
    fn title_over_limit_rejected() {
        assert!(validate_title(&"x".repeat(MAX_TITLE_LENGTH + 1)).is_err());
    }

    #[test]
    fn empty_title_rejected() {
        assert!(validate_title("").is_err());
    }

    // -- validate_label ----------------------------------------------------

    #[test]
    fn label_alphanumeric_space_hyphen_accepted() {
        assert!(validate_label("left femur-2").is_ok());
    }

    #[test]
    fn label_with_punctuation_rejected() {
        assert!(validate_label("femur!").is_err());
    }

    #[test]
    fn empty_label_rejected() {
        assert!(validate_label("").is_err());
    }

    #[test]
    fn label_over_limit_rejected() {
        assert!(validate_label(&"a".repeat(MAX_LABEL_LENGTH + 1)).is_err());
    }

    // -- validate_keybind --------------------------------------------------

    #[test]
    fn single_characters_accepted() {
        for k in ["a", "A", ";", "5"] {
            assert!(validate_keybind(k).is_ok(), "{k} should be accepted");
        }
    }

    #[test]
    fn reserved_keybinds_rejected() {
        for k in RESERVED_KEYBINDS {
            let err = validate_keybind(k).unwrap_err();
            assert!(err.to_string().contains("reserved"), "{k} should be reserved");
        }
    }

    #[test]
    fn multi_character_keybind_rejected() {
        assert!(validate_keybind("ab").is_err());
    }

    #[test]
    fn empty_keybind_rejected() {
        assert!(validate_keybind("").is_err());
    }

    // -- validate_keybind_set ----------------------------------------------

    #[test]
    fn distinct_pairs_accepted() {
        let pairs = vec![pair("bicep", "a"), pair("femur", "s")];
        assert!(validate_keybind_set(&pairs).is_ok());
    }

    #[test]
    fn duplicate_keybind_rejected() {
        let pairs = vec![pair("bicep", "a"), pair("femur", "a")];
        let err = validate_keybind_set(&pairs).unwrap_err();
        assert!(err.to_string().contains("Duplicate keybind"));
    }

    #[test]
    fn duplicate_label_rejected_case_insensitively() {
        let pairs = vec![pair("Bicep", "a"), pair("bicep", "s")];
        let err = validate_keybind_set(&pairs).unwrap_err();
        assert!(err.to_string().contains("Duplicate label"));
    }

    // -- validate_file_list ------------------------------------------------

    #[test]
    fn distinct_files_accepted() {
        let files = vec!["/imgs/a.png".to_string(), "/imgs/b.png".to_string()];
        assert!(validate_file_list(&files).is_ok());
    }

    #[test]
    fn duplicate_file_rejected() {
        let files = vec!["/imgs/a.png".to_string(), "/imgs/a.png".to_string()];
        assert!(validate_file_list(&files).is_err());
    }
}
