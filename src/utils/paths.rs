//! Vault path helpers: normalization, splitting and export filenames.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

static SEPARATOR_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\\/]+").unwrap());
static EDGE_SLASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"^/+|/+$").unwrap());

const LEGACY_DRAWING_EXTENSION: &str = ".excalidraw";
const MARKDOWN_EXTENSION: &str = ".md";

/// Folder and filename parts of a vault path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderAndFilename {
    pub folderpath: String,
    pub filename: String,
}

/// Normalize a vault path.
///
/// Separator runs (either slash) collapse to `/`, leading and trailing
/// slashes are dropped, non-breaking spaces become plain spaces and the
/// result is in Unicode NFC. The vault root is `/`.
pub fn normalize_path(path: &str) -> String {
    let collapsed = SEPARATOR_RUNS.replace_all(path, "/");
    let trimmed = EDGE_SLASHES.replace_all(&collapsed, "");
    if trimmed.is_empty() {
        return "/".to_string();
    }
    trimmed.replace(['\u{00A0}', '\u{202F}'], " ").nfc().collect()
}

/// Split a full vault path into its folder and filename.
///
/// A root-level file yields the folder `/`.
pub fn split_folder_and_filename(filepath: &str) -> FolderAndFilename {
    match filepath.rfind('/') {
        Some(idx) => FolderAndFilename {
            folderpath: normalize_path(&filepath[..idx]),
            filename: filepath[idx + 1..].to_string(),
        },
        None => FolderAndFilename {
            folderpath: normalize_path(""),
            filename: filepath.to_string(),
        },
    }
}

/// Derive an exported image path from a drawing path.
///
/// `new_extension` is given in `.ext` form. Legacy `.excalidraw` drawings
/// lose that suffix; markdown drawings lose everything from the last `.md`.
/// A path carrying neither gets the extension appended.
pub fn image_path_from_drawing_file(drawing_path: &str, new_extension: &str) -> String {
    let stem = if let Some(stem) = drawing_path.strip_suffix(LEGACY_DRAWING_EXTENSION) {
        stem
    } else {
        match drawing_path.rfind(MARKDOWN_EXTENSION) {
            Some(idx) => &drawing_path[..idx],
            None => drawing_path,
        }
    };
    format!("{}{}", stem, new_extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_separators() {
        assert_eq!(normalize_path("a//b\\c/"), "a/b/c");
        assert_eq!(normalize_path("/Drawings/"), "Drawings");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("///"), "/");
    }

    #[test]
    fn normalize_replaces_non_breaking_spaces() {
        assert_eq!(normalize_path("My\u{00A0}Folder/a\u{202F}b.md"), "My Folder/a b.md");
    }

    #[test]
    fn normalize_composes_unicode() {
        assert_eq!(normalize_path("Cafe\u{301}/Re\u{301}sume\u{301}.md"), "Café/Résumé.md");
        assert_eq!(normalize_path("Café.md"), normalize_path("Cafe\u{301}.md"));
    }

    #[test]
    fn split_nested_path() {
        let parts = split_folder_and_filename("Excalidraw/sub/Drawing 1.md");
        assert_eq!(parts.folderpath, "Excalidraw/sub");
        assert_eq!(parts.filename, "Drawing 1.md");
    }

    #[test]
    fn split_root_level_file() {
        let parts = split_folder_and_filename("Drawing.md");
        assert_eq!(parts.folderpath, "/");
        assert_eq!(parts.filename, "Drawing.md");
    }

    #[test]
    fn split_trailing_slash_has_empty_filename() {
        let parts = split_folder_and_filename("folder/");
        assert_eq!(parts.folderpath, "folder");
        assert_eq!(parts.filename, "");
    }

    #[test]
    fn image_path_for_markdown_drawing() {
        assert_eq!(
            image_path_from_drawing_file("Excalidraw/Drawing.excalidraw.md", ".svg"),
            "Excalidraw/Drawing.excalidraw.svg"
        );
        assert_eq!(image_path_from_drawing_file("a.md", ".png"), "a.png");
    }

    #[test]
    fn image_path_for_legacy_drawing() {
        assert_eq!(
            image_path_from_drawing_file("old/Sketch.excalidraw", ".png"),
            "old/Sketch.png"
        );
    }

    #[test]
    fn image_path_without_known_extension_appends() {
        assert_eq!(image_path_from_drawing_file("notes/plain", ".svg"), "notes/plain.svg");
    }
}
