//! Vault file helpers: collision-free filenames, folder creation and
//! filename sanitization.

use crate::error::AppResult;
use crate::utils::paths::normalize_path;
use crate::vault::{Vault, VaultEntry};
use once_cell::sync::Lazy;
use regex::Regex;

static UNSAFE_FILENAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>:"/\\|?*\x00-\x1F]+"#).unwrap());

/// `filename` itself, then `name_0.ext`, `name_1.ext` and so on.
///
/// The counter goes before the last `.`; a name without an extension gets
/// it appended.
pub fn candidate_filenames(filename: &str) -> impl Iterator<Item = String> + '_ {
    let (stem, extension) = match filename.rfind('.') {
        Some(idx) => filename.split_at(idx),
        None => (filename, ""),
    };
    std::iter::once(filename.to_string())
        .chain((0usize..).map(move |i| format!("{}_{}{}", stem, i, extension)))
}

/// Find the first free path for `filename` inside `folderpath`.
///
/// If `folder/name.ext` is taken, tries `folder/name_0.ext`, `folder/name_1.ext`
/// and so on.
pub fn unique_filepath<V: Vault>(vault: &V, filename: &str, folderpath: &str) -> String {
    candidate_filenames(filename)
        .map(|name| normalize_path(&format!("{}/{}", folderpath, name)))
        .find(|path| vault.entry(path).is_none())
        .unwrap_or_else(|| normalize_path(&format!("{}/{}", folderpath, filename)))
}

/// Make sure a folder exists at `folderpath`, creating it when absent.
pub async fn check_and_create_folder<V: Vault>(vault: &V, folderpath: &str) -> AppResult<()> {
    let folderpath = normalize_path(folderpath);
    if let Some(VaultEntry::Folder(_)) = vault.entry(&folderpath) {
        return Ok(());
    }
    crate::log_info!("filesystem", "creating folder {}", folderpath);
    vault.create_folder(&folderpath).await
}

/// Sanitize filename to be safe for file systems
pub fn sanitize_filename(filename: &str) -> String {
    let sanitized = UNSAFE_FILENAME_CHARS.replace_all(filename, "_");
    let sanitized = sanitized.trim().trim_end_matches('.');

    // Ensure the filename is not empty
    if sanitized.is_empty() {
        return "download".to_string();
    }

    sanitized.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::FsVault;
    use tempfile::TempDir;

    #[tokio::test]
    async fn unique_filepath_returns_free_name_untouched() {
        let dir = TempDir::new().unwrap();
        let vault = FsVault::new(dir.path());
        assert_eq!(unique_filepath(&vault, "Drawing.md", "Excalidraw/"), "Excalidraw/Drawing.md");
        assert_eq!(unique_filepath(&vault, "Drawing.md", "/"), "Drawing.md");
    }

    #[tokio::test]
    async fn unique_filepath_counts_from_zero() {
        let dir = TempDir::new().unwrap();
        let vault = FsVault::new(dir.path());
        vault.write_binary("img/pic.png", b"1").await.unwrap();
        assert_eq!(unique_filepath(&vault, "pic.png", "img"), "img/pic_0.png");

        vault.write_binary("img/pic_0.png", b"2").await.unwrap();
        assert_eq!(unique_filepath(&vault, "pic.png", "img"), "img/pic_1.png");
    }

    #[tokio::test]
    async fn unique_filepath_uses_last_dot() {
        let dir = TempDir::new().unwrap();
        let vault = FsVault::new(dir.path());
        vault.write_binary("a.excalidraw.md", b"").await.unwrap();
        assert_eq!(unique_filepath(&vault, "a.excalidraw.md", ""), "a.excalidraw_0.md");
    }

    #[tokio::test]
    async fn unique_filepath_without_extension() {
        let dir = TempDir::new().unwrap();
        let vault = FsVault::new(dir.path());
        vault.write_binary("notes", b"").await.unwrap();
        assert_eq!(unique_filepath(&vault, "notes", "/"), "notes_0");
    }

    #[test]
    fn candidates_count_before_the_extension() {
        let names: Vec<String> = candidate_filenames("Drawing.png").take(3).collect();
        assert_eq!(names, ["Drawing.png", "Drawing_0.png", "Drawing_1.png"]);
        let bare: Vec<String> = candidate_filenames("notes").take(2).collect();
        assert_eq!(bare, ["notes", "notes_0"]);
    }

    #[tokio::test]
    async fn check_and_create_folder_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let vault = FsVault::new(dir.path());

        check_and_create_folder(&vault, "Excalidraw//Scripts/").await.unwrap();
        assert!(dir.path().join("Excalidraw/Scripts").is_dir());

        check_and_create_folder(&vault, "Excalidraw/Scripts").await.unwrap();
        assert!(vault.entry("Excalidraw/Scripts").unwrap().is_folder());
    }

    #[tokio::test]
    async fn check_and_create_folder_fails_over_a_file() {
        let dir = TempDir::new().unwrap();
        let vault = FsVault::new(dir.path());
        vault.write_binary("taken", b"x").await.unwrap();
        assert!(check_and_create_folder(&vault, "taken").await.is_err());
    }

    #[test]
    fn sanitize_replaces_unsafe_characters() {
        assert_eq!(sanitize_filename("a/b:c?.png"), "a_b_c_.png");
        assert_eq!(sanitize_filename("Drawing 1.svg"), "Drawing 1.svg");
        assert_eq!(sanitize_filename("  "), "download");
        assert_eq!(sanitize_filename("..."), "download");
    }
}
