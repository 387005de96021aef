//! Vault access: the narrow file API the helpers call into, plus a
//! filesystem-backed implementation rooted at a directory.

use crate::error::{AppError, AppResult, FileOp, ResultExt};
use crate::utils::paths::normalize_path;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

/// A file inside the vault
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultFile {
    /// Normalized vault path, e.g. `Excalidraw/Drawing.md`
    pub path: String,
    /// File name without its extension
    pub basename: String,
    /// Extension without the dot, empty when there is none
    pub extension: String,
    /// Modification time in milliseconds since the epoch
    pub mtime: i64,
    pub size: u64,
}

impl VaultFile {
    pub fn new(path: &str, mtime: i64, size: u64) -> Self {
        let path = normalize_path(path);
        let name = path.rsplit('/').next().unwrap_or(&path);
        let (basename, extension) = match name.rfind('.') {
            Some(idx) if idx > 0 => (name[..idx].to_string(), name[idx + 1..].to_string()),
            _ => (name.to_string(), String::new()),
        };
        Self {
            basename,
            extension,
            mtime,
            size,
            path,
        }
    }
}

/// Whatever lives at a vault path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VaultEntry {
    File(VaultFile),
    Folder(String),
}

impl VaultEntry {
    pub fn is_folder(&self) -> bool {
        matches!(self, VaultEntry::Folder(_))
    }
}

/// File storage of the host application.
pub trait Vault {
    /// Look up the entry at a vault path, if any.
    fn entry(&self, path: &str) -> Option<VaultEntry>;

    fn create_folder(&self, path: &str) -> impl Future<Output = AppResult<()>> + Send;

    /// Read a file as UTF-8 text.
    fn read(&self, file: &VaultFile) -> impl Future<Output = AppResult<String>> + Send;

    fn read_binary(&self, file: &VaultFile) -> impl Future<Output = AppResult<Vec<u8>>> + Send;

    /// Write bytes to a vault path, replacing any existing file.
    fn write_binary(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl Future<Output = AppResult<VaultFile>> + Send;
}

/// Vault rooted at a directory on the local filesystem
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a vault path onto the filesystem. Paths escaping the root are rejected.
    pub fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let normalized = normalize_path(path);
        if normalized == "/" {
            return Ok(self.root.clone());
        }
        let relative = Path::new(&normalized);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(AppError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }

    fn file_from_metadata(path: &str, metadata: &std::fs::Metadata) -> VaultFile {
        let mtime = metadata
            .modified()
            .map(millis_since_epoch)
            .unwrap_or_default();
        VaultFile::new(path, mtime, metadata.len())
    }
}

fn millis_since_epoch(time: SystemTime) -> i64 {
    chrono::DateTime::<chrono::Utc>::from(time).timestamp_millis()
}

impl Vault for FsVault {
    fn entry(&self, path: &str) -> Option<VaultEntry> {
        let full = self.resolve(path).ok()?;
        let metadata = std::fs::metadata(&full).ok()?;
        let normalized = normalize_path(path);
        if metadata.is_dir() {
            Some(VaultEntry::Folder(normalized))
        } else {
            Some(VaultEntry::File(Self::file_from_metadata(&normalized, &metadata)))
        }
    }

    async fn create_folder(&self, path: &str) -> AppResult<()> {
        let full = self.resolve(path)?;
        crate::log_debug!("vault", "creating folder {}", full.display());
        tokio::fs::create_dir_all(&full)
            .await
            .with_file_context(full, FileOp::CreateDir)
    }

    async fn read(&self, file: &VaultFile) -> AppResult<String> {
        let full = self.resolve(&file.path)?;
        tokio::fs::read_to_string(&full)
            .await
            .with_file_context(full, FileOp::Read)
    }

    async fn read_binary(&self, file: &VaultFile) -> AppResult<Vec<u8>> {
        let full = self.resolve(&file.path)?;
        tokio::fs::read(&full).await.with_file_context(full, FileOp::Read)
    }

    async fn write_binary(&self, path: &str, data: &[u8]) -> AppResult<VaultFile> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_file_context(parent, FileOp::CreateDir)?;
        }
        tokio::fs::write(&full, data)
            .await
            .with_file_context(full.clone(), FileOp::Write)?;
        let metadata = tokio::fs::metadata(&full)
            .await
            .with_file_context(full, FileOp::Read)?;
        Ok(Self::file_from_metadata(&normalize_path(path), &metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn vault_file_splits_name() {
        let file = VaultFile::new("Excalidraw/Drawing 1.excalidraw.md", 0, 0);
        assert_eq!(file.basename, "Drawing 1.excalidraw");
        assert_eq!(file.extension, "md");

        let dotfile = VaultFile::new(".hidden", 0, 0);
        assert_eq!(dotfile.basename, ".hidden");
        assert_eq!(dotfile.extension, "");
    }

    #[test]
    fn resolve_rejects_parent_components() {
        let vault = FsVault::new("/tmp/vault");
        assert!(matches!(vault.resolve("../etc/passwd"), Err(AppError::InvalidPath(_))));
        assert_eq!(vault.resolve("/").unwrap(), PathBuf::from("/tmp/vault"));
    }

    #[tokio::test]
    async fn write_then_look_up() {
        let dir = TempDir::new().unwrap();
        let vault = FsVault::new(dir.path());

        let written = vault.write_binary("a/b/c.png", b"png").await.unwrap();
        assert_eq!(written.path, "a/b/c.png");
        assert_eq!(written.size, 3);

        assert!(vault.entry("a/b").unwrap().is_folder());
        match vault.entry("a//b/c.png") {
            Some(VaultEntry::File(file)) => {
                assert_eq!(file.extension, "png");
                assert!(file.mtime > 0);
                assert_eq!(vault.read_binary(&file).await.unwrap(), b"png");
            }
            other => panic!("expected file, got {:?}", other),
        }
        assert!(vault.entry("a/missing.png").is_none());
    }

    #[tokio::test]
    async fn read_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let vault = FsVault::new(dir.path());
        let ghost = VaultFile::new("ghost.md", 0, 0);
        assert!(matches!(vault.read(&ghost).await, Err(AppError::FileNotFound(_))));
    }
}
