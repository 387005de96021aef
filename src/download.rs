//! Saving data payloads to the user's download folder.

use crate::error::{AppError, AppResult, FileOp, ResultExt};
use crate::settings::Settings;
use crate::utils::filesystem::{candidate_filenames, sanitize_filename};
use base64::Engine;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

const DEFAULT_MIME_TYPE: &str = "text/plain;charset=US-ASCII";

/// Decoded `data:` URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Parse a `data:[<mediatype>][;base64],<data>` URL.
pub fn parse_data_url(url: &str) -> AppResult<DataUrl> {
    let rest = url
        .get(..5)
        .filter(|scheme| scheme.eq_ignore_ascii_case("data:"))
        .map(|_| &url[5..])
        .ok_or_else(|| AppError::InvalidDataUrl("missing data: scheme".to_string()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| AppError::InvalidDataUrl("missing ',' separator".to_string()))?;

    let (media_type, is_base64) = match meta.len().checked_sub(7) {
        Some(idx) if meta.is_char_boundary(idx) && meta[idx..].eq_ignore_ascii_case(";base64") => {
            (&meta[..idx], true)
        }
        _ => (meta, false),
    };

    let bytes = if is_base64 {
        let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        base64::engine::general_purpose::STANDARD
            .decode(compact)
            .map_err(|e| AppError::InvalidDataUrl(format!("bad base64 payload: {}", e)))?
    } else {
        urlencoding::decode_binary(payload.as_bytes()).into_owned()
    };

    let mime_type = if media_type.is_empty() {
        DEFAULT_MIME_TYPE.to_string()
    } else {
        media_type.to_string()
    };
    Ok(DataUrl { mime_type, bytes })
}

/// Folder downloads are written to.
pub fn download_dir(settings: &Settings) -> AppResult<PathBuf> {
    settings
        .download_folder
        .clone()
        .or_else(dirs::download_dir)
        .or_else(dirs::home_dir)
        .ok_or(AppError::DownloadDirUnavailable)
}

/// Save `data` as `filename` in the download folder.
///
/// The payload is `encoding + "," + data` (just `data` when `encoding` is
/// empty) and must be a `data:` URL, e.g. `encoding = "data:image/png;base64"`.
/// An existing file of the same name is never overwritten. Returns the path
/// written.
pub async fn download(
    settings: &Settings,
    encoding: &str,
    data: &str,
    filename: &str,
) -> AppResult<PathBuf> {
    let href = if encoding.is_empty() {
        data.to_string()
    } else {
        format!("{},{}", encoding, data)
    };
    let payload = parse_data_url(&href)?;

    let dir = download_dir(settings)?;
    tokio::fs::create_dir_all(&dir)
        .await
        .with_file_context(&dir, FileOp::CreateDir)?;
    let written = write_new_file(&dir, &sanitize_filename(filename), &payload.bytes).await?;

    crate::log_info!(
        "download",
        "saved {} ({}, {} bytes)",
        written.display(),
        payload.mime_type,
        payload.bytes.len()
    );
    Ok(written)
}

/// Create the first free candidate name in `dir` and write `bytes` to it.
///
/// Creation fails if the name exists, so concurrent writers never share a
/// file.
async fn write_new_file(dir: &Path, filename: &str, bytes: &[u8]) -> AppResult<PathBuf> {
    for name in candidate_filenames(filename) {
        let path = dir.join(&name);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e).with_file_context(path, FileOp::Write),
        };
        file.write_all(bytes)
            .await
            .with_file_context(&path, FileOp::Write)?;
        file.flush().await.with_file_context(&path, FileOp::Write)?;
        return Ok(path);
    }
    Err(AppError::InvalidPath(filename.to_string()))
}
