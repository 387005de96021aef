//! Image descriptors for embedding vault files in a drawing: MIME type,
//! content hash, data URL and pixel size.

use crate::error::{AppError, AppResult};
use crate::utils::logger::Logger;
use crate::vault::{Vault, VaultFile};
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::future::Future;
use std::io::Cursor;

/// Extensions embedded as images
pub const IMAGE_TYPES: [&str; 5] = ["jpeg", "jpg", "png", "gif", "svg"];

const LEGACY_DRAWING_EXTENSION: &str = "excalidraw";
const DRAWING_FRONTMATTER_KEY: &str = "excalidraw-plugin";
const SVG_DATA_URL_PREFIX: &str = "data:image/svg+xml;base64,";

/// Size browsers give an SVG that declares none
const DEFAULT_SVG_SIZE: ImageSize = ImageSize { height: 150, width: 300 };

static FRONTMATTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\A---\r?\n(.*?)\r?\n---").unwrap());
static SVG_ROOT_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<svg\b([^>]*)>").unwrap());
static SVG_WIDTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?:^|\s)width\s*=\s*["']\s*([0-9]*\.?[0-9]+)\s*(?:px)?\s*["']"#).unwrap());
static SVG_HEIGHT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?:^|\s)height\s*=\s*["']\s*([0-9]*\.?[0-9]+)\s*(?:px)?\s*["']"#).unwrap());
static SVG_VIEWBOX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:^|\s)viewBox\s*=\s*["']\s*(-?[0-9.]+)[\s,]+(-?[0-9.]+)[\s,]+([0-9.]+)[\s,]+([0-9.]+)\s*["']"#)
        .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageMimeType {
    #[serde(rename = "image/svg+xml")]
    Svg,
    #[serde(rename = "image/png")]
    Png,
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/gif")]
    Gif,
    #[serde(rename = "application/octet-stream")]
    OctetStream,
}

impl ImageMimeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMimeType::Svg => "image/svg+xml",
            ImageMimeType::Png => "image/png",
            ImageMimeType::Jpeg => "image/jpeg",
            ImageMimeType::Gif => "image/gif",
            ImageMimeType::OctetStream => "application/octet-stream",
        }
    }

    pub fn from_extension(extension: &str) -> Self {
        match extension {
            "png" => ImageMimeType::Png,
            "jpg" | "jpeg" => ImageMimeType::Jpeg,
            "svg" => ImageMimeType::Svg,
            "gif" => ImageMimeType::Gif,
            _ => ImageMimeType::OctetStream,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub height: u32,
    pub width: u32,
}

/// Everything the canvas needs to embed an image file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingImage {
    pub mime_type: ImageMimeType,
    /// Lowercase hex SHA-1 of the file bytes
    pub file_id: String,
    #[serde(rename = "dataURL")]
    pub data_url: String,
    /// Modification time of the source file, ms since the epoch
    pub created: i64,
    pub size: ImageSize,
}

/// Renders a drawing file to an SVG document.
pub trait SvgExporter {
    fn export_svg(&self, path: &str) -> impl Future<Output = AppResult<String>> + Send;
}

/// Exporter for callers that never embed drawings; every export fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSvgExporter;

impl SvgExporter for NoSvgExporter {
    async fn export_svg(&self, path: &str) -> AppResult<String> {
        Err(AppError::SvgExport {
            path: path.to_string(),
            reason: "no SVG exporter configured".to_string(),
        })
    }
}

/// Whether `file` is a drawing: a legacy `.excalidraw` file, or markdown
/// whose front matter carries the drawing key.
pub async fn is_drawing_file<V: Vault>(vault: &V, file: &VaultFile) -> AppResult<bool> {
    match file.extension.as_str() {
        LEGACY_DRAWING_EXTENSION => Ok(true),
        "md" => {
            let text = vault.read(file).await?;
            Ok(has_drawing_frontmatter(&text))
        }
        _ => Ok(false),
    }
}

fn has_drawing_frontmatter(text: &str) -> bool {
    FRONTMATTER
        .captures(text)
        .and_then(|caps| caps.get(1))
        .is_some_and(|fm| {
            fm.as_str().lines().any(|line| {
                line.trim_start()
                    .strip_prefix(DRAWING_FRONTMATTER_KEY)
                    .is_some_and(|rest| rest.trim_start().starts_with(':'))
            })
        })
}

/// Build the image descriptor for `file`.
///
/// Returns `Ok(None)` when the file is neither an image nor a drawing.
/// Drawings are rendered through `exporter`.
pub async fn get_drawing_image<V, E>(
    vault: &V,
    file: &VaultFile,
    exporter: &E,
) -> AppResult<Option<DrawingImage>>
where
    V: Vault,
    E: SvgExporter,
{
    let logger = Logger::new("image");
    let is_drawing = is_drawing_file(vault, file).await?;
    if !(is_drawing || IMAGE_TYPES.contains(&file.extension.as_str())) {
        logger.debug(format!("{} is not an embeddable image", file.path));
        return Ok(None);
    }

    let bytes = vault.read_binary(file).await?;
    let mime_type = if is_drawing {
        ImageMimeType::Svg
    } else {
        ImageMimeType::from_extension(&file.extension)
    };

    let (data_url, size) = if is_drawing {
        let svg = exporter.export_svg(&file.path).await.inspect_err(|e| {
            logger.error_with_context(format!("Failed to export {}", file.path), e)
        })?;
        (svg_to_base64(&svg), svg_size(&svg))
    } else if mime_type == ImageMimeType::Svg {
        let svg = vault.read(file).await?;
        (svg_to_base64(&svg), svg_size(&svg))
    } else {
        let size = logger.time("decode image header", || raster_size(&bytes))?;
        (to_data_url(mime_type, &bytes), size)
    };

    let image = DrawingImage {
        mime_type,
        file_id: generate_id_from_file(&bytes),
        data_url,
        created: file.mtime,
        size,
    };
    logger.debug(format!(
        "loaded {} as {} ({}x{})",
        file.path,
        mime_type.as_str(),
        size.width,
        size.height
    ));
    Ok(Some(image))
}

/// Encode an SVG document as a base64 data URL.
pub fn svg_to_base64(svg: &str) -> String {
    let cleaned = svg.replace("&nbsp;", " ");
    format!(
        "{}{}",
        SVG_DATA_URL_PREFIX,
        base64::engine::general_purpose::STANDARD.encode(cleaned.as_bytes())
    )
}

fn to_data_url(mime_type: ImageMimeType, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime_type.as_str(),
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Content hash used as the embedded file id.
pub fn generate_id_from_file(bytes: &[u8]) -> String {
    hex::encode(Sha1::digest(bytes))
}

fn raster_size(bytes: &[u8]) -> AppResult<ImageSize> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| AppError::ImageProcessing(e.to_string()))?;
    if reader.format().is_none() {
        return Err(AppError::UnsupportedImageFormat("unrecognized image data".to_string()));
    }
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| AppError::ImageProcessing(e.to_string()))?;
    Ok(ImageSize { height, width })
}

/// Pixel size an SVG document renders at.
///
/// Uses the root `width`/`height`; a missing one is derived from the
/// `viewBox` aspect ratio; with neither, the `viewBox` size itself.
pub fn svg_size(svg: &str) -> ImageSize {
    let Some(attrs) = SVG_ROOT_TAG.captures(svg).and_then(|c| c.get(1)) else {
        return DEFAULT_SVG_SIZE;
    };
    let attrs = attrs.as_str();

    let number = |re: &Regex| -> Option<f64> {
        re.captures(attrs)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
    };
    let width = number(&*SVG_WIDTH);
    let height = number(&*SVG_HEIGHT);
    let view_box = SVG_VIEWBOX.captures(attrs).and_then(|c| {
        let w = c.get(3)?.as_str().parse::<f64>().ok()?;
        let h = c.get(4)?.as_str().parse::<f64>().ok()?;
        (w > 0.0 && h > 0.0).then_some((w, h))
    });

    let (w, h) = match (width, height, view_box) {
        (Some(w), Some(h), _) => (w, h),
        (Some(w), None, Some((vw, vh))) => (w, w * vh / vw),
        (None, Some(h), Some((vw, vh))) => (h * vw / vh, h),
        (None, None, Some(vb)) => vb,
        (Some(w), None, None) => (w, f64::from(DEFAULT_SVG_SIZE.height)),
        (None, Some(h), None) => (f64::from(DEFAULT_SVG_SIZE.width), h),
        (None, None, None) => return DEFAULT_SVG_SIZE,
    };
    ImageSize {
        height: h.round() as u32,
        width: w.round() as u32,
    }
}
