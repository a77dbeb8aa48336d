use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::error::ClipframeResult;

/// Raster MIME types accepted by [`crate::Cropper::incoming_image`].
pub const ALLOWED_IMAGE_MIME_TYPES: &[&str] = &[
    "image/bmp",
    "image/cis-cod",
    "image/gif",
    "image/ief",
    "image/jpeg",
    "image/pipeg",
    "image/png",
    "image/svg+xml",
    "image/tiff",
    "image/x-cmu-raster",
    "image/x-cmx",
    "image/x-icon",
    "image/x-portable-anymap",
    "image/x-portable-bitmap",
    "image/x-portable-graymap",
    "image/x-portable-pixmap",
    "image/x-rgb",
    "image/x-xbitmap",
    "image/x-xpixmap",
    "image/x-xwindowdump",
];

/// Case-insensitive exact match against [`ALLOWED_IMAGE_MIME_TYPES`].
pub fn is_allowed_mime(mime: &str) -> bool {
    ALLOWED_IMAGE_MIME_TYPES
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(mime))
}

/// Image bytes plus the MIME type the acquiring collaborator reported for them.
#[derive(Clone, Debug)]
pub struct ImageInput {
    mime: String,
    bytes: Arc<Vec<u8>>,
}

impl ImageInput {
    pub fn new(mime: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            mime: mime.into(),
            bytes: Arc::new(bytes.into()),
        }
    }

    /// Read a file and guess its MIME type from the extension.
    ///
    /// Unknown extensions get `application/octet-stream`, which the allow-list rejects.
    pub fn from_path(path: &Path) -> ClipframeResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
        let mime = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(mime_for_extension)
            .unwrap_or("application/octet-stream");
        Ok(Self::new(mime, bytes))
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_allowed(&self) -> bool {
        is_allowed_mime(&self.mime)
    }

    pub fn is_svg(&self) -> bool {
        self.mime.eq_ignore_ascii_case("image/svg+xml")
    }
}

pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    let ext = ext.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "bmp" => "image/bmp",
        "gif" => "image/gif",
        "jpg" | "jpeg" | "jpe" => "image/jpeg",
        "png" => "image/png",
        "svg" => "image/svg+xml",
        "tif" | "tiff" => "image/tiff",
        "ico" => "image/x-icon",
        "pnm" => "image/x-portable-anymap",
        "pbm" => "image/x-portable-bitmap",
        "pgm" => "image/x-portable-graymap",
        "ppm" => "image/x-portable-pixmap",
        "webp" => "image/webp",
        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/mime.rs"]
mod tests;
