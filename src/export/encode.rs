use base64::Engine as _;
use image::ImageEncoder as _;

use crate::foundation::error::{ClipframeError, ClipframeResult};
use crate::render::backend::FrameRGBA;

/// Lossy quality used when none is given or the given one is outside `[0, 1]`.
pub const DEFAULT_QUALITY: f64 = 0.92;

/// Output encoding selected by MIME type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
    Webp,
}

impl OutputFormat {
    /// Pick a format by MIME type; absent or unknown selectors fall back to PNG.
    pub fn from_mime(mime: Option<&str>) -> Self {
        let Some(mime) = mime else {
            return Self::Png;
        };
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Self::Jpeg,
            "image/webp" => Self::Webp,
            _ => Self::Png,
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Webp => "image/webp",
        }
    }

    /// Whether a quality parameter changes the output.
    ///
    /// Only JPEG is lossy. WebP goes through the lossless encoder, so its quality is ignored.
    pub fn is_lossy(self) -> bool {
        matches!(self, Self::Jpeg)
    }
}

/// Quality actually used: in-range values pass through, anything else is [`DEFAULT_QUALITY`].
pub fn effective_quality(quality: Option<f64>) -> f64 {
    match quality {
        Some(q) if (0.0..=1.0).contains(&q) => q,
        _ => DEFAULT_QUALITY,
    }
}

/// Encoded export bytes.
#[derive(Clone, Debug)]
pub struct EncodedImage {
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    /// `data:<mime>;base64,<payload>`.
    pub fn to_data_url(&self) -> String {
        let payload = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{payload}", self.format.mime())
    }
}

pub fn encode_frame(
    frame: &FrameRGBA,
    format: OutputFormat,
    quality: Option<f64>,
) -> ClipframeResult<EncodedImage> {
    let straight = frame.to_straight_rgba8();
    let mut bytes = Vec::new();
    let res = match format {
        OutputFormat::Png => image::codecs::png::PngEncoder::new(&mut bytes).write_image(
            &straight,
            frame.width,
            frame.height,
            image::ExtendedColorType::Rgba8,
        ),
        OutputFormat::Jpeg => {
            let q = (effective_quality(quality) * 100.0).round().clamp(1.0, 100.0) as u8;
            let rgb = flatten_premul_onto_black(frame);
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, q).write_image(
                &rgb,
                frame.width,
                frame.height,
                image::ExtendedColorType::Rgb8,
            )
        }
        OutputFormat::Webp => image::codecs::webp::WebPEncoder::new_lossless(&mut bytes)
            .write_image(
                &straight,
                frame.width,
                frame.height,
                image::ExtendedColorType::Rgba8,
            ),
    };
    res.map_err(|e| ClipframeError::encode(format!("{}: {e}", format.mime())))?;

    Ok(EncodedImage {
        format,
        width: frame.width,
        height: frame.height,
        bytes,
    })
}

/// Drop alpha the way a premultiplied surface reads when composited over black.
fn flatten_premul_onto_black(frame: &FrameRGBA) -> Vec<u8> {
    let src = if frame.premultiplied {
        std::borrow::Cow::Borrowed(frame.data.as_slice())
    } else {
        let mut tmp = frame.data.clone();
        crate::assets::decode::premultiply_rgba8_in_place(&mut tmp);
        std::borrow::Cow::Owned(tmp)
    };
    let mut out = Vec::with_capacity((frame.width as usize) * (frame.height as usize) * 3);
    for px in src.chunks_exact(4) {
        out.extend_from_slice(&px[0..3]);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/export/encode.rs"]
mod tests;
