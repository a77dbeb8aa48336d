use std::sync::Arc;

use anyhow::Context;

use crate::assets::mime::ImageInput;
use crate::assets::svg_raster::{parse_svg, rasterize_svg_intrinsic};
use crate::foundation::core::MAX_SURFACE_DIM;
use crate::foundation::error::{ClipframeError, ClipframeResult};

/// A decoded bitmap in premultiplied RGBA8, at its native size.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Decode an accepted input into a bitmap.
///
/// SVG is rasterized at its intrinsic size; everything else goes through `image`'s format
/// sniffing, so a wrong-but-allowed MIME type still decodes when the bytes are recognizable.
pub fn decode_input(input: &ImageInput) -> ClipframeResult<PreparedImage> {
    let prepared = if input.is_svg() {
        let tree = parse_svg(input.bytes())?;
        let (width, height, rgba8_premul) = rasterize_svg_intrinsic(&tree)?;
        PreparedImage {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        }
    } else {
        decode_image(input.bytes())?
    };
    check_dims(prepared.width, prepared.height)?;
    Ok(prepared)
}

pub fn decode_image(bytes: &[u8]) -> ClipframeResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

fn check_dims(width: u32, height: u32) -> ClipframeResult<()> {
    if width == 0 || height == 0 {
        return Err(ClipframeError::decode("image has no pixels"));
    }
    if width > MAX_SURFACE_DIM || height > MAX_SURFACE_DIM {
        return Err(ClipframeError::decode(format!(
            "image {width}x{height} exceeds {MAX_SURFACE_DIM}x{MAX_SURFACE_DIM}"
        )));
    }
    Ok(())
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
