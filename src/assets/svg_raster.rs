use anyhow::Context;

use crate::foundation::core::MAX_SURFACE_DIM;
use crate::foundation::error::{ClipframeError, ClipframeResult};

pub fn parse_svg(bytes: &[u8]) -> ClipframeResult<usvg::Tree> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    Ok(tree)
}

/// Rasterize an SVG at its intrinsic size (rounded up to whole pixels).
///
/// Returns `(width, height, premultiplied rgba8)`; `tiny_skia` pixmaps are premultiplied already.
pub fn rasterize_svg_intrinsic(tree: &usvg::Tree) -> ClipframeResult<(u32, u32, Vec<u8>)> {
    fn to_px(v: f32) -> ClipframeResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(ClipframeError::decode("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }

    let size = tree.size();
    let width = to_px(size.width())?;
    let height = to_px(size.height())?;
    if width > MAX_SURFACE_DIM || height > MAX_SURFACE_DIM {
        return Err(ClipframeError::decode(format!(
            "svg raster size too large: {width}x{height} (max {MAX_SURFACE_DIM}x{MAX_SURFACE_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| ClipframeError::decode("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / size.width();
    let sy = (height as f32) / size.height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok((width, height, pixmap.data().to_vec()))
}
