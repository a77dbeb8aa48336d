use std::fmt;
use std::sync::Arc;

use crate::assets::decode::PreparedImage;
use crate::foundation::core::Canvas;
use crate::foundation::error::{ClipframeError, ClipframeResult};
use crate::layout::transform::Transform;

/// A decoded image ready to be used as a `vello_cpu` paint.
///
/// Immutable once built; a new upload replaces it wholesale.
#[derive(Clone)]
pub struct SourceImage {
    width: u32,
    height: u32,
    paint: vello_cpu::Image,
}

impl fmt::Debug for SourceImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl SourceImage {
    pub fn from_prepared(prepared: &PreparedImage) -> ClipframeResult<Self> {
        let pixmap =
            pixmap_from_premul_bytes(&prepared.rgba8_premul, prepared.width, prepared.height)?;
        Ok(Self {
            width: prepared.width,
            height: prepared.height,
            paint: vello_cpu::Image {
                image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                sampler: vello_cpu::peniko::ImageSampler::default(),
            },
        })
    }

    /// Native width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Native height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Reusable `vello_cpu` context; recreated only when the target size changes.
#[derive(Default)]
pub(crate) struct CpuRaster {
    ctx: Option<vello_cpu::RenderContext>,
}

impl fmt::Debug for CpuRaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CpuRaster")
            .field("has_ctx", &self.ctx.is_some())
            .finish()
    }
}

impl CpuRaster {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Run `f` against a cleared context sized `canvas`, then resolve it into `dst`.
    pub(crate) fn render_into(
        &mut self,
        canvas: Canvas,
        dst: &mut vello_cpu::Pixmap,
        f: impl FnOnce(&mut vello_cpu::RenderContext),
    ) {
        let (width, height) = canvas.dims_u16();
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        f(&mut ctx);
        ctx.flush();
        ctx.render_to_pixmap(dst);
        self.ctx = Some(ctx);
    }
}

pub(crate) fn new_pixmap(canvas: Canvas) -> vello_cpu::Pixmap {
    let (width, height) = canvas.dims_u16();
    vello_cpu::Pixmap::new(width, height)
}

/// Draw `source` stretched into `transform`'s rectangle.
///
/// A non-positive or non-finite rendered size draws nothing.
pub(crate) fn draw_image(
    ctx: &mut vello_cpu::RenderContext,
    source: &SourceImage,
    transform: Transform,
) {
    if !transform.is_drawable() {
        tracing::trace!(?transform, "skipping degenerate image draw");
        return;
    }
    let native_w = f64::from(source.width);
    let native_h = f64::from(source.height);
    let affine = vello_cpu::kurbo::Affine::translate((transform.x, transform.y))
        * vello_cpu::kurbo::Affine::scale_non_uniform(
            transform.width / native_w,
            transform.height / native_h,
        );

    ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(affine);
    ctx.set_paint(source.paint.clone());
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, native_w, native_h));
}

/// Rasterize `path` as opaque white on a transparent surface; the alpha channel is the
/// anti-aliased coverage of the shape.
pub(crate) fn shape_coverage(
    raster: &mut CpuRaster,
    canvas: Canvas,
    path: &vello_cpu::kurbo::BezPath,
) -> Vec<u8> {
    let mut pixmap = new_pixmap(canvas);
    raster.render_into(canvas, &mut pixmap, |ctx| {
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        ctx.fill_path(path);
    });
    pixmap.data_as_u8_slice().to_vec()
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> ClipframeResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| ClipframeError::decode("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| ClipframeError::decode("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(ClipframeError::decode("pixmap byte len mismatch"));
    }
    // Pixmap stores PremulRgba8; our bytes are already premultiplied.
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
