use std::fmt;

use crate::foundation::core::Canvas;
use crate::layout::transform::Transform;
use crate::mask::generate::MaskSurface;
use crate::render::backend::FrameRGBA;
use crate::render::composite::over_in_place;
use crate::render::cpu::{CpuRaster, SourceImage, draw_image, new_pixmap};

/// The interactive drawing surface: what the user sees (image plus dimming mask).
pub struct ViewportSurface {
    canvas: Canvas,
    pixmap: vello_cpu::Pixmap,
    raster: CpuRaster,
}

impl fmt::Debug for ViewportSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportSurface")
            .field("canvas", &self.canvas)
            .field("raster", &self.raster)
            .finish_non_exhaustive()
    }
}

impl ViewportSurface {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            pixmap: new_pixmap(canvas),
            raster: CpuRaster::new(),
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Read back the current pixels.
    pub fn snapshot(&self) -> FrameRGBA {
        FrameRGBA::premul(self.canvas, self.pixmap.data_as_u8_slice().to_vec())
    }
}

/// Repaint the viewport: clear, draw the image at `transform`, then lay the mask on top.
///
/// Without an image (or transform) only the mask is drawn.
pub fn render(
    surface: &mut ViewportSurface,
    source: Option<&SourceImage>,
    transform: Option<Transform>,
    mask: &MaskSurface,
) {
    debug_assert_eq!(surface.canvas, mask.canvas());
    let canvas = surface.canvas;
    surface.raster.render_into(canvas, &mut surface.pixmap, |ctx| {
        if let (Some(source), Some(transform)) = (source, transform) {
            draw_image(ctx, source, transform);
        }
    });
    over_in_place(surface.pixmap.data_as_u8_slice_mut(), mask.data());
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
