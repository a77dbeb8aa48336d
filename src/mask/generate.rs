use crate::assets::color::ColorDef;
use crate::foundation::core::Canvas;
use crate::mask::shape::MaskSpec;
use crate::render::backend::FrameRGBA;
use crate::render::composite::{fill_premul, mask_alpha_in_place};
use crate::render::cpu::{CpuRaster, shape_coverage};

/// Static dimming overlay: `mask_color` everywhere except inside the crop shape.
#[derive(Clone, Debug)]
pub struct MaskSurface {
    canvas: Canvas,
    rgba8_premul: Vec<u8>,
}

impl MaskSurface {
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Premultiplied RGBA8 pixels, viewport-sized.
    pub fn data(&self) -> &[u8] {
        &self.rgba8_premul
    }

    pub fn to_frame(&self) -> FrameRGBA {
        FrameRGBA::premul(self.canvas, self.rgba8_premul.clone())
    }
}

/// Build the mask once for a viewport: fill the crop shape, then keep the flat `mask_color`
/// overlay only where the shape is absent (antialiased edges fade proportionally).
#[tracing::instrument(skip(color))]
pub fn generate_mask(viewport: Canvas, spec: &MaskSpec, color: ColorDef) -> MaskSurface {
    let mut raster = CpuRaster::new();
    let coverage = shape_coverage(&mut raster, viewport, &spec.viewport_outline(viewport));

    let mut rgba8_premul = vec![0u8; viewport.byte_len()];
    fill_premul(&mut rgba8_premul, color.to_rgba8_premul().to_array());
    mask_alpha_in_place(&mut rgba8_premul, &coverage, true);

    MaskSurface {
        canvas: viewport,
        rgba8_premul,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/generate.rs"]
mod tests;
