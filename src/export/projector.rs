use crate::foundation::core::{Canvas, Vec2};
use crate::layout::transform::Transform;
use crate::mask::shape::MaskSpec;
use crate::render::backend::FrameRGBA;
use crate::render::composite::mask_alpha_in_place;
use crate::render::cpu::{CpuRaster, SourceImage, draw_image, new_pixmap, shape_coverage};

/// Where the image lands on the export surface: the viewport placement shifted so the crop
/// window's top-left becomes the origin. The rendered size is kept, not the native one.
pub fn project_transform(transform: Transform, viewport: Canvas, mask: &MaskSpec) -> Transform {
    transform.offset_by(mask.projection_offset(viewport))
}

/// Offset that [`project_transform`] applies; exposed for callers that map points.
pub fn projection_offset(viewport: Canvas, mask: &MaskSpec) -> Vec2 {
    mask.projection_offset(viewport)
}

/// Re-draw the current placement onto a surface of the mask's export size.
///
/// Circle masks clip to the inscribed disc; pixels outside it stay transparent. Without an image
/// the result is a fully transparent surface.
#[tracing::instrument(skip(source))]
pub fn project(
    source: Option<&SourceImage>,
    transform: Option<Transform>,
    viewport: Canvas,
    mask: &MaskSpec,
) -> FrameRGBA {
    let out = mask.output_canvas();
    let mut raster = CpuRaster::new();
    let mut pixmap = new_pixmap(out);
    raster.render_into(out, &mut pixmap, |ctx| {
        if let (Some(source), Some(transform)) = (source, transform) {
            draw_image(ctx, source, project_transform(transform, viewport, mask));
        }
    });

    if let Some(clip) = mask.export_clip() {
        let coverage = shape_coverage(&mut raster, out, &clip);
        mask_alpha_in_place(pixmap.data_as_u8_slice_mut(), &coverage, false);
    }

    FrameRGBA::premul(out, pixmap.data_as_u8_slice().to_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/export/projector.rs"]
mod tests;
