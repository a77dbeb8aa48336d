use crate::foundation::core::Canvas;
use crate::layout::transform::Transform;

/// Initial placement of a freshly decoded image: never upscale, otherwise shrink to fit while
/// keeping the aspect ratio, then center.
///
/// Equal aspect ratios take the width-first branch.
pub fn fit(
    native_width: f64,
    native_height: f64,
    viewport_width: f64,
    viewport_height: f64,
) -> Transform {
    let (width, height) = if native_width <= viewport_width && native_height <= viewport_height {
        (native_width, native_height)
    } else if native_width / native_height >= viewport_width / viewport_height {
        let width = viewport_width;
        (width, width * (native_height / native_width))
    } else {
        let height = viewport_height;
        (height * (native_width / native_height), height)
    };

    Transform {
        x: (viewport_width - width) / 2.0,
        y: (viewport_height - height) / 2.0,
        width,
        height,
    }
}

/// [`fit`] for integer image and viewport sizes.
pub fn fit_to_canvas(native_width: u32, native_height: u32, viewport: Canvas) -> Transform {
    fit(
        f64::from(native_width),
        f64::from(native_height),
        viewport.width_f64(),
        viewport.height_f64(),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/layout/placement.rs"]
mod tests;
