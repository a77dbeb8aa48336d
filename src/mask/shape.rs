use std::str::FromStr;

use vello_cpu::kurbo::Shape as _;

use crate::foundation::core::{Canvas, MAX_SURFACE_DIM, Vec2};
use crate::foundation::error::{ClipframeError, ClipframeResult};

/// Crop shape selector as written in the options (`"rect"` or `"circle"`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetShape {
    #[default]
    Rect,
    Circle,
}

impl FromStr for TargetShape {
    type Err = ClipframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rect" => Ok(Self::Rect),
            "circle" => Ok(Self::Circle),
            other => Err(ClipframeError::unsupported_shape(other)),
        }
    }
}

/// Resolved crop geometry, fixed for the lifetime of a cropper.
///
/// The shape is always centered in the viewport. Targets larger than the viewport are allowed;
/// the mask then simply covers nothing.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum MaskSpec {
    Rect { width: f64, height: f64 },
    Circle { r: f64 },
}

impl MaskSpec {
    /// Apply the defaults: rect targets default to the viewport size, the circle radius to half
    /// the smaller viewport side. `None` and `0` both mean "not given".
    pub fn resolve(
        shape: TargetShape,
        target_width: Option<f64>,
        target_height: Option<f64>,
        target_r: Option<f64>,
        viewport: Canvas,
    ) -> ClipframeResult<Self> {
        let spec = match shape {
            TargetShape::Rect => Self::Rect {
                width: given(target_width, "targetWidth")?.unwrap_or(viewport.width_f64()),
                height: given(target_height, "targetHeight")?.unwrap_or(viewport.height_f64()),
            },
            TargetShape::Circle => Self::Circle {
                r: given(target_r, "targetR")?
                    .unwrap_or(viewport.width_f64().min(viewport.height_f64()) / 2.0),
            },
        };
        let (w, h) = spec.output_extent();
        if w < 1.0 || h < 1.0 || w > f64::from(MAX_SURFACE_DIM) || h > f64::from(MAX_SURFACE_DIM) {
            return Err(ClipframeError::validation(format!(
                "export surface {w}x{h} must be between 1 and {MAX_SURFACE_DIM} pixels per side"
            )));
        }
        Ok(spec)
    }

    pub fn shape(&self) -> TargetShape {
        match self {
            Self::Rect { .. } => TargetShape::Rect,
            Self::Circle { .. } => TargetShape::Circle,
        }
    }

    /// Whole-pixel size of the export surface: the rect target, or the circle's bounding square.
    pub fn output_canvas(&self) -> Canvas {
        let (w, h) = self.output_extent();
        // `resolve` guarantees both sides are within 1..=MAX_SURFACE_DIM.
        Canvas {
            width: w as u32,
            height: h as u32,
        }
    }

    fn output_extent(&self) -> (f64, f64) {
        match *self {
            Self::Rect { width, height } => (width.floor(), height.floor()),
            Self::Circle { r } => ((2.0 * r).floor(), (2.0 * r).floor()),
        }
    }

    /// Translation from viewport coordinates into export-surface coordinates.
    pub fn projection_offset(&self, viewport: Canvas) -> Vec2 {
        match *self {
            Self::Rect { width, height } => Vec2::new(
                -(viewport.width_f64() - width) / 2.0,
                -(viewport.height_f64() - height) / 2.0,
            ),
            Self::Circle { r } => Vec2::new(
                -(viewport.width_f64() / 2.0 - r),
                -(viewport.height_f64() / 2.0 - r),
            ),
        }
    }

    /// Outline of the cut-out, centered in a viewport.
    pub(crate) fn viewport_outline(&self, viewport: Canvas) -> vello_cpu::kurbo::BezPath {
        let c = viewport.center();
        match *self {
            Self::Rect { width, height } => {
                let x = (viewport.width_f64() - width) / 2.0;
                let y = (viewport.height_f64() - height) / 2.0;
                vello_cpu::kurbo::Rect::new(x, y, x + width, y + height).to_path(0.1)
            }
            Self::Circle { r } => vello_cpu::kurbo::Circle::new((c.x, c.y), r).to_path(0.1),
        }
    }

    /// Clip outline on the export surface: only circles clip, around `(r, r)`.
    pub(crate) fn export_clip(&self) -> Option<vello_cpu::kurbo::BezPath> {
        match *self {
            Self::Rect { .. } => None,
            Self::Circle { r } => Some(vello_cpu::kurbo::Circle::new((r, r), r).to_path(0.1)),
        }
    }
}

fn given(v: Option<f64>, name: &str) -> ClipframeResult<Option<f64>> {
    match v {
        None => Ok(None),
        Some(v) if v == 0.0 => Ok(None),
        Some(v) if !v.is_finite() || v < 0.0 => Err(ClipframeError::validation(format!(
            "{name} must be a positive number, got {v}"
        ))),
        Some(v) => Ok(Some(v)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/shape.rs"]
mod tests;
