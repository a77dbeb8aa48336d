use crate::assets::color::ColorDef;
use crate::foundation::core::Canvas;
use crate::foundation::error::{ClipframeError, ClipframeResult};
use crate::input::gesture::GestureFlags;
use crate::mask::shape::{MaskSpec, TargetShape};

/// How completions of overlapping decodes are applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DecodeOrder {
    /// Every completion is applied as it arrives, so a slow earlier decode can overwrite a newer
    /// image.
    #[default]
    Completion,
    /// Completions of decodes superseded by a newer submission are dropped.
    LatestSubmission,
}

/// Construction options, one-to-one with the JSON options object (`camelCase` keys).
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CropperOpts {
    /// The viewport surface size. Required.
    pub viewport: Option<Canvas>,
    /// `"rect"` (default) or `"circle"`.
    pub target_shape: Option<String>,
    pub target_width: Option<f64>,
    pub target_height: Option<f64>,
    pub target_r: Option<f64>,
    /// Tint outside the crop shape; `rgba(0,0,0,.5)` when absent.
    pub mask_color: Option<ColorDef>,
    pub should_drop_in: bool,
    pub should_dblclick_in: bool,
    pub should_mouse_drag: bool,
    pub should_mouse_wheel_scale: bool,
    pub should_keystroke_movement: bool,
    /// Smallest rendered side `scaling` may shrink the image to. Unlimited when absent.
    pub min_image_size: Option<f64>,
    pub decode_order: DecodeOrder,
}

impl CropperOpts {
    pub fn new(viewport: Canvas) -> Self {
        Self {
            viewport: Some(viewport),
            ..Self::default()
        }
    }

    pub fn from_json_str(s: &str) -> ClipframeResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| ClipframeError::validation(format!("invalid options JSON: {e}")))
    }

    pub fn with_rect(mut self, target_width: f64, target_height: f64) -> Self {
        self.target_shape = Some("rect".to_owned());
        self.target_width = Some(target_width);
        self.target_height = Some(target_height);
        self
    }

    pub fn with_circle(mut self, target_r: f64) -> Self {
        self.target_shape = Some("circle".to_owned());
        self.target_r = Some(target_r);
        self
    }

    pub fn gestures(&self) -> GestureFlags {
        GestureFlags {
            drop_in: self.should_drop_in,
            dblclick_in: self.should_dblclick_in,
            mouse_drag: self.should_mouse_drag,
            mouse_wheel_scale: self.should_mouse_wheel_scale,
            keystroke_movement: self.should_keystroke_movement,
        }
    }

    /// Validate and apply defaults.
    pub fn resolve(&self) -> ClipframeResult<ResolvedOpts> {
        let viewport = self.viewport.ok_or(ClipframeError::MissingTarget)?;
        viewport.validate()?;

        let shape = match self.target_shape.as_deref() {
            None | Some("") => TargetShape::default(),
            Some(s) => s.parse()?,
        };
        let mask = MaskSpec::resolve(
            shape,
            self.target_width,
            self.target_height,
            self.target_r,
            viewport,
        )?;

        if let Some(m) = self.min_image_size
            && (!m.is_finite() || m < 0.0)
        {
            return Err(ClipframeError::validation(format!(
                "minImageSize must be a non-negative number, got {m}"
            )));
        }

        Ok(ResolvedOpts {
            viewport,
            mask,
            mask_color: self.mask_color.unwrap_or_default(),
            gestures: self.gestures(),
            min_image_size: self.min_image_size,
            decode_order: self.decode_order,
        })
    }
}

/// Options after validation; immutable for the lifetime of a cropper.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedOpts {
    pub viewport: Canvas,
    pub mask: MaskSpec,
    pub mask_color: ColorDef,
    pub gestures: GestureFlags,
    pub min_image_size: Option<f64>,
    pub decode_order: DecodeOrder,
}

#[cfg(test)]
#[path = "../../tests/unit/session/opts.rs"]
mod tests;
