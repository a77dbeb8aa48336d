use crate::foundation::error::{ClipframeError, ClipframeResult};

pub use kurbo::{Point, Rect, Vec2};

/// Largest side, in pixels, a raster surface may have.
pub const MAX_SURFACE_DIM: u32 = u16::MAX as u32;

/// Pixel dimensions of a drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a validated canvas; both sides must be in `1..=MAX_SURFACE_DIM`.
    pub fn new(width: u32, height: u32) -> ClipframeResult<Self> {
        let c = Self { width, height };
        c.validate()?;
        Ok(c)
    }

    pub(crate) fn validate(self) -> ClipframeResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ClipframeError::validation(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_SURFACE_DIM || self.height > MAX_SURFACE_DIM {
            return Err(ClipframeError::validation(format!(
                "canvas {}x{} exceeds {MAX_SURFACE_DIM}x{MAX_SURFACE_DIM}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }

    /// Center of the canvas in its own pixel space.
    pub fn center(self) -> Point {
        Point::new(self.width_f64() / 2.0, self.height_f64() / 2.0)
    }

    pub(crate) fn dims_u16(self) -> (u16, u16) {
        // `validate` keeps both sides within u16.
        (
            u16::try_from(self.width).unwrap_or(u16::MAX),
            u16::try_from(self.height).unwrap_or(u16::MAX),
        )
    }

    pub(crate) fn byte_len(self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
