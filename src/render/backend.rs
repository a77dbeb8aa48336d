use crate::foundation::core::Canvas;
use crate::foundation::math::unpremul_channel;

/// A rendered surface read back as RGBA8 pixels.
///
/// Surfaces are **premultiplied alpha** internally; the `premultiplied` flag makes this explicit
/// at API boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub(crate) fn premul(canvas: Canvas, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), canvas.byte_len());
        Self {
            width: canvas.width,
            height: canvas.height,
            data,
            premultiplied: true,
        }
    }

    /// The pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy of the pixels, as image encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = px[3];
            px[0] = unpremul_channel(px[0], a);
            px[1] = unpremul_channel(px[1], a);
            px[2] = unpremul_channel(px[2], a);
        }
        out
    }
}
