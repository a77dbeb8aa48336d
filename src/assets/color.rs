use std::str::FromStr;

use crate::foundation::core::Rgba8Premul;
use serde::{Deserialize, Serialize};

/// Straight-alpha color with channels normalized to `0..=1`.
///
/// Deserializes from any CSS color string (`rgba(0,0,0,.5)`, `#000`, `red`, `hsl(...)`), an
/// `{r,g,b,a}` object, or an `[r,g,b(,a)]` array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorDef {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl ColorDef {
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Default tint of the area outside the crop shape: `rgba(0,0,0,.5)`.
    pub fn default_mask() -> Self {
        Self::rgba(0.0, 0.0, 0.0, 0.5)
    }

    pub fn to_rgba8_premul(self) -> Rgba8Premul {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }

        let a = self.a.clamp(0.0, 1.0);
        let r = (self.r.clamp(0.0, 1.0) * a).clamp(0.0, 1.0);
        let g = (self.g.clamp(0.0, 1.0) * a).clamp(0.0, 1.0);
        let b = (self.b.clamp(0.0, 1.0) * a).clamp(0.0, 1.0);

        Rgba8Premul {
            r: to_u8(r),
            g: to_u8(g),
            b: to_u8(b),
            a: to_u8(a),
        }
    }
}

impl Default for ColorDef {
    fn default() -> Self {
        Self::default_mask()
    }
}

impl FromStr for ColorDef {
    type Err = String;

    /// Any CSS color: named colors, `#rgb[a]`, `#rrggbb[aa]`, `rgb()`/`rgba()`, `hsl()`, `hwb()`,
    /// `lab()`, `oklch()` and friends. Non-sRGB spaces are converted to sRGB.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let parsed = vello_cpu::peniko::color::parse_color(&lower)
            .map_err(|e| format!("invalid color \"{s}\": {e}"))?;
        let [r, g, b, a] = parsed
            .to_alpha_color::<vello_cpu::peniko::color::Srgb>()
            .components;
        Ok(Self::rgba(
            f64::from(r),
            f64::from(g),
            f64::from(b),
            f64::from(a),
        ))
    }
}

impl<'de> Deserialize<'de> for ColorDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Css(String),
            RgbaObj {
                r: f64,
                g: f64,
                b: f64,
                #[serde(default = "one")]
                a: f64,
            },
            Arr(Vec<f64>),
        }

        fn one() -> f64 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Css(s) => s.parse().map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Self::rgba(r, g, b, a)),
            Repr::Arr(v) => {
                if v.len() == 3 {
                    Ok(Self::rgba(v[0], v[1], v[2], 1.0))
                } else if v.len() == 4 {
                    Ok(Self::rgba(v[0], v[1], v[2], v[3]))
                } else {
                    Err(serde::de::Error::custom(
                        "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                    ))
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
