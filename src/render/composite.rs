use crate::foundation::math::{add_sat_u8, mul_div255_u8};

pub type PremulRgba8 = [u8; 4];

/// Porter-Duff source-over for one premultiplied pixel.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = u16::from(src[3]);
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - sa;
    let mut out = [0u8; 4];
    out[3] = add_sat_u8(src[3], mul_div255_u8(u16::from(dst[3]), inv));
    for c in 0..3 {
        let dc = mul_div255_u8(u16::from(dst[c]), inv);
        out[c] = add_sat_u8(src[c], dc);
    }
    out
}

/// Composite `src` over `dst`; both are tightly packed premultiplied RGBA8 of equal size.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) {
    debug_assert_eq!(dst.len(), src.len());
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
}

/// Scale every pixel of `dst` by the alpha of `coverage` (or by its complement when
/// `inverted`).
///
/// Non-inverted keeps what lies inside the covered shape (a clip); inverted keeps what lies
/// outside it (a "source-out" cut-out).
pub fn mask_alpha_in_place(dst: &mut [u8], coverage: &[u8], inverted: bool) {
    debug_assert_eq!(dst.len(), coverage.len());
    for (d, m) in dst.chunks_exact_mut(4).zip(coverage.chunks_exact(4)) {
        let mut w = m[3];
        if inverted {
            w = 255 - w;
        }
        if w == 255 {
            continue;
        }
        let w16 = u16::from(w);
        d[0] = mul_div255_u8(u16::from(d[0]), w16);
        d[1] = mul_div255_u8(u16::from(d[1]), w16);
        d[2] = mul_div255_u8(u16::from(d[2]), w16);
        d[3] = mul_div255_u8(u16::from(d[3]), w16);
    }
}

/// Fill a premultiplied RGBA8 buffer with one color.
pub fn fill_premul(dst: &mut [u8], color: PremulRgba8) {
    for px in dst.chunks_exact_mut(4) {
        px.copy_from_slice(&color);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
