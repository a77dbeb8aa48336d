//! Image inputs: MIME filtering, decoding to premultiplied RGBA8, and mask color parsing.

pub mod color;
pub mod decode;
pub mod mime;
pub(crate) mod svg_raster;
