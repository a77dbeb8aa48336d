//! Clipframe positions a raster image inside a fixed viewport, lets the user pan and zoom it
//! under a rectangular or circular crop mask, and exports exactly the pixels inside the shape.
//!
//! The entry point is [`Cropper`]:
//!
//! - Build one from [`CropperOpts`] (viewport size, shape, target size, mask color)
//! - Feed images with [`Cropper::incoming_image`] and apply decodes with [`Cropper::poll`]
//! - Pan and zoom with [`Cropper::moving`] / [`Cropper::scaling`] or raw [`InputEvent`]s
//! - Export with [`Cropper::to_data_url`] once [`Cropper::is_painting_finished`] is `true`
#![forbid(unsafe_code)]

pub mod assets;
pub mod export;
pub mod foundation;
pub mod input;
pub mod layout;
pub mod mask;
pub mod render;
pub mod session;

pub use crate::assets::color::ColorDef;
pub use crate::assets::mime::{ALLOWED_IMAGE_MIME_TYPES, ImageInput, is_allowed_mime};
pub use crate::export::encode::{EncodedImage, OutputFormat};
pub use crate::foundation::core::{Canvas, Point, Rect, Rgba8Premul, Vec2};
pub use crate::foundation::error::{ClipframeError, ClipframeResult};
pub use crate::input::gesture::{ArrowKey, CropMessage, GestureFlags, InputEvent};
pub use crate::layout::placement::fit;
pub use crate::layout::transform::Transform;
pub use crate::mask::shape::{MaskSpec, TargetShape};
pub use crate::render::backend::FrameRGBA;
pub use crate::session::cropper::{Cropper, DecodeTicket};
pub use crate::session::opts::{CropperOpts, DecodeOrder, ResolvedOpts};
