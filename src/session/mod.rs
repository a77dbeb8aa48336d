//! The stateful cropper and its options.

pub mod cropper;
pub mod opts;
