//! Re-projection of the crop region and output encoding.

pub mod encode;
pub mod projector;
