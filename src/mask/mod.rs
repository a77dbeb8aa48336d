//! The static dimming overlay around the crop shape.

pub mod generate;
pub mod shape;
