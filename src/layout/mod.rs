//! Image placement inside the viewport.

/// Initial aspect-preserving fit.
pub mod placement;
pub mod transform;
