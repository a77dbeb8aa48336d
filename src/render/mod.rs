//! CPU rendering of the viewport (image plus mask).

/// Frame readback type.
pub mod backend;
pub(crate) mod composite;
pub mod cpu;
pub mod pipeline;
