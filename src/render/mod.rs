//! Canvas-to-raster rendering.

/// Rendered frame buffers.
pub mod frame;
/// Nearest-neighbor canvas rasterization.
pub mod raster;
