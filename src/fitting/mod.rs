//! Cell fitting: face-aware cropping followed by interpolated resizing

/// Pure crop rectangle geometry
pub mod crop;
/// Crop-and-resize into a cell, with detector fallback
pub mod fitter;
