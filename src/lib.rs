//! Face-aware photo collage layout
//!
//! Arranges a folder of images into rows on a fixed canvas. The layout planner
//! sizes every cell so rows fill the canvas exactly, and the cell fitter crops
//! each image to its cell's aspect ratio while keeping detected faces in frame.

#![forbid(unsafe_code)]

/// Canvas buffer, cell pasting and background colours
pub mod compose;
/// Face bounding boxes and detector backends
pub mod faces;
/// Face-aware crop geometry and crop-and-resize into cells
pub mod fitting;
/// Command line, image I/O, progress, logging and error handling
pub mod io;
/// Row count policies and row/cell planning
pub mod layout;

pub use io::error::{CollageError, Result};
