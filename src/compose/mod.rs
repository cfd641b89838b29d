//! Canvas composition

/// Canvas buffer and cell pasting
pub mod canvas;
/// Background colour parsing
pub mod color;
