//! Input/output plumbing around the layout and fitting core

/// Command-line arguments and the collage build pipeline
pub mod cli;
/// Runtime defaults and tuning constants
pub mod configuration;
/// Error types and path context
pub mod error;
/// Image discovery, loading and saving
pub mod image;
/// Diagnostic logging setup
pub mod logging;
/// Progress bars
pub mod progress;
