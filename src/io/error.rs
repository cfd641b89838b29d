//! Error types and path context for collage operations

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all collage operations
#[derive(Debug)]
pub enum CollageError {
    /// Failed to decode a source image
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// A decoded image has a zero width or height
    InvalidImageDimensions {
        /// Position of the image in the planned sequence
        index: usize,
        /// Reported width in pixels
        width: u32,
        /// Reported height in pixels
        height: u32,
    },

    /// Command-line or layout parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// The input path is not a readable directory
    NotADirectory {
        /// Path that was given as the input folder
        path: PathBuf,
    },

    /// No usable images were found or loaded
    NoImages {
        /// Folder that was scanned
        folder: PathBuf,
    },

    /// Output file exists and overwriting was not confirmed
    OutputExists {
        /// Path of the existing output file
        path: PathBuf,
    },

    /// The face detection model could not be loaded
    FaceModel {
        /// Path to the model file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Failed to encode or save the collage
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Geometry computation produced an unusable result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for CollageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidImageDimensions {
                index,
                width,
                height,
            } => {
                write!(f, "Image {index} has invalid dimensions {width}x{height}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::NotADirectory { path } => {
                write!(f, "Input folder '{}' is not a directory", path.display())
            }
            Self::NoImages { folder } => {
                write!(f, "No usable images found in '{}'", folder.display())
            }
            Self::OutputExists { path } => {
                write!(
                    f,
                    "Output file '{}' already exists (use --overwrite to replace it)",
                    path.display()
                )
            }
            Self::FaceModel { path, source } => {
                write!(
                    f,
                    "Failed to load face model '{}': {source}",
                    path.display()
                )
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for CollageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } | Self::FaceModel { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for collage results
pub type Result<T> = std::result::Result<T, CollageError>;

/// Attaches the offending path to I/O failures
pub trait WithPath<T> {
    /// Convert an I/O error into [`CollageError::FileSystem`] for `path`
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path and operation attached
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T> WithPath<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|source| CollageError::FileSystem {
            path: path.to_path_buf(),
            operation,
            source,
        })
    }
}

impl From<std::io::Error> for CollageError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> CollageError {
    CollageError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> CollageError {
    CollageError::Computation {
        operation,
        reason: reason.to_string(),
    }
}
