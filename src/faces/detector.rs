//! Face detector seam and the center-crop fallback

use crate::faces::region::FaceBox;
use crate::io::configuration::MAX_DETECTION_DIMENSION;
use image::imageops::FilterType;
use image::{DynamicImage, GrayImage};
use std::fmt;

/// Why a detector produced no usable result for one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectionError {
    /// The grayscale input had a zero dimension
    EmptyImage {
        /// Width handed to the detector
        width: u32,
        /// Height handed to the detector
        height: u32,
    },

    /// The detection backend failed internally
    Backend {
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for DetectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyImage { width, height } => {
                write!(f, "Cannot detect faces in a {width}x{height} image")
            }
            Self::Backend { reason } => write!(f, "Face detector failed: {reason}"),
        }
    }
}

impl std::error::Error for DetectionError {}

/// Finds face bounding boxes in a grayscale image
pub trait FaceDetector {
    /// Detect faces, reporting coordinates in `image` pixels
    ///
    /// # Errors
    ///
    /// Returns [`DetectionError`] when the image cannot be analysed; callers
    /// treat this the same as finding no faces
    fn detect(&mut self, image: &GrayImage) -> Result<Vec<FaceBox>, DetectionError>;
}

/// Detector used when no face model is configured; never finds a face
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFaceDetector;

impl FaceDetector for NoFaceDetector {
    fn detect(&mut self, _image: &GrayImage) -> Result<Vec<FaceBox>, DetectionError> {
        Ok(Vec::new())
    }
}

/// Run `detector` on a grayscale copy of `image`, downscaled when large
///
/// Boxes are mapped back to the coordinates of `image`.
///
/// # Errors
///
/// Returns the detector's error, or [`DetectionError::EmptyImage`] for an
/// image with a zero dimension
pub fn detect_faces(
    detector: &mut dyn FaceDetector,
    image: &DynamicImage,
) -> Result<Vec<FaceBox>, DetectionError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(DetectionError::EmptyImage { width, height });
    }

    let longest = width.max(height);
    let gray = if longest > MAX_DETECTION_DIMENSION {
        image
            .resize(
                MAX_DETECTION_DIMENSION,
                MAX_DETECTION_DIMENSION,
                FilterType::Triangle,
            )
            .to_luma8()
    } else {
        image.to_luma8()
    };

    let faces = detector.detect(&gray)?;
    if gray.width() == width {
        return Ok(faces);
    }

    let factor = f64::from(width) / f64::from(gray.width().max(1));
    Ok(faces.iter().map(|face| face.scaled(factor)).collect())
}

/// Resolve a detection result to the boxes the cropper should honour
///
/// A failed detection yields no boxes, which selects the centered crop.
pub fn faces_or_center(result: Result<Vec<FaceBox>, DetectionError>) -> Vec<FaceBox> {
    match result {
        Ok(faces) => faces,
        Err(error) => {
            tracing::debug!(%error, "face detection failed, falling back to center crop");
            Vec::new()
        }
    }
}
