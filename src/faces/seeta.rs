//! SeetaFace frontal detector backed by `rustface`

use crate::faces::detector::{DetectionError, FaceDetector};
use crate::faces::region::FaceBox;
use crate::io::configuration::{
    FACE_SCORE_THRESHOLD, MIN_FACE_SIZE, PYRAMID_SCALE_FACTOR, SLIDE_WINDOW_STEP,
};
use crate::io::error::{CollageError, Result};
use image::GrayImage;
use rustface::{Detector, ImageData};
use std::path::Path;

/// Face detector using a SeetaFace funnel-structured cascade model file
pub struct SeetaFaceDetector {
    inner: Box<dyn Detector>,
}

impl SeetaFaceDetector {
    /// Load a model (e.g. `seeta_fd_frontal_v1.0.bin`) and apply default tuning
    ///
    /// # Errors
    ///
    /// Returns [`CollageError::FaceModel`] if the file cannot be read or parsed
    pub fn from_model_file(path: &Path) -> Result<Self> {
        let model_path = path.to_str().ok_or_else(|| CollageError::FaceModel {
            path: path.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "model path is not valid UTF-8",
            ),
        })?;

        let mut inner =
            rustface::create_detector(model_path).map_err(|source| CollageError::FaceModel {
                path: path.to_path_buf(),
                source,
            })?;

        inner.set_min_face_size(MIN_FACE_SIZE);
        inner.set_score_thresh(FACE_SCORE_THRESHOLD);
        inner.set_pyramid_scale_factor(PYRAMID_SCALE_FACTOR);
        inner.set_slide_window_step(SLIDE_WINDOW_STEP, SLIDE_WINDOW_STEP);

        Ok(Self { inner })
    }
}

impl FaceDetector for SeetaFaceDetector {
    fn detect(&mut self, image: &GrayImage) -> std::result::Result<Vec<FaceBox>, DetectionError> {
        let (width, height) = image.dimensions();
        // The backend asserts on empty input instead of reporting it
        if width == 0 || height == 0 {
            return Err(DetectionError::EmptyImage { width, height });
        }

        let mut data = ImageData::new(image.as_raw(), width, height);
        let faces = self
            .inner
            .detect(&mut data)
            .iter()
            .map(|info| {
                let bbox = info.bbox();
                FaceBox::new(bbox.x(), bbox.y(), bbox.width(), bbox.height())
            })
            .collect();

        Ok(faces)
    }
}
