//! Crop-and-resize of one source image into its cell

use crate::faces::detector::{FaceDetector, detect_faces, faces_or_center};
use crate::faces::region::FaceBox;
use crate::fitting::crop::{CropAxis, CropRect, crop_axis, crop_rect};
use crate::io::error::{Result, invalid_parameter};
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};

/// A source image cropped and scaled to exactly fill one cell
#[derive(Debug, Clone)]
pub struct FittedCell {
    /// Region of the source image that was kept
    pub crop: CropRect,
    /// Pixels sized to the cell
    pub image: RgbImage,
}

/// Crop `image` to the cell's aspect ratio around `faces`, then resize to the cell
///
/// # Errors
///
/// Returns an error if either cell dimension is zero
pub fn fit(
    image: &DynamicImage,
    cell_width: u32,
    cell_height: u32,
    faces: &[FaceBox],
) -> Result<FittedCell> {
    if cell_width == 0 || cell_height == 0 {
        return Err(invalid_parameter(
            "cell",
            &format!("{cell_width}x{cell_height}"),
            &"cell dimensions must be positive",
        ));
    }

    let crop = crop_rect(image.width(), image.height(), cell_width, cell_height, faces);
    let resized = image
        .crop_imm(crop.x, crop.y, crop.width, crop.height)
        .resize_exact(cell_width, cell_height, FilterType::Lanczos3);

    Ok(FittedCell {
        crop,
        image: resized.to_rgb8(),
    })
}

/// Fits images to cells, consulting a face detector only when a crop is needed
pub struct CellFitter<'d> {
    detector: &'d mut dyn FaceDetector,
}

impl<'d> CellFitter<'d> {
    /// Create a fitter that steers crops with `detector`
    pub fn new(detector: &'d mut dyn FaceDetector) -> Self {
        Self { detector }
    }

    /// Faces to keep in frame for `image` placed in a cell of the given size
    ///
    /// Detection is skipped when the aspect ratios already match; a failed
    /// detection yields no faces.
    pub fn faces_for(&mut self, image: &DynamicImage, cell_width: u32, cell_height: u32) -> Vec<FaceBox> {
        if crop_axis(image.width(), image.height(), cell_width, cell_height) == CropAxis::None {
            return Vec::new();
        }
        faces_or_center(detect_faces(&mut *self.detector, image))
    }

    /// Fit `image` into a `cell_width` x `cell_height` cell
    ///
    /// # Errors
    ///
    /// Returns an error if either cell dimension is zero
    pub fn fit(&mut self, image: &DynamicImage, cell_width: u32, cell_height: u32) -> Result<FittedCell> {
        let faces = self.faces_for(image, cell_width, cell_height);
        let fitted = fit(image, cell_width, cell_height, &faces)?;
        tracing::debug!(
            faces = faces.len(),
            crop = ?fitted.crop,
            cell_width,
            cell_height,
            "fitted cell"
        );
        Ok(fitted)
    }
}
