//! Collage canvas: a background-filled buffer that cells are pasted onto

use crate::io::error::{Result, computation_error};
use crate::layout::plan::Cell;
use image::{Rgb, RgbImage, imageops};

/// Output pixel buffer for one collage
#[derive(Debug, Clone)]
pub struct Canvas {
    buffer: RgbImage,
    pasted: usize,
}

impl Canvas {
    /// Allocate a `width` x `height` canvas filled with `background`
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self {
            buffer: RgbImage::from_pixel(width, height, background),
            pasted: 0,
        }
    }

    /// Canvas dimensions as `(width, height)`
    pub fn dimensions(&self) -> (u32, u32) {
        self.buffer.dimensions()
    }

    /// Number of cells pasted so far
    pub const fn pasted(&self) -> usize {
        self.pasted
    }

    /// Copy a fitted image into `cell`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `image` does not have the cell's dimensions
    /// - The cell extends past the canvas
    pub fn paste(&mut self, cell: &Cell, image: &RgbImage) -> Result<()> {
        if image.dimensions() != (cell.width, cell.height) {
            return Err(computation_error(
                "paste",
                &format!(
                    "image is {}x{} but cell {} is {}x{}",
                    image.width(),
                    image.height(),
                    cell.image,
                    cell.width,
                    cell.height
                ),
            ));
        }

        let (width, height) = self.dimensions();
        let right = u64::from(cell.x) + u64::from(cell.width);
        let bottom = u64::from(cell.y) + u64::from(cell.height);
        if right > u64::from(width) || bottom > u64::from(height) {
            return Err(computation_error(
                "paste",
                &format!(
                    "cell {} at ({}, {}) overflows the {width}x{height} canvas",
                    cell.image, cell.x, cell.y
                ),
            ));
        }

        imageops::replace(&mut self.buffer, image, i64::from(cell.x), i64::from(cell.y));
        self.pasted += 1;
        Ok(())
    }

    /// Borrow the pixels
    pub const fn image(&self) -> &RgbImage {
        &self.buffer
    }

    /// Take ownership of the pixels
    pub fn into_image(self) -> RgbImage {
        self.buffer
    }
}
