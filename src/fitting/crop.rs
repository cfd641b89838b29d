//! Aspect-preserving, face-aware crop rectangles
//!
//! Everything here is pure integer geometry on image and cell sizes, so the
//! cropping policy can be tested without decoding a single pixel.

use crate::faces::region::FaceBox;
use std::cmp::Ordering;

/// Sub-region of a source image, always inside the image bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl CropRect {
    /// Rectangle covering a whole `width` x `height` image
    pub const fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    /// Exclusive right edge
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Whether `other` lies entirely within this rectangle
    pub const fn contains(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Dimension along which an image must be trimmed to match a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropAxis {
    /// Aspect ratios already match
    None,
    /// Image is relatively wider than the cell; trim width
    Horizontal,
    /// Image is relatively taller than the cell; trim height
    Vertical,
}

/// Compare the image and cell aspect ratios exactly
pub fn crop_axis(image_width: u32, image_height: u32, cell_width: u32, cell_height: u32) -> CropAxis {
    let image_span = u64::from(image_width) * u64::from(cell_height);
    let cell_span = u64::from(image_height) * u64::from(cell_width);

    match image_span.cmp(&cell_span) {
        Ordering::Greater => CropAxis::Horizontal,
        Ordering::Less => CropAxis::Vertical,
        Ordering::Equal => CropAxis::None,
    }
}

/// Crop rectangle with the cell's aspect ratio, biased toward `faces`
///
/// The rectangle keeps the full extent of the image along one axis and is
/// slid along the other. Without faces the window is centered. With faces,
/// their combined region is kept inside the window when it fits; otherwise
/// the window is centered on the region.
pub fn crop_rect(
    image_width: u32,
    image_height: u32,
    cell_width: u32,
    cell_height: u32,
    faces: &[FaceBox],
) -> CropRect {
    if cell_width == 0 || cell_height == 0 {
        return CropRect::full(image_width, image_height);
    }

    let region = FaceBox::enclosing(faces).and_then(|face| face.clip_to(image_width, image_height));

    match crop_axis(image_width, image_height, cell_width, cell_height) {
        CropAxis::None => CropRect::full(image_width, image_height),
        CropAxis::Horizontal => {
            let width = scaled_extent(image_height, cell_width, cell_height).min(image_width);
            let x = slide_offset(image_width, width, region.map(|r| (r.x, r.right())));
            CropRect {
                x,
                y: 0,
                width,
                height: image_height,
            }
        }
        CropAxis::Vertical => {
            let height = scaled_extent(image_width, cell_height, cell_width).min(image_height);
            let y = slide_offset(image_height, height, region.map(|r| (r.y, r.bottom())));
            CropRect {
                x: 0,
                y,
                width: image_width,
                height,
            }
        }
    }
}

// round(base * numerator / denominator), never below one pixel
fn scaled_extent(base: u32, numerator: u32, denominator: u32) -> u32 {
    let denominator = u64::from(denominator.max(1));
    let value = (u64::from(base) * u64::from(numerator) + denominator / 2) / denominator;
    u32::try_from(value).unwrap_or(u32::MAX).max(1)
}

/// Offset of a `window`-long span inside `full`, honouring a `[start, end)` region
pub fn slide_offset(full: u32, window: u32, region: Option<(u32, u32)>) -> u32 {
    let max_offset = full.saturating_sub(window);
    let centered = max_offset / 2;

    let Some((start, end)) = region else {
        return centered;
    };

    let extent = end.saturating_sub(start);
    let offset = if extent <= window {
        // Smallest move from center that keeps [start, end) in the window
        centered.clamp(end.saturating_sub(window), start)
    } else {
        (start + extent / 2).saturating_sub(window / 2)
    };

    offset.min(max_offset)
}
