//! Face bounding boxes and the combined face region

use crate::fitting::crop::CropRect;

/// Axis-aligned face bounding box in source image pixels
///
/// Detectors may report boxes that extend past the image border, so the
/// origin is signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceBox {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl FaceBox {
    /// Create a face box from its top-left corner and size
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge
    pub const fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Exclusive bottom edge
    pub const fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Smallest box enclosing every box in `faces`, or `None` when empty
    pub fn enclosing(faces: &[Self]) -> Option<Self> {
        let first = faces.first()?;
        let (mut left, mut top) = (i64::from(first.x), i64::from(first.y));
        let (mut right, mut bottom) = (first.right(), first.bottom());

        for face in faces.iter().skip(1) {
            left = left.min(i64::from(face.x));
            top = top.min(i64::from(face.y));
            right = right.max(face.right());
            bottom = bottom.max(face.bottom());
        }

        Some(Self {
            x: clamp_to_i32(left),
            y: clamp_to_i32(top),
            width: clamp_to_u32(right - left),
            height: clamp_to_u32(bottom - top),
        })
    }

    /// Intersection with a `width` x `height` image, `None` if nothing remains
    pub fn clip_to(&self, width: u32, height: u32) -> Option<CropRect> {
        let left = i64::from(self.x).clamp(0, i64::from(width));
        let top = i64::from(self.y).clamp(0, i64::from(height));
        let right = self.right().clamp(0, i64::from(width));
        let bottom = self.bottom().clamp(0, i64::from(height));

        (right > left && bottom > top).then(|| CropRect {
            x: clamp_to_u32(left),
            y: clamp_to_u32(top),
            width: clamp_to_u32(right - left),
            height: clamp_to_u32(bottom - top),
        })
    }

    /// Scale position and size by `factor`, rounding outward
    pub fn scaled(&self, factor: f64) -> Self {
        let left = (f64::from(self.x) * factor).floor();
        let top = (f64::from(self.y) * factor).floor();
        let right = (self.right() as f64 * factor).ceil();
        let bottom = (self.bottom() as f64 * factor).ceil();

        Self {
            x: left as i32,
            y: top as i32,
            width: (right - left).max(0.0) as u32,
            height: (bottom - top).max(0.0) as u32,
        }
    }
}

fn clamp_to_i32(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

fn clamp_to_u32(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(if value < 0 { 0 } else { u32::MAX })
}
