//! Row plans: which images share a row, and how tall and wide their cells are

use crate::io::error::{CollageError, Result, invalid_parameter};
use crate::layout::policy::RowCountPolicy;

/// Target canvas and layout constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSpec {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Row count requested by the user, if any
    pub rows: Option<usize>,
    /// Gap around and between cells in pixels
    pub padding: u32,
}

impl CanvasSpec {
    /// Canvas of the given size with automatic rows and no padding
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rows: None,
            padding: 0,
        }
    }

    /// Request a fixed row count (`None` lets the policy decide)
    #[must_use]
    pub const fn with_rows(mut self, rows: Option<usize>) -> Self {
        self.rows = rows;
        self
    }

    /// Set the padding around and between cells
    #[must_use]
    pub const fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// Check the canvas can hold at least one cell
    ///
    /// # Errors
    ///
    /// Returns an error for a zero dimension or a requested row count of zero
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(invalid_parameter(
                "canvas",
                &format!("{}x{}", self.width, self.height),
                &"canvas dimensions must be positive",
            ));
        }
        if self.rows == Some(0) {
            return Err(invalid_parameter("rows", &0, &"row count must be at least 1"));
        }
        Ok(())
    }

    /// Pixels left along `total` for `count` cells once padding is removed
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than one pixel per cell would remain
    pub fn content_extent(&self, total: u32, count: usize) -> Result<u32> {
        let count_u64 = count as u64;
        let gaps = (count_u64 + 1) * u64::from(self.padding);
        let available = u64::from(total).saturating_sub(gaps);

        if count == 0 || available < count_u64 {
            return Err(invalid_parameter(
                "canvas",
                &format!("{}x{}", self.width, self.height),
                &format!(
                    "too small for {count} cells of at least one pixel with padding {}",
                    self.padding
                ),
            ));
        }

        u32::try_from(available).map_err(|error| invalid_parameter("canvas", &available, &error))
    }
}

/// Images sharing one row of the collage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowPlan {
    /// Indices into the planned image sequence, left to right
    pub images: Vec<usize>,
    /// Height shared by every cell in the row
    pub height: u32,
    /// Width of each cell, parallel to `images`
    pub cell_widths: Vec<u32>,
    /// Top edge of the row on the canvas
    pub y: u32,
}

impl RowPlan {
    /// Number of images in the row
    pub const fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the row holds no images
    pub const fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Cells of this row with canvas positions, left to right
    pub fn cells(&self, padding: u32) -> impl Iterator<Item = Cell> + '_ {
        let mut x = padding;
        self.images
            .iter()
            .zip(&self.cell_widths)
            .map(move |(&image, &width)| {
                let cell = Cell {
                    image,
                    x,
                    y: self.y,
                    width,
                    height: self.height,
                };
                x += width + padding;
                cell
            })
    }
}

/// Canvas region allotted to one source image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Index into the planned image sequence
    pub image: usize,
    /// Left edge on the canvas
    pub x: u32,
    /// Top edge on the canvas
    pub y: u32,
    /// Cell width
    pub width: u32,
    /// Cell height
    pub height: u32,
}

/// Complete arrangement of images on a canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    canvas: CanvasSpec,
    rows: Vec<RowPlan>,
}

impl Layout {
    /// Canvas this layout was planned for
    pub const fn canvas(&self) -> &CanvasSpec {
        &self.canvas
    }

    /// Rows top to bottom
    pub fn rows(&self) -> &[RowPlan] {
        &self.rows
    }

    /// Whether no image was placed
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total number of placed images
    pub fn image_count(&self) -> usize {
        self.rows.iter().map(RowPlan::len).sum()
    }

    /// All cells, left to right then top to bottom
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.rows
            .iter()
            .flat_map(move |row| row.cells(self.canvas.padding))
    }
}

/// Plan rows for images of the given `(width, height)` in order
///
/// Uses `canvas.rows` when set, otherwise asks `policy`; either way the row
/// count is clamped to the number of images. An empty image list produces an
/// empty layout.
///
/// # Errors
///
/// Returns an error if:
/// - The canvas has a zero dimension or a requested row count of zero
/// - Any image has a zero dimension
/// - Padding leaves less than one pixel per row or cell
pub fn plan<P: RowCountPolicy + ?Sized>(
    dimensions: &[(u32, u32)],
    canvas: &CanvasSpec,
    policy: &P,
) -> Result<Layout> {
    canvas.validate()?;

    if let Some((index, &(width, height))) = dimensions
        .iter()
        .enumerate()
        .find(|(_, (width, height))| *width == 0 || *height == 0)
    {
        return Err(CollageError::InvalidImageDimensions {
            index,
            width,
            height,
        });
    }

    let image_count = dimensions.len();
    if image_count == 0 {
        return Ok(Layout {
            canvas: *canvas,
            rows: Vec::new(),
        });
    }

    let aspect_ratios: Vec<f64> = dimensions
        .iter()
        .map(|&(width, height)| f64::from(width) / f64::from(height))
        .collect();

    let row_count = canvas
        .rows
        .unwrap_or_else(|| policy.row_count(&aspect_ratios, canvas.width, canvas.height))
        .clamp(1, image_count);

    let heights = row_heights(canvas.content_extent(canvas.height, row_count)?, row_count);
    let mut rows = Vec::with_capacity(row_count);
    let mut next_image = 0;
    let mut y = canvas.padding;

    for (count, height) in row_sizes(image_count, row_count).into_iter().zip(heights) {
        let row_aspects = aspect_ratios
            .get(next_image..next_image + count)
            .unwrap_or(&[]);
        let content_width = canvas.content_extent(canvas.width, count)?;

        rows.push(RowPlan {
            images: (next_image..next_image + count).collect(),
            height,
            cell_widths: cell_widths(height, row_aspects, content_width),
            y,
        });

        next_image += count;
        y += height + canvas.padding;
    }

    Ok(Layout {
        canvas: *canvas,
        rows,
    })
}

/// Images per row: `N / R` each, one extra for the first `N % R` rows
pub fn row_sizes(image_count: usize, row_count: usize) -> Vec<usize> {
    if row_count == 0 {
        return Vec::new();
    }
    let base = image_count / row_count;
    let extra = image_count % row_count;
    (0..row_count).map(|row| base + usize::from(row < extra)).collect()
}

/// Equal row heights, the last row absorbing the remainder
pub fn row_heights(total_height: u32, row_count: usize) -> Vec<u32> {
    let Ok(rows) = u32::try_from(row_count) else {
        return Vec::new();
    };
    if rows == 0 {
        return Vec::new();
    }

    let base = total_height / rows;
    let mut heights = vec![base; row_count];
    if let Some(last) = heights.last_mut() {
        *last = total_height - base * (rows - 1);
    }
    heights
}

/// Cell widths proportional to each image's aspect ratio, summing to `total_width`
///
/// Natural widths at `row_height` are rescaled to the row; each cell keeps at
/// least one pixel and the last cell absorbs the rounding remainder.
pub fn cell_widths(row_height: u32, aspect_ratios: &[f64], total_width: u32) -> Vec<u32> {
    let natural: Vec<f64> = aspect_ratios
        .iter()
        .map(|aspect| (f64::from(row_height) * aspect).round().max(1.0))
        .collect();
    let natural_sum: f64 = natural.iter().sum();
    let scale = f64::from(total_width) / natural_sum;

    let mut widths = Vec::with_capacity(natural.len());
    let mut remaining = total_width;

    for (index, width) in natural.iter().enumerate() {
        let later_cells = (natural.len() - 1 - index) as u32;
        if later_cells == 0 {
            widths.push(remaining);
            break;
        }
        let upper = remaining.saturating_sub(later_cells).max(1);
        let scaled = ((width * scale).round() as u32).clamp(1, upper);
        widths.push(scaled);
        remaining = remaining.saturating_sub(scaled);
    }

    widths
}
