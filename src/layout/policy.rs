//! Row count heuristics
//!
//! Choosing how many rows a collage gets has no single right answer, so the
//! choice is a named policy rather than arithmetic buried in the planner.

use crate::layout::plan::row_sizes;
use clap::ValueEnum;

/// Chooses a row count for images with the given aspect ratios (width / height)
pub trait RowCountPolicy {
    /// Preferred number of rows; the planner clamps the answer to `[1, N]`
    fn row_count(&self, aspect_ratios: &[f64], canvas_width: u32, canvas_height: u32) -> usize;
}

/// Built-in row count policies selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RowPolicy {
    /// Rows at which average images fill the canvas without stretching
    #[default]
    Balanced,
    /// `sqrt(N * height / width)`, ignoring image shapes
    SquareRoot,
    /// Try every row count and keep the one needing the least cropping
    Search,
}

impl RowCountPolicy for RowPolicy {
    fn row_count(&self, aspect_ratios: &[f64], canvas_width: u32, canvas_height: u32) -> usize {
        match self {
            Self::Balanced => balanced_row_count(aspect_ratios, canvas_width, canvas_height),
            Self::SquareRoot => {
                square_root_row_count(aspect_ratios.len(), canvas_width, canvas_height)
            }
            Self::Search => minimal_distortion_row_count(aspect_ratios, canvas_width, canvas_height),
        }
    }
}

/// `round(sqrt(N * height / width))`, clamped to `[1, N]`
pub fn square_root_row_count(image_count: usize, canvas_width: u32, canvas_height: u32) -> usize {
    rounded_rows(image_count, 1.0, canvas_width, canvas_height)
}

/// `round(sqrt(N * height * mean_aspect / width))`, clamped to `[1, N]`
///
/// With `R` rows of `N / R` average images, each row is `height / R` tall and
/// `N * height * mean_aspect / R^2` wide; this is the `R` making that width
/// equal to the canvas width.
pub fn balanced_row_count(aspect_ratios: &[f64], canvas_width: u32, canvas_height: u32) -> usize {
    if aspect_ratios.is_empty() {
        return 1;
    }
    let mean_aspect = aspect_ratios.iter().sum::<f64>() / aspect_ratios.len() as f64;
    rounded_rows(aspect_ratios.len(), mean_aspect, canvas_width, canvas_height)
}

fn rounded_rows(image_count: usize, mean_aspect: f64, canvas_width: u32, canvas_height: u32) -> usize {
    if image_count == 0 || canvas_width == 0 {
        return 1;
    }
    let rows = (image_count as f64 * f64::from(canvas_height) * mean_aspect / f64::from(canvas_width))
        .sqrt()
        .round();
    if rows.is_finite() {
        (rows as usize).clamp(1, image_count)
    } else {
        1
    }
}

/// Row count in `[1, N]` with the smallest mean squared log-stretch per image
///
/// A row of natural width `w` (images scaled to the row height) is stretched
/// by `canvas_width / w` to fill the canvas, which the fitter pays for with
/// cropping. Ties keep the smaller row count.
pub fn minimal_distortion_row_count(
    aspect_ratios: &[f64],
    canvas_width: u32,
    canvas_height: u32,
) -> usize {
    let image_count = aspect_ratios.len();
    let mut best = (1, f64::INFINITY);

    for rows in 1..=image_count {
        let cost = stretch_cost(aspect_ratios, rows, canvas_width, canvas_height);
        if cost < best.1 {
            best = (rows, cost);
        }
    }

    best.0
}

/// Mean squared log-stretch of `rows` evenly distributed rows
pub fn stretch_cost(aspect_ratios: &[f64], rows: usize, canvas_width: u32, canvas_height: u32) -> f64 {
    if aspect_ratios.is_empty() || rows == 0 {
        return f64::INFINITY;
    }

    let row_height = f64::from(canvas_height) / rows as f64;
    let mut start = 0;
    let mut total = 0.0;

    for count in row_sizes(aspect_ratios.len(), rows) {
        let row = aspect_ratios.get(start..start + count).unwrap_or(&[]);
        let natural_width: f64 = row.iter().map(|aspect| aspect * row_height).sum();
        if natural_width > 0.0 {
            let stretch = (f64::from(canvas_width) / natural_width).ln();
            total += stretch * stretch * count as f64;
        }
        start += count;
    }

    total / aspect_ratios.len() as f64
}
