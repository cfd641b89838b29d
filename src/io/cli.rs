//! Command-line interface and the collage build pipeline

use crate::compose::canvas::Canvas;
use crate::compose::color::parse_rgb_color;
use crate::faces::detector::{FaceDetector, NoFaceDetector};
use crate::faces::seeta::SeetaFaceDetector;
use crate::fitting::fitter::CellFitter;
use crate::io::configuration::{
    DEFAULT_BACKGROUND, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_OUTPUT,
    DEFAULT_PADDING, MAX_CANVAS_DIMENSION,
};
use crate::io::error::{CollageError, Result, computation_error};
use crate::io::image::{LoadedImages, SourceImage, collect_image_paths, load_all, save_atomically};
use crate::io::progress::ProgressManager;
use crate::layout::plan::{CanvasSpec, Layout, plan};
use crate::layout::policy::RowPolicy;
use clap::Parser;
use clap::builder::RangedU64ValueParser;
use image::Rgb;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::io::{BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "photocollage")]
#[command(
    author,
    version,
    about = "Arrange a folder of photos into a single face-aware collage"
)]
/// Command-line arguments for the collage tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Folder containing the images
    #[arg(value_name = "INPUT_FOLDER")]
    pub input_folder: PathBuf,

    /// Width of the canvas in pixels
    #[arg(
        short = 'w',
        long,
        default_value_t = DEFAULT_CANVAS_WIDTH,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_CANVAS_DIMENSION))
    )]
    pub width: u32,

    /// Height of the canvas in pixels
    #[arg(
        short = 'i',
        long,
        default_value_t = DEFAULT_CANVAS_HEIGHT,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_CANVAS_DIMENSION))
    )]
    pub height: u32,

    /// Output file; the format follows the extension
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Number of rows (chosen automatically when omitted)
    #[arg(short = 'n', long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub num_rows: Option<usize>,

    /// Shuffle images before arranging
    #[arg(short, long)]
    pub shuffle: bool,

    /// Seed for a reproducible shuffle
    #[arg(long, requires = "shuffle")]
    pub seed: Option<u64>,

    /// Padding around each image in pixels
    #[arg(short, long, default_value_t = DEFAULT_PADDING)]
    pub padding: u32,

    /// Background color as '#RRGGBB' or '#RGB'
    #[arg(short = 'c', long = "color", default_value = DEFAULT_BACKGROUND, value_parser = parse_rgb_color)]
    pub background: Rgb<u8>,

    /// Overwrite the output file without asking
    #[arg(short = 'Y', long)]
    pub overwrite: bool,

    /// SeetaFace model file enabling face-aware crops; without it face
    /// detection is off and every crop is centered
    #[arg(short = 'f', long, value_name = "MODEL")]
    pub face_model: Option<PathBuf>,

    /// Heuristic choosing the row count when --num-rows is omitted
    #[arg(long, value_enum, default_value_t = RowPolicy::Balanced)]
    pub row_policy: RowPolicy,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log detail (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Canvas constraints described by the arguments
    pub const fn canvas(&self) -> CanvasSpec {
        CanvasSpec::new(self.width, self.height)
            .with_rows(self.num_rows)
            .with_padding(self.padding)
    }
}

/// Outcome of a successful collage build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollageSummary {
    /// Where the collage was written
    pub output: PathBuf,
    /// Number of images on the canvas
    pub placed: usize,
    /// Number of rows used
    pub rows: usize,
    /// Candidates that failed to load
    pub skipped: Vec<PathBuf>,
}

/// Ask on `output` whether `path` may be replaced, reading the answer from `input`
///
/// Only `y` or `yes` (any case) confirm.
///
/// # Errors
///
/// Returns an error if writing the prompt or reading the answer fails
pub fn confirm_overwrite(
    path: &Path,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> std::io::Result<bool> {
    write!(
        output,
        "File '{}' already exists. Overwrite? (y/n): ",
        path.display()
    )?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn confirm_on_terminal(path: &Path) -> bool {
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        return false;
    }
    confirm_overwrite(path, &mut stdin.lock(), &mut std::io::stderr()).unwrap_or(false)
}

type Confirmation = Box<dyn FnMut(&Path) -> bool>;

/// Runs the collage pipeline described by the command-line arguments
pub struct CollageBuilder {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
    confirm: Confirmation,
}

impl CollageBuilder {
    /// Create a builder that asks on the terminal before overwriting
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
            confirm: Box::new(confirm_on_terminal),
        }
    }

    /// Replace the overwrite confirmation (answering `false` aborts the run)
    #[must_use]
    pub fn with_confirmation(mut self, confirm: impl FnMut(&Path) -> bool + 'static) -> Self {
        self.confirm = Box::new(confirm);
        self
    }

    /// Build the collage and write it to the output path
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The output exists and overwriting was not confirmed
    /// - The padding leaves no room for a single cell
    /// - The input folder is missing or holds no loadable images
    /// - The face model cannot be loaded
    /// - The canvas is too small for the layout
    /// - The collage cannot be saved
    pub fn process(&mut self) -> Result<CollageSummary> {
        self.check_output()?;
        self.check_canvas()?;

        let mut paths = collect_image_paths(&self.cli.input_folder)?;
        if self.cli.shuffle {
            self.shuffle(&mut paths);
        }
        if paths.is_empty() {
            return Err(CollageError::NoImages {
                folder: self.cli.input_folder.clone(),
            });
        }

        let mut detector = self.build_detector()?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_phase("Loading images", paths.len());
        }
        let LoadedImages { images, skipped } = load_all(&paths, self.progress_manager.as_ref());
        if images.is_empty() {
            return Err(CollageError::NoImages {
                folder: self.cli.input_folder.clone(),
            });
        }

        let dimensions: Vec<(u32, u32)> = images.iter().map(SourceImage::dimensions).collect();
        let layout = plan(&dimensions, &self.cli.canvas(), &self.cli.row_policy)?;
        tracing::info!(
            images = layout.image_count(),
            rows = layout.rows().len(),
            skipped = skipped.len(),
            "planned layout"
        );

        let canvas = self.compose(&layout, images, detector.as_mut())?;
        save_atomically(canvas.image(), &self.cli.output)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }
        self.report(&layout);

        Ok(CollageSummary {
            output: self.cli.output.clone(),
            placed: canvas.pasted(),
            rows: layout.rows().len(),
            skipped,
        })
    }

    fn check_output(&mut self) -> Result<()> {
        let output = &self.cli.output;
        if self.cli.overwrite || !output.exists() || (self.confirm)(output) {
            Ok(())
        } else {
            Err(CollageError::OutputExists {
                path: output.clone(),
            })
        }
    }

    // Room for one row holding one cell; larger counts are checked when planning
    fn check_canvas(&self) -> Result<()> {
        let canvas = self.cli.canvas();
        canvas.validate()?;
        canvas.content_extent(canvas.width, 1)?;
        canvas.content_extent(canvas.height, 1)?;
        Ok(())
    }

    fn shuffle(&self, paths: &mut [PathBuf]) {
        let mut rng = self
            .cli
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        paths.shuffle(&mut rng);
    }

    fn build_detector(&self) -> Result<Box<dyn FaceDetector>> {
        match self.cli.face_model {
            Some(ref model) => Ok(Box::new(SeetaFaceDetector::from_model_file(model)?)),
            None => Ok(Box::new(NoFaceDetector)),
        }
    }

    fn compose(
        &mut self,
        layout: &Layout,
        images: Vec<SourceImage>,
        detector: &mut dyn FaceDetector,
    ) -> Result<Canvas> {
        let mut pending: Vec<Option<SourceImage>> = images.into_iter().map(Some).collect();
        let mut canvas = Canvas::new(self.cli.width, self.cli.height, self.cli.background);
        let mut fitter = CellFitter::new(detector);

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_phase("Arranging rows", layout.rows().len());
        }

        for row in layout.rows() {
            for cell in row.cells(layout.canvas().padding) {
                let source = pending
                    .get_mut(cell.image)
                    .and_then(Option::take)
                    .ok_or_else(|| {
                        computation_error("compose", &format!("image {} is not available", cell.image))
                    })?;
                let fitted = fitter.fit(&source.image, cell.width, cell.height)?;
                canvas.paste(&cell, &fitted.image)?;
            }
            if let Some(ref pm) = self.progress_manager {
                pm.advance_by(1);
            }
        }

        Ok(canvas)
    }

    // Allow print for the final user-facing confirmation
    #[allow(clippy::print_stdout)]
    fn report(&self, layout: &Layout) {
        if !self.cli.quiet {
            println!(
                "Collage of {} images in {} rows saved at {}",
                layout.image_count(),
                layout.rows().len(),
                self.cli.output.display()
            );
        }
    }
}
