//! Source image discovery, orientation-corrected loading and atomic export

use crate::io::configuration::TEMP_OUTPUT_SUFFIX;
use crate::io::error::{CollageError, Result, WithPath};
use crate::io::progress::ProgressManager;
use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader, RgbImage};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// A decoded, upright source image
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// File the image was read from
    pub path: PathBuf,
    /// Pixels with EXIF orientation already applied
    pub image: DynamicImage,
}

impl SourceImage {
    /// Width after orientation correction
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height after orientation correction
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// `(width, height)` after orientation correction
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }
}

/// Result of loading every candidate in a folder
#[derive(Debug, Default)]
pub struct LoadedImages {
    /// Images that decoded successfully, in candidate order
    pub images: Vec<SourceImage>,
    /// Candidates that could not be used
    pub skipped: Vec<PathBuf>,
}

/// Whether `path` has an extension of a format this build can decode
pub fn is_image_path(path: &Path) -> bool {
    ImageFormat::from_path(path).is_ok_and(|format| format.reading_enabled())
}

/// Image files directly inside `folder`, sorted by path
///
/// Subdirectories and files without a readable image extension are ignored.
///
/// # Errors
///
/// Returns an error if `folder` is not a directory or cannot be listed
pub fn collect_image_paths(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(CollageError::NotADirectory {
            path: folder.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(folder).with_path(folder, "read_dir")? {
        let path = entry.with_path(folder, "read_dir")?.path();
        if path.is_file() && is_image_path(&path) {
            files.push(path);
        } else {
            tracing::debug!(path = %path.display(), "ignoring non-image entry");
        }
    }
    files.sort();
    Ok(files)
}

/// Decode `path` and rotate/flip it upright according to its EXIF orientation
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The format is unknown or the data is corrupt
/// - The decoded image has a zero dimension
pub fn load_oriented(path: &Path) -> Result<DynamicImage> {
    let load_error = |source: image::ImageError| CollageError::ImageLoad {
        path: path.to_path_buf(),
        source,
    };

    let reader = ImageReader::open(path)
        .with_path(path, "open")?
        .with_guessed_format()
        .with_path(path, "detect format")?;
    let mut decoder = reader.into_decoder().map_err(load_error)?;
    let orientation = decoder.orientation().map_err(load_error)?;
    let mut image = DynamicImage::from_decoder(decoder).map_err(load_error)?;
    image.apply_orientation(orientation);

    if image.width() == 0 || image.height() == 0 {
        return Err(CollageError::InvalidImageDimensions {
            index: 0,
            width: image.width(),
            height: image.height(),
        });
    }

    Ok(image)
}

/// Load every path, skipping (and logging) the ones that fail
pub fn load_all(paths: &[PathBuf], progress: Option<&ProgressManager>) -> LoadedImages {
    let mut loaded = LoadedImages::default();

    for path in paths {
        match load_oriented(path) {
            Ok(image) => loaded.images.push(SourceImage {
                path: path.clone(),
                image,
            }),
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "skipping unreadable image");
                loaded.skipped.push(path.clone());
            }
        }
        if let Some(pm) = progress {
            pm.advance(path);
        }
    }

    loaded
}

/// Sibling path the collage is written to before being renamed into place
pub fn temporary_output_path(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map_or_else(|| OsString::from("collage"), ToOwned::to_owned);
    name.push(TEMP_OUTPUT_SUFFIX);
    output.with_file_name(name)
}

/// Encode `image` in the format implied by `output`'s extension
///
/// The data is written to a temporary sibling first and renamed, so a failed
/// save never leaves a truncated file at `output`.
///
/// # Errors
///
/// Returns an error if:
/// - The extension does not name a writable format
/// - Encoding or writing the temporary file fails
/// - The rename fails
pub fn save_atomically(image: &RgbImage, output: &Path) -> Result<()> {
    let format = ImageFormat::from_path(output).map_err(|source| CollageError::ImageExport {
        path: output.to_path_buf(),
        source,
    })?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_path(parent, "create_dir_all")?;
    }

    let temporary = temporary_output_path(output);
    let written = image
        .save_with_format(&temporary, format)
        .map_err(|source| CollageError::ImageExport {
            path: output.to_path_buf(),
            source,
        })
        .and_then(|()| fs::rename(&temporary, output).with_path(output, "rename"));

    if written.is_err() {
        let _ = fs::remove_file(&temporary);
    }
    written
}
