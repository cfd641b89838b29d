//! Runtime defaults and detection tuning constants

// Canvas defaults
/// Default canvas width in pixels
pub const DEFAULT_CANVAS_WIDTH: u32 = 1920;
/// Default canvas height in pixels
pub const DEFAULT_CANVAS_HEIGHT: u32 = 1080;
/// Largest accepted canvas side
pub const MAX_CANVAS_DIMENSION: u32 = 65_535;
/// Default gap between cells in pixels
pub const DEFAULT_PADDING: u32 = 0;
/// Default background colour, visible through padding
pub const DEFAULT_BACKGROUND: &str = "#FFFFFF";

// Output settings
/// Default output file name
pub const DEFAULT_OUTPUT: &str = "pic_collage.jpg";
/// Suffix of the temporary file written before the final rename
pub const TEMP_OUTPUT_SUFFIX: &str = ".partial";

// Face detection tuning (SeetaFace frontal model)
/// Smallest face side the detector looks for; the backend rejects values below 20
pub const MIN_FACE_SIZE: u32 = 20;
/// Classifier score a window must reach to count as a face
pub const FACE_SCORE_THRESHOLD: f64 = 2.0;
/// Scale step between image pyramid levels
pub const PYRAMID_SCALE_FACTOR: f32 = 0.8;
/// Sliding window step in pixels along both axes
pub const SLIDE_WINDOW_STEP: u32 = 4;
// Detection cost grows with area; faces small enough to vanish here are not worth steering a crop for
/// Longest image side handed to the detector
pub const MAX_DETECTION_DIMENSION: u32 = 1024;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
