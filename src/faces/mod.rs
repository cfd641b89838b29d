//! Face detection collaborators used to steer cropping

/// Detector trait, downscaled detection and the failure fallback
pub mod detector;
/// Face bounding boxes and their union
pub mod region;
/// `rustface` SeetaFace backend
pub mod seeta;
