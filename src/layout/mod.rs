//! Layout planning: row count, image-to-row distribution and cell sizes

/// Row plans and the planner producing them
pub mod plan;
/// Swappable row count heuristics
pub mod policy;
