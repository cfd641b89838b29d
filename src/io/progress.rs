//! Phase-based progress display for loading and arranging images

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static PHASE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg:<16}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{prefix}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Shows one progress bar per pipeline phase
///
/// Each phase ("Loading images", "Arranging rows") gets its own bar which
/// stays on screen once finished, mirroring the order the work happens in
pub struct ProgressManager {
    multi_progress: MultiProgress,
    current: Option<ProgressBar>,
    finished_phases: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager with no active phase
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            current: None,
            finished_phases: 0,
        }
    }

    /// Begin a new phase of `length` steps, finishing any phase still open
    pub fn start_phase(&mut self, label: &str, length: usize) {
        self.finish_phase();

        let bar = ProgressBar::new(length as u64);
        bar.set_style(PHASE_STYLE.clone());
        bar.set_message(label.to_string());
        self.current = Some(self.multi_progress.add(bar));
    }

    /// Advance the current phase by one step, naming the item just handled
    pub fn advance(&self, item: &Path) {
        if let Some(ref bar) = self.current {
            bar.set_prefix(
                item.file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string(),
            );
            bar.inc(1);
        }
    }

    /// Advance the current phase by `steps` without naming an item
    pub fn advance_by(&self, steps: usize) {
        if let Some(ref bar) = self.current {
            bar.set_prefix(String::new());
            bar.inc(steps as u64);
        }
    }

    /// Close the current phase, leaving its bar on screen
    pub fn finish_phase(&mut self) {
        if let Some(bar) = self.current.take() {
            bar.set_prefix(String::new());
            bar.finish();
            self.finished_phases += 1;
        }
    }

    /// Number of phases completed so far
    pub const fn finished_phases(&self) -> usize {
        self.finished_phases
    }

    /// Whether a phase is currently open
    pub const fn has_active_phase(&self) -> bool {
        self.current.is_some()
    }

    /// Clean up all progress displays
    pub fn finish(&mut self) {
        self.finish_phase();
        let _ = self.multi_progress.clear();
    }
}
