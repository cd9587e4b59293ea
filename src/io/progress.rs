//! Progress display for batch texture processing
//!
//! Small batches get one stage bar per file; large batches collapse into a
//! single file counter to avoid terminal spam.

use crate::io::configuration::{MAX_INDIVIDUAL_PROGRESS_BARS, PIPELINE_STAGES};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Coordinates progress display for batch operations
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with no bars yet
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bars: Vec::new(),
        }
    }

    /// Create bars appropriate for the batch size
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
            return;
        }
        for _ in 0..file_count {
            let bar = ProgressBar::new(PIPELINE_STAGES as u64);
            bar.set_style(STAGE_STYLE.clone());
            self.file_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Label the bar for a file that starts processing
    pub fn start_file(&self, index: usize, path: &Path) {
        if let Some(bar) = self.file_bars.get(index) {
            let display_name = path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            bar.set_prefix(display_name);
            bar.set_message("decoding");
        }
    }

    /// Advance a file's bar to the next pipeline stage
    pub fn update_stage(&self, index: usize, stage: &'static str) {
        if let Some(bar) = self.file_bars.get(index) {
            bar.inc(1);
            bar.set_message(stage);
        }
    }

    /// Mark a file as completed
    pub fn complete_file(&self, index: usize) {
        if let Some(bar) = self.file_bars.get(index) {
            bar.set_position(PIPELINE_STAGES as u64);
            bar.set_message("done");
        }
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All files processed");
        }
        let _ = self.multi_progress.clear();
    }
}
