//! Terminal progress display for a running fill

use crate::algorithm::scheduler::FillObserver;
use crate::io::configuration::{PROGRESS_BAR_WIDTH, PROGRESS_REFRESH_INTERVAL};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Cells: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar counting committed cells
///
/// The bar position is the number of committed cells, so it can move
/// backwards when the grid is reset.
pub struct FillProgress {
    bar: ProgressBar,
    total_cells: usize,
}

impl FillProgress {
    /// Create a bar for a grid of `total_cells`
    pub fn new(total_cells: usize) -> Self {
        Self::with_bar(ProgressBar::new(total_cells as u64), total_cells)
    }

    /// Create a bar that never draws, for tests and quiet runs
    pub fn hidden(total_cells: usize) -> Self {
        Self::with_bar(ProgressBar::hidden(), total_cells)
    }

    fn with_bar(bar: ProgressBar, total_cells: usize) -> Self {
        bar.set_length(total_cells as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        Self { bar, total_cells }
    }

    /// Number of committed cells currently shown
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Current status message
    pub fn message(&self) -> String {
        self.bar.message()
    }

    /// Leave the bar at its final state
    pub fn finish(&self) {
        self.bar.finish();
    }
}

impl FillObserver for FillProgress {
    fn on_reset(&mut self, iteration: usize) {
        self.bar.set_position(0);
        self.bar.set_message(format!("reset at iteration {iteration}"));
    }

    fn on_iteration(&mut self, iteration: usize, unassigned: usize) {
        if iteration % PROGRESS_REFRESH_INTERVAL == 0 || unassigned == 0 {
            let committed = self.total_cells.saturating_sub(unassigned);
            self.bar.set_position(committed as u64);
            self.bar.set_message(format!("iteration {iteration}"));
        }
    }
}
