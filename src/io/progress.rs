//! Tick progress display for a viewpoint walk

use crate::algorithm::orchestrator::RegenerationStats;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar over the ticks of one walk
///
/// The message shows running regeneration counts so stalls in a pending
/// window are visible while the walk runs.
pub struct WalkProgress {
    bar: ProgressBar,
}

impl WalkProgress {
    /// Bar for a walk of `total_ticks` ticks over the named corpus
    pub fn new(name: &str, total_ticks: usize) -> Self {
        let bar = ProgressBar::new(total_ticks as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_prefix(name.to_string());
        Self { bar }
    }

    /// Report the tick just completed
    pub fn update(&self, tick: usize, stats: &RegenerationStats) {
        self.bar.set_position(tick as u64);
        self.bar.set_message(format!(
            "{} rebuilds, {} fallbacks",
            stats.regenerations(),
            stats.fallbacks
        ));
    }

    /// Leave the bar at its final state
    pub fn finish(&self) {
        self.bar.finish();
    }
}
