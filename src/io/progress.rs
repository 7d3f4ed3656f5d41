//! Multi-variation render progress with automatic batching for large runs

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

/// Coordinates progress display while rendering layout variations
///
/// Shows one bar per recent variation (sprites drawn out of heads placed) and
/// adds a batch bar once the run is too long to show every variation.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    variation_bars: Vec<ProgressBar>,
    /// Stores (`label`, `sprites_drawn`, `heads`) for rolling window display
    variation_states: Vec<(String, usize, usize)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.magenta/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Bouquets: [{bar:40.magenta/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            variation_bars: Vec::new(),
            variation_states: Vec::new(),
        }
    }

    /// Create bars for a run of `variation_count` renders
    pub fn initialize(&mut self, variation_count: usize) {
        // Switch to batch mode for long runs to avoid terminal spam
        if variation_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(variation_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let bars_to_create = variation_count.min(MAX_INDIVIDUAL_PROGRESS_BARS);
        for _ in 0..bars_to_create {
            let pb = ProgressBar::new(0);
            pb.set_style(PROGRESS_STYLE.clone());
            self.variation_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Register a variation about to be rendered
    pub fn start_variation(&mut self, index: usize, label: &str, heads: usize) {
        if index >= self.variation_states.len() {
            self.variation_states
                .resize(index + 1, (String::new(), 0, 0));
        }
        if let Some(state) = self.variation_states.get_mut(index) {
            *state = (label.to_string(), 0, heads);
        }
        self.update_bars();
    }

    /// Mark a variation as rendered with `sprites_drawn` heads on the canvas
    pub fn complete_variation(&mut self, index: usize, sprites_drawn: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.variation_states.get_mut(index) {
            state.0 = format!("✓ {}", state.0);
            state.1 = sprites_drawn;
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All bouquets rendered");
        }
        let _ = self.multi_progress.clear();
    }

    /// Update all progress bars to show the last N active variations
    fn update_bars(&self) {
        let active: Vec<_> = self
            .variation_states
            .iter()
            .filter(|(label, _, _)| !label.is_empty())
            .collect();

        let start_idx = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start_idx..).unwrap_or(&[]);

        for (bar_idx, (label, drawn, heads)) in visible.iter().enumerate() {
            if let Some(bar) = self.variation_bars.get(bar_idx) {
                bar.set_length(*heads as u64);
                bar.set_position(*drawn as u64);
                let width = heads.to_string().len();
                bar.set_message(format!("{drawn:>width$}/{heads}"));
                bar.set_prefix(label.clone());
            }
        }

        for bar_idx in visible.len()..self.variation_bars.len() {
            if let Some(bar) = self.variation_bars.get(bar_idx) {
                bar.set_length(0);
                bar.set_position(0);
                bar.set_message(String::new());
                bar.set_prefix(String::new());
            }
        }
    }
}
