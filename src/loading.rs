//! Loading animation.
//!
//! Ticks through the processing steps on a fixed schedule while the
//! enrichment sequence runs. The animation never waits on the network.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Steps shown while the analysis is "processing".
pub const LOADING_STEPS: [&str; 4] = [
    "Reading data",
    "Cleaning data",
    "Calculating KPIs",
    "Generating insights",
];

/// Step-by-step progress display.
pub struct LoadingAnimation {
    bar: ProgressBar,
    interval: Duration,
}

impl LoadingAnimation {
    /// Animation drawn to the terminal.
    pub fn new(interval: Duration) -> Self {
        let bar = ProgressBar::new(LOADING_STEPS.len() as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar, interval }
    }

    /// Animation that draws nothing.
    #[cfg(test)]
    pub fn hidden(interval: Duration) -> Self {
        Self {
            bar: ProgressBar::hidden(),
            interval,
        }
    }

    /// Complete each step after one interval. Returns the steps completed.
    pub async fn run(self) -> usize {
        let mut completed = 0;
        for step in LOADING_STEPS {
            self.bar.set_message(step);
            tokio::time::sleep(self.interval).await;
            self.bar.inc(1);
            completed += 1;
        }
        self.bar.finish_with_message("Analysis ready");
        completed
    }
}
