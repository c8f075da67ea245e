//! Progress bar for terminal output during scanning.

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar manager for scan operations.
///
/// The bar is only shown in an interactive terminal outside CI mode; the
/// scan itself never depends on it.
pub struct ScanProgress {
    bar: Option<ProgressBar>,
}

impl ScanProgress {
    pub fn new(total_paths: usize, is_tty: bool, is_ci: bool) -> Self {
        let bar = if is_tty && !is_ci {
            Some(create_progress_bar(total_paths))
        } else {
            None
        };

        Self { bar }
    }

    /// Advance by one completed probe.
    pub fn inc(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    /// Finish and clear the progress bar.
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

fn create_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "Scanning {bar:40} {pos:>2}/{len:2} paths [{elapsed_precise}]",
        )
        .expect("Invalid progress bar template")
        .progress_chars("⣿⣀ "),
    );
    pb
}
