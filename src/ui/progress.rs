use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::time::Instant;

/// Progress bar for bulk imports. Hidden when stdout is not a terminal.
pub struct ImportProgress {
    bar: ProgressBar,
    started: Instant,
}

impl ImportProgress {
    pub fn new(total: usize) -> Self {
        let bar = if console::Term::stdout().is_term() {
            ProgressBar::new(total as u64)
        } else {
            ProgressBar::hidden()
        };

        if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {wide_msg}") {
            bar.set_style(style.progress_chars("=> "));
        }

        Self {
            bar,
            started: Instant::now(),
        }
    }

    pub fn record(&self, path: &str) {
        self.bar.inc(1);
        self.bar.set_message(path.to_string());
    }

    /// Clear the bar and return how long the import took
    pub fn finish(self) -> String {
        self.bar.finish_and_clear();
        HumanDuration(self.started.elapsed()).to_string()
    }
}
