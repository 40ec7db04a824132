//! Progress bar implementation for CLI operations.

use archtext_core::ProgressCallback;
use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressState;
use indicatif::ProgressStyle;
use std::fmt::Write;

/// CLI progress bar wrapper implementing `ProgressCallback`.
///
/// Displays the member count, the member being scanned and elapsed time
/// when running in a TTY. Automatically cleans up on drop.
pub struct CliProgress {
    bar: ProgressBar,
    scanned: usize,
}

impl CliProgress {
    /// Creates a new CLI progress bar.
    ///
    /// The length is unknown until the first member starts, so the bar is
    /// created empty and sized by `on_entry_start`.
    #[must_use]
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new(0);

        // Template: "Scanning [████████░░░░] 42/100 members (3s) src/lib.rs"
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{prefix} [{bar:40.cyan/blue}] {pos}/{len} members ({elapsed_short}) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .with_key("elapsed_short", |state: &ProgressState, w: &mut dyn Write| {
                    write!(w, "{}", humanize_duration(state.elapsed())).unwrap_or(());
                })
                .progress_chars("█▓░"),
        );

        bar.set_prefix(message.to_string());

        Self { bar, scanned: 0 }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stderr().is_term()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressCallback for CliProgress {
    fn on_entry_start(&mut self, path: &str, total: usize, _current: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_message(path.to_string());
    }

    fn on_entry_complete(&mut self, _path: &str) {
        self.scanned += 1;
        self.bar.inc(1);
    }

    fn on_complete(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Converts duration to human-readable format.
fn humanize_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 3600 {
        format!("{}h{}m", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m{}s", secs / 60, secs % 60)
    } else {
        format!("{secs}s")
    }
}
