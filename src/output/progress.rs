//! Per-item download progress reporting.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Destination for progress updates during a download.
///
/// Called repeatedly while one item downloads; `bytes_done` usually grows but
/// implementations must not rely on it.
pub trait ProgressSink: Send + Sync {
    /// Report cumulative counters and the current item's byte progress.
    fn report(&self, new_count: u64, existing_count: u64, bytes_done: u64, bytes_total: Option<u64>);

    /// Called once when the export stops.
    fn finish(&self) {}
}

/// Render the current item's progress as a percentage with two decimals.
///
/// Unknown or zero totals render as `N/A`.
pub fn format_percent(bytes_done: u64, bytes_total: Option<u64>) -> String {
    match bytes_total {
        Some(total) if total > 0 => {
            format!("{:.2}%", bytes_done as f64 / total as f64 * 100.0)
        }
        _ => "N/A".to_string(),
    }
}

/// Render the single status line.
pub fn format_progress_line(
    new_count: u64,
    existing_count: u64,
    bytes_done: u64,
    bytes_total: Option<u64>,
) -> String {
    format!(
        "Total exports: [{}] | New exports: [{}] | Current progress: {}",
        new_count + existing_count,
        new_count,
        format_percent(bytes_done, bytes_total)
    )
}

/// Progress line on stdout, overwritten in place.
pub struct ConsoleProgress {
    bar: ProgressBar,
}

impl ConsoleProgress {
    /// Create a status line drawn on stdout.
    pub fn new() -> Self {
        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stdout());
        if let Ok(style) = ProgressStyle::with_template("  {msg}") {
            bar.set_style(style);
        }
        Self { bar }
    }

    /// Create a sink that renders nothing.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for ConsoleProgress {
    fn report(&self, new_count: u64, existing_count: u64, bytes_done: u64, bytes_total: Option<u64>) {
        self.bar.set_message(format_progress_line(
            new_count,
            existing_count,
            bytes_done,
            bytes_total,
        ));
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// Sink that keeps every rendered line in memory.
#[derive(Debug, Default)]
pub struct MemoryProgress {
    lines: Mutex<Vec<String>>,
    finished: AtomicUsize,
}

impl MemoryProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines reported so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// How many times the export signalled that it stopped.
    pub fn finish_count(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }
}

impl ProgressSink for MemoryProgress {
    fn report(&self, new_count: u64, existing_count: u64, bytes_done: u64, bytes_total: Option<u64>) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(format_progress_line(
                new_count,
                existing_count,
                bytes_done,
                bytes_total,
            ));
        }
    }

    fn finish(&self) {
        self.finished.fetch_add(1, Ordering::SeqCst);
    }
}
