//! Output module for console output and progress.
//!
//! Provides:
//! - Colored console output
//! - The overwritten per-item progress line
//! - Statistics reporting

pub mod console;
pub mod progress;
pub mod stats;

pub use console::{
    print_banner, print_config_summary, print_error, print_export_complete, print_export_start,
    print_info, print_page_error, print_stopped, print_success, print_warning,
};
pub use progress::{format_progress_line, ConsoleProgress, MemoryProgress, ProgressSink};
pub use stats::print_export_summary;
