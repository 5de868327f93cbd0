//! Operator-facing console lines.

use std::fmt::Display;
use std::path::Path;

use console::style;

use crate::config::Config;

pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

pub fn print_success(message: &str) {
    println!("{} {}", style("DONE").green().bold(), message);
}

pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Errors go to stderr so they survive a redirected progress line.
pub fn print_error(message: &str) {
    eprintln!("{}", error_line(message));
}

fn error_line(message: &str) -> String {
    format!("{} {}", style("ERROR").red().bold(), message)
}

/// Print the name and version line shown at startup.
pub fn print_banner() {
    println!();
    println!(
        "{} {}",
        style(env!("CARGO_PKG_NAME")).cyan().bold(),
        style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
    );
    println!("{}", style("Incremental Telegram channel media export").dim());
    println!();
}

/// Print the effective settings of this run.
pub fn print_config_summary(config: &Config, export_root: &Path) {
    let options = &config.options;

    println!("{}", style("Configuration:").bold());
    println!("  Channel:    {}", config.target.channel_name);
    println!("  Media type: {}", options.media_type);
    println!("  Directory:  {}", export_root.display());
    println!(
        "  Paging:     {} messages every {}s",
        options.limit, options.delay_seconds
    );
    if let Some(log_file) = &options.log_file {
        println!("  Log file:   {}", log_file.display());
    }
    println!();
}

pub fn print_export_start(channel: &str) {
    print_info(&format!("Exporting channel '{}'", channel));
}

/// History is exhausted.
pub fn print_export_complete() {
    print_success("EXPORT COMPLETE");
}

/// The operator interrupted the run.
pub fn print_stopped() {
    println!();
    print_warning("STOP EXPORTING");
}

/// A page could not be fetched; the export carries on.
pub fn print_page_error(error: &dyn Display) {
    print_error(&error.to_string());
}
