//! Statistics reporting.

use console::style;

use crate::download::{ExportOutcome, ExportReport};

/// Print the end-of-run statistics for a channel.
pub fn print_export_summary(report: &ExportReport) {
    let status = match report.outcome {
        ExportOutcome::Completed => style("complete").green(),
        ExportOutcome::Interrupted => style("stopped").yellow(),
    };

    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!(
        "{}",
        style(format!("Export of '{}' {}:", report.channel, status)).bold()
    );
    println!("  New:      {}", report.counters.new_downloads);
    println!("  Existing: {} (skipped)", report.counters.existing_skips);
    if report.counters.stale_skips > 0 {
        println!(
            "  Expired:  {} (file reference expired)",
            style(report.counters.stale_skips).yellow()
        );
    }
    if report.counters.failed > 0 {
        println!("  Failed:   {}", style(report.counters.failed).red());
    }
    println!("  Total:    {} exported", report.counters.total_exported());
    println!(
        "  Pages:    {} ({} errors)",
        report.pages_fetched, report.page_errors
    );
    println!("  Cursor:   {}", report.last_offset);
    println!("  Elapsed:  {}s", report.elapsed_seconds());
    println!("{}", style("═".repeat(50)).dim());
}
