//! Simple terminal output functions for hookcut-cli.
//!
//! Everything is written through `log::info!` so the console and the run log
//! file receive the same lines. Styling is dropped when `NO_COLOR` is set.

use console::style;
use hookcut_core::{BatchResult, SheetStatistics};
use log::info;
use owo_colors::OwoColorize;

/// Check if color should be used (respects NO_COLOR environment variable)
fn should_use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Print a section header (Level 1 - Main sections with cyan color)
pub fn print_section(title: &str) {
    info!("");
    if should_use_color() {
        info!("===== {} =====", title.to_uppercase().cyan().bold());
    } else {
        info!("===== {} =====", title.to_uppercase());
    }
    info!("");
}

/// Print a processing step (Level 2 - Subsections with 2 spaces indentation and bold)
pub fn print_processing(message: &str) {
    info!("");
    if should_use_color() {
        info!("  » {}", style(message).bold());
    } else {
        info!("  » {message}");
    }
}

/// Print a status line (Level 4 - Primary info with 6 spaces indentation)
pub fn print_status(label: &str, value: &str, highlight: bool) {
    let label_width = 15;
    let padding = if label.len() < label_width {
        label_width - label.len()
    } else {
        1
    };

    if should_use_color() && highlight {
        info!("      {}:{} {}", label, " ".repeat(padding), style(value).bold());
    } else {
        info!("      {}:{} {}", label, " ".repeat(padding), value);
    }
}

/// Print a success message (Level 2 - Success with 2 spaces indentation and green color)
pub fn print_success(message: &str) {
    if should_use_color() {
        info!("  ✓ {}", message.green());
    } else {
        info!("  ✓ {message}");
    }
}

/// Print a failure line in red
pub fn print_failure(message: &str) {
    if should_use_color() {
        info!("  ✗ {}", message.red());
    } else {
        info!("  ✗ {message}");
    }
}

/// Print a sub-item (Level 3 - Operations with 4 spaces indentation)
pub fn print_sub_item(message: &str) {
    info!("    {message}");
}

/// Print per-type caption availability as `type: available/total available`.
pub fn print_sheet_statistics(stats: &SheetStatistics) {
    print_section("Google Sheets Statistics");
    if stats.types.is_empty() {
        print_sub_item("No typed caption rows found");
        return;
    }
    for t in &stats.types {
        let line = format!("{}: {}/{} available", t.video_type, t.available, t.total);
        if t.available == 0 && should_use_color() {
            info!("    {}", line.yellow());
        } else {
            print_sub_item(&line);
        }
    }
}

/// Print the final batch summary.
pub fn print_batch_summary(result: &BatchResult, start_trim: f64, end_trim: f64) {
    print_section("Batch Processing Complete");
    print_status(
        "Processed",
        &format!("{}/{} videos", result.succeeded.len(), result.total()),
        true,
    );

    if !result.succeeded.is_empty() {
        print_processing("Successfully processed videos");
        for name in &result.succeeded {
            print_success(name);
        }
    }

    if !result.failed.is_empty() {
        print_processing("Failed to process");
        for name in &result.failed {
            print_failure(name);
        }
    }

    if result.any_succeeded() {
        print_processing("Applied to each video");
        print_sub_item(&format!("Trimmed first {start_trim}s and last {end_trim}s"));
        print_sub_item("Type-specific text overlay from Google Sheets");
        print_sub_item("White text with black border, centered horizontally");
        print_sub_item("Caption rows marked as used in Google Sheets");
    }
}
