//! Simple terminal output functions for mergo-core.
//!
//! Provides the hierarchical section/status output the CLI prints, plus a
//! spinner for long-running ffmpeg steps. All lines flow through the `log`
//! facade so they also land in whatever logger the binary configured.

use std::io::IsTerminal;
use std::sync::Mutex;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

static ACTIVE_SPINNER: Mutex<Option<ProgressBar>> = Mutex::new(None);

/// Check if color should be used (respects NO_COLOR environment variable)
fn should_use_color() -> bool {
    std::env::var("NO_COLOR").is_err() && std::io::stdout().is_terminal()
}

/// Print a section header for a major phase of the run.
pub fn print_section(title: &str) {
    info!("");
    if should_use_color() {
        info!("===== {} =====", style(title.to_uppercase()).cyan().bold());
    } else {
        info!("===== {} =====", title.to_uppercase());
    }
    info!("");
}

/// Print a processing step line.
pub fn print_processing(message: &str) {
    if should_use_color() {
        info!("  » {}", style(message).bold());
    } else {
        info!("  » {message}");
    }
}

/// Print a labeled status line.
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

/// Print a success message.
pub fn print_success(message: &str) {
    if should_use_color() {
        info!("  {} {}", style("✓").green().bold(), message);
    } else {
        info!("  ✓ {message}");
    }
}

/// Print an error message with optional detail and suggestion lines.
pub fn print_error(title: &str, detail: &str, suggestion: Option<&str>) {
    if should_use_color() {
        log::error!("  {} {}", style("✗").red().bold(), style(title).bold());
    } else {
        log::error!("  ✗ {title}");
    }
    if !detail.is_empty() {
        log::error!("      {detail}");
    }
    if let Some(s) = suggestion {
        log::error!("      {s}");
    }
}

/// Starts a spinner for a long-running step. Finishing or starting another
/// spinner clears the previous one.
pub fn start_spinner(message: &str) {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("      {spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(120));

    let mut state = ACTIVE_SPINNER.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(previous) = state.take() {
        previous.finish_and_clear();
    }
    *state = Some(spinner);
}

/// Stops the active spinner, if any.
pub fn finish_spinner() {
    let mut state = ACTIVE_SPINNER.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(spinner) = state.take() {
        spinner.finish_and_clear();
    }
}
