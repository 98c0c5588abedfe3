//! Terminal output helpers: colored status lines and the download bar.

use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::models::DownloadProgress;
use crate::progress::ProgressObserver;

/// Check if stdout is a terminal.
pub fn is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Print a success line.
pub fn print_success(msg: &str) {
    if is_terminal() {
        println!("{} {}", "✓".green().bold(), msg);
    } else {
        println!("{}", msg);
    }
}

/// Print an error line to stderr.
pub fn print_error(msg: &str) {
    if std::io::stderr().is_terminal() {
        eprintln!("{} {}", "✗".red().bold(), msg);
    } else {
        eprintln!("{}", msg);
    }
}

/// Print an informational line.
pub fn print_info(msg: &str) {
    if is_terminal() {
        println!("{} {}", "ℹ".cyan().bold(), msg);
    } else {
        println!("{}", msg);
    }
}

/// Get a human-readable file size.
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Animated download bar for interactive terminals.
///
/// Starts as a spinner; switches to a sized bar once the server declares a
/// content length.
pub struct DownloadBar {
    pb: indicatif::ProgressBar,
}

impl DownloadBar {
    /// Create a new download bar (hidden until the first event)
    pub fn new() -> Self {
        let pb = indicatif::ProgressBar::new_spinner();
        pb.set_style(
            indicatif::ProgressStyle::with_template("{spinner:.cyan} {bytes} downloaded")
                .unwrap(),
        );

        Self { pb }
    }
}

impl Default for DownloadBar {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressObserver for DownloadBar {
    fn on_start(&self, total_bytes: u64) {
        if total_bytes > 0 {
            self.pb.set_length(total_bytes);
            self.pb.set_style(
                indicatif::ProgressStyle::with_template(
                    "{bar:40.cyan/blue} {bytes}/{total_bytes} ({eta})",
                )
                .unwrap()
                .progress_chars("█▓░"),
            );
        }
    }

    fn on_chunk(&self, progress: DownloadProgress) {
        self.pb.set_position(progress.bytes_downloaded);
    }

    fn on_finish(&self, progress: DownloadProgress) {
        self.pb.set_style(
            indicatif::ProgressStyle::with_template("{spinner:.green} {msg}")
                .unwrap()
                .tick_chars("✓"),
        );
        self.pb.finish_with_message(format!(
            "downloaded {}",
            format_file_size(progress.bytes_downloaded)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(2048), "2.00 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024), "3.00 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024), "5.00 GB");
    }
}
