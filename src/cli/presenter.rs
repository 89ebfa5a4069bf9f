//! CLI presenter for output formatting

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::duration::ClockTime;

/// Glyphs for bar heights, lowest to highest
const BAR_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
    is_spinner_active: Arc<AtomicBool>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self {
            spinner: None,
            is_spinner_active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
        self.is_spinner_active.store(true, Ordering::SeqCst);
    }

    /// Update spinner message
    pub fn update_spinner(&self, message: &str) {
        if let Some(ref spinner) = self.spinner {
            spinner.set_message(message.to_string());
        }
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
        self.is_spinner_active.store(false, Ordering::SeqCst);
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
        self.is_spinner_active.store(false, Ordering::SeqCst);
    }

    pub fn is_spinner_active(&self) -> bool {
        self.is_spinner_active.load(Ordering::SeqCst)
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout (URLs, codec results)
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Render bars with the first `active` highlighted
    pub fn format_waveform(&self, heights: &[u8], active: usize) -> String {
        heights
            .iter()
            .enumerate()
            .map(|(i, height)| {
                let glyph = glyph_for(*height).to_string();
                if i < active {
                    glyph.cyan().to_string()
                } else {
                    glyph.dimmed().to_string()
                }
            })
            .collect()
    }

    /// Waveform followed by `elapsed / total`
    pub fn format_playback(
        &self,
        heights: &[u8],
        active: usize,
        elapsed: ClockTime,
        total: ClockTime,
    ) -> String {
        format!(
            "{} {} / {}",
            self.format_waveform(heights, active),
            elapsed,
            total
        )
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

fn glyph_for(height: u8) -> char {
    let index = (height.min(100) as usize * (BAR_GLYPHS.len() - 1)) / 100;
    BAR_GLYPHS[index]
}
