//! Progress rendering for the CLI
//!
//! Converts [`ProgressUpdate`] messages into one indicatif bar per input
//! item. Items without a size hint get a spinner instead.

use super::utils::{format_bytes, format_throughput};
use colored::*;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use omnihash_core::progress::ProgressUpdate;
use std::time::{Duration, Instant};

/// Progress renderer that manages visual progress display
pub struct ProgressRenderer {
    current: Option<ActiveItem>,
    hidden: bool,
}

struct ActiveItem {
    bar: ProgressBar,
    started: Instant,
}

impl ProgressRenderer {
    /// Create a renderer drawing to stderr
    pub fn new() -> Self {
        Self {
            current: None,
            hidden: false,
        }
    }

    /// Create a renderer that tracks state without drawing
    pub fn hidden() -> Self {
        Self {
            current: None,
            hidden: true,
        }
    }

    /// Handle a progress update
    pub fn handle_update(&mut self, update: ProgressUpdate) {
        match update {
            ProgressUpdate::ItemStarted { label, total_bytes } => {
                self.start_item(label, total_bytes);
            }
            ProgressUpdate::HashProgress {
                bytes_processed, ..
            } => {
                if let Some(item) = &self.current {
                    item.bar.set_position(bytes_processed);
                }
            }
            ProgressUpdate::ItemFinished {
                label,
                bytes_processed,
            } => {
                self.finish_item(label.as_deref(), bytes_processed);
            }
        }
    }

    fn start_item(&mut self, label: Option<String>, total_bytes: Option<u64>) {
        // A new item replaces one that never reported completion
        if let Some(stale) = self.current.take() {
            stale.bar.finish_and_clear();
        }

        let target = if self.hidden {
            ProgressDrawTarget::hidden()
        } else {
            ProgressDrawTarget::stderr()
        };

        let bar = ProgressBar::with_draw_target(total_bytes, target);
        match total_bytes {
            Some(_) => {
                bar.set_style(
                    ProgressStyle::default_bar()
                        .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent}% | {bytes}/{total_bytes} | {bytes_per_sec} | ETA: {eta}")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("#>-"),
                );
            }
            None => {
                bar.set_style(
                    ProgressStyle::default_spinner()
                        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                        .template("{spinner:.cyan} {msg} {bytes} | {bytes_per_sec}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                bar.enable_steady_tick(Duration::from_millis(100));
            }
        }

        let label = label.unwrap_or_else(|| "standard input".to_string());
        bar.set_message(format!("{}: {}", "Hashing".bold(), label.cyan()));

        self.current = Some(ActiveItem {
            bar,
            started: Instant::now(),
        });
    }

    fn finish_item(&mut self, label: Option<&str>, bytes_processed: u64) {
        let Some(item) = self.current.take() else {
            return;
        };
        item.bar.finish_and_clear();

        let elapsed = item.started.elapsed();
        let mbps = if elapsed.as_secs_f64() > 0.0 {
            bytes_processed as f64 / 1_048_576.0 / elapsed.as_secs_f64()
        } else {
            0.0
        };
        log::debug!(
            "Hashed {} ({}) in {:.2?} at {}",
            label.unwrap_or("standard input"),
            format_bytes(bytes_processed),
            elapsed,
            format_throughput(mbps)
        );
    }

    /// Whether an item is currently being drawn
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Clear any bar left on screen
    pub fn finish(&mut self) {
        if let Some(item) = self.current.take() {
            item.bar.finish_and_clear();
        }
    }
}

impl Default for ProgressRenderer {
    fn default() -> Self {
        Self::new()
    }
}
