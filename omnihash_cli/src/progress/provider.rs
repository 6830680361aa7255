//! Progress provider implementation for CLI
//!
//! Bridges the core library's progress reporting to the terminal renderer.
//! Hashing is synchronous, so updates are rendered in place rather than sent
//! to a separate task.

use super::renderer::ProgressRenderer;
use omnihash_core::progress::{ProgressProvider, ProgressUpdate};
use std::sync::Mutex;

/// Renders engine progress on stderr
pub struct TerminalProvider {
    renderer: Mutex<ProgressRenderer>,
}

impl TerminalProvider {
    pub fn new() -> Self {
        Self::with_renderer(ProgressRenderer::new())
    }

    pub fn with_renderer(renderer: ProgressRenderer) -> Self {
        Self {
            renderer: Mutex::new(renderer),
        }
    }
}

impl Default for TerminalProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressProvider for TerminalProvider {
    fn report(&self, update: ProgressUpdate) {
        // A poisoned renderer only loses the bar, never the hash
        if let Ok(mut renderer) = self.renderer.lock() {
            renderer.handle_update(update);
        }
    }

    fn complete(&self) {
        if let Ok(mut renderer) = self.renderer.lock() {
            renderer.finish();
        }
    }
}
