//! Progress reporting abstractions
//!
//! The engine reports progress through a trait object so the front end can
//! drive a progress bar (or nothing) without the core knowing about it.

use std::sync::{Arc, Mutex};

/// Core trait for progress reporting
pub trait ProgressProvider: Send + Sync {
    /// Report a progress update
    fn report(&self, update: ProgressUpdate);

    /// Signal that the whole run is complete
    fn complete(&self);
}

/// Unified progress update type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressUpdate {
    /// Hashing of an input item is about to start
    ItemStarted {
        label: Option<String>,
        total_bytes: Option<u64>,
    },

    /// A chunk has been delivered to every digester
    HashProgress {
        bytes_processed: u64,
        total_bytes: Option<u64>,
    },

    /// Every digester of the item has been finalized
    ItemFinished {
        label: Option<String>,
        bytes_processed: u64,
    },
}

/// Null implementation for when no progress is needed
pub struct NullProvider;

impl ProgressProvider for NullProvider {
    fn report(&self, _update: ProgressUpdate) {}

    fn complete(&self) {}
}

impl dyn ProgressProvider {
    /// Create a null provider (useful for tests and when progress isn't needed)
    pub fn null() -> Arc<dyn ProgressProvider> {
        Arc::new(NullProvider)
    }
}

/// Provider that keeps every update, for inspection in tests
#[derive(Default)]
pub struct RecordingProvider {
    updates: Mutex<Vec<ProgressUpdate>>,
    completed: Mutex<bool>,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the updates received so far
    pub fn updates(&self) -> Vec<ProgressUpdate> {
        self.updates
            .lock()
            .map(|updates| updates.clone())
            .unwrap_or_default()
    }

    pub fn is_completed(&self) -> bool {
        self.completed.lock().map(|c| *c).unwrap_or(false)
    }
}

impl ProgressProvider for RecordingProvider {
    fn report(&self, update: ProgressUpdate) {
        if let Ok(mut updates) = self.updates.lock() {
            updates.push(update);
        }
    }

    fn complete(&self) {
        if let Ok(mut completed) = self.completed.lock() {
            *completed = true;
        }
    }
}
