//! Digester that records what it was fed

use omnihash_core::{Digester, DigesterKind};
use std::sync::{Arc, Mutex};

/// Shared view of what a [`RecordingDigester`] received
#[derive(Debug, Clone, Default)]
pub struct RecordingLog {
    inner: Arc<Mutex<LogState>>,
}

#[derive(Debug, Default)]
struct LogState {
    chunks: Vec<Vec<u8>>,
    finalized: usize,
}

impl RecordingLog {
    pub fn chunks(&self) -> Vec<Vec<u8>> {
        self.inner.lock().map(|s| s.chunks.clone()).unwrap_or_default()
    }

    /// Concatenation of every chunk received
    pub fn bytes(&self) -> Vec<u8> {
        self.chunks().concat()
    }

    /// How many times finalize was called
    pub fn finalized(&self) -> usize {
        self.inner.lock().map(|s| s.finalized).unwrap_or_default()
    }
}

/// Digester whose digest is the hex of everything it saw
pub struct RecordingDigester {
    log: RecordingLog,
}

impl RecordingDigester {
    /// Create a digester and the log that observes it
    pub fn create() -> (Box<dyn Digester>, RecordingLog) {
        let log = RecordingLog::default();
        let digester = Box::new(Self { log: log.clone() });
        (digester, log)
    }
}

impl Digester for RecordingDigester {
    fn update(&mut self, chunk: &[u8]) {
        if let Ok(mut state) = self.log.inner.lock() {
            state.chunks.push(chunk.to_vec());
        }
    }

    fn finalize(self: Box<Self>) -> String {
        if let Ok(mut state) = self.log.inner.lock() {
            state.finalized += 1;
        }
        self.log
            .bytes()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }

    fn kind(&self) -> DigesterKind {
        DigesterKind::Standard
    }
}
