//! Instrumented readers for resource-lifetime tests

use std::io::{self, Cursor, Read};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Reader over in-memory data that counts how often it was dropped
pub struct CloseTrackingReader {
    inner: Cursor<Vec<u8>>,
    closes: Arc<AtomicUsize>,
}

impl CloseTrackingReader {
    /// Create a reader and the counter of its closes
    pub fn new(data: Vec<u8>) -> (Self, Arc<AtomicUsize>) {
        let closes = Arc::new(AtomicUsize::new(0));
        let reader = Self {
            inner: Cursor::new(data),
            closes: Arc::clone(&closes),
        };
        (reader, closes)
    }
}

impl Read for CloseTrackingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Drop for CloseTrackingReader {
    fn drop(&mut self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Reader that yields `data` and then fails with `kind`
pub struct FailingReader {
    inner: Cursor<Vec<u8>>,
    kind: io::ErrorKind,
    closes: Arc<AtomicUsize>,
}

impl FailingReader {
    pub fn new(data: Vec<u8>, kind: io::ErrorKind) -> (Self, Arc<AtomicUsize>) {
        let closes = Arc::new(AtomicUsize::new(0));
        let reader = Self {
            inner: Cursor::new(data),
            kind,
            closes: Arc::clone(&closes),
        };
        (reader, closes)
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.inner.read(buf)? {
            0 => Err(io::Error::new(self.kind, "simulated read failure")),
            n => Ok(n),
        }
    }
}

impl Drop for FailingReader {
    fn drop(&mut self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}
