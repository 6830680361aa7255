//! Test utilities for omnihash
//!
//! This crate provides recording digesters, instrumented readers and
//! deterministic data builders for testing the hashing engine.

pub mod builders;
pub mod mocks;

// Re-export commonly used types
pub use builders::{TestDataBuilder, TestFileBuilder, rechunk};
pub use mocks::{CloseTrackingReader, FailingReader, RecordingDigester, RecordingLog};
