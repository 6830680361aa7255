//! Mock implementations for testing

mod digester;
mod reader;

pub use digester::{RecordingDigester, RecordingLog};
pub use reader::{CloseTrackingReader, FailingReader};
