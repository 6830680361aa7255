//! Builders for deterministic test inputs

mod test_data;

pub use test_data::{TestDataBuilder, TestFileBuilder, rechunk};
