//! Test data builders for creating test scenarios

use bytes::Bytes;
use omnihash_core::ChunkSource;
use std::io;
use std::path::{Path, PathBuf};

/// Builder for deterministic byte content
#[derive(Debug, Clone)]
pub struct TestDataBuilder {
    size: usize,
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new test data builder
    pub fn new() -> Self {
        Self { size: 0, seed: 0 }
    }

    /// Set content size
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Set generator seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Generate the content
    pub fn build(&self) -> Vec<u8> {
        // Same LCG for a given seed on every platform
        let mut state = self.seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        (0..self.size)
            .map(|_| {
                state = state.wrapping_mul(1664525).wrapping_add(1013904223);
                (state >> 24) as u8
            })
            .collect()
    }

    /// Generate the content as a source cut into `chunk_sizes`, cycling
    /// through the sizes; the size hint is set when `sized` is true
    pub fn build_source(&self, chunk_sizes: &[usize], sized: bool) -> ChunkSource {
        let data = self.build();
        let hint = sized.then_some(data.len() as u64);
        let chunks: Vec<io::Result<Bytes>> = rechunk(&data, chunk_sizes).into_iter().map(Ok).collect();
        ChunkSource::from_chunks(chunks, hint)
    }
}

impl Default for TestDataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Split `data` into chunks whose sizes cycle through `sizes`
///
/// Zero sizes produce empty chunks; an all-zero (or empty) size list yields
/// the data as one chunk.
pub fn rechunk(data: &[u8], sizes: &[usize]) -> Vec<Bytes> {
    if sizes.iter().all(|&s| s == 0) {
        return vec![Bytes::copy_from_slice(data)];
    }

    let mut chunks = Vec::new();
    let mut offset = 0;
    for &size in sizes.iter().cycle() {
        if offset >= data.len() {
            break;
        }
        let end = (offset + size).min(data.len());
        chunks.push(Bytes::copy_from_slice(&data[offset..end]));
        offset = end;
    }
    chunks
}

/// Writes test files into a directory and removes them on drop
pub struct TestFileBuilder {
    base_dir: PathBuf,
    generated_files: Vec<PathBuf>,
}

impl TestFileBuilder {
    /// Create a new test file builder
    pub fn new(base_dir: &Path) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            generated_files: Vec::new(),
        }
    }

    /// Write `content` to `name` under the base directory
    pub fn write_file(&mut self, name: &str, content: &[u8]) -> io::Result<PathBuf> {
        let file_path = self.base_dir.join(name);
        std::fs::write(&file_path, content)?;
        self.generated_files.push(file_path.clone());
        Ok(file_path)
    }

    /// Write deterministic content of `size` bytes
    pub fn generate_deterministic_file(&mut self, name: &str, size: usize, seed: u64) -> io::Result<PathBuf> {
        let content = TestDataBuilder::new().with_size(size).with_seed(seed).build();
        self.write_file(name, &content)
    }

    /// Remove every generated file
    pub fn cleanup(&mut self) {
        for file in self.generated_files.drain(..) {
            let _ = std::fs::remove_file(file);
        }
    }
}

impl Drop for TestFileBuilder {
    fn drop(&mut self) {
        self.cleanup();
    }
}
