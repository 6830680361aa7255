//! Byte-chunk sources handed to the fan-out engine
//!
//! A source is a forward-only sequence of chunks plus an optional size hint.
//! Readers wrapped by a source are dropped exactly once: at end of input, on
//! the first read error, or when the source itself is dropped.

use bytes::Bytes;
use std::io::{self, Read};

/// Default read size for reader-backed sources
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

type ChunkIter = Box<dyn Iterator<Item = io::Result<Bytes>> + Send>;

/// One input item's content as a forward-only chunk sequence
pub struct ChunkSource {
    chunks: ChunkIter,
    size_hint: Option<u64>,
}

impl ChunkSource {
    /// A single chunk whose size is known
    pub fn from_bytes(data: impl Into<Bytes>) -> Self {
        let data = data.into();
        let size_hint = Some(data.len() as u64);
        Self {
            chunks: Box::new(std::iter::once(Ok(data))),
            size_hint,
        }
    }

    /// Read `reader` in chunks of at most `chunk_size` bytes
    ///
    /// A zero `chunk_size` is treated as one byte.
    pub fn from_reader<R>(reader: R, size_hint: Option<u64>, chunk_size: usize) -> Self
    where
        R: Read + Send + 'static,
    {
        Self {
            chunks: Box::new(ReaderChunks::new(reader, chunk_size)),
            size_hint,
        }
    }

    /// Wrap an arbitrary chunk iterator
    pub fn from_chunks<I>(chunks: I, size_hint: Option<u64>) -> Self
    where
        I: IntoIterator<Item = io::Result<Bytes>>,
        I::IntoIter: Send + 'static,
    {
        Self {
            chunks: Box::new(chunks.into_iter()),
            size_hint,
        }
    }

    /// Total byte length, when known in advance
    pub fn size_hint(&self) -> Option<u64> {
        self.size_hint
    }

    pub fn into_chunks(self) -> ChunkIter {
        self.chunks
    }
}

impl std::fmt::Debug for ChunkSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkSource")
            .field("size_hint", &self.size_hint)
            .finish_non_exhaustive()
    }
}

/// Chunked reads over a reader, releasing it on EOF or error
struct ReaderChunks<R> {
    reader: Option<R>,
    chunk_size: usize,
}

impl<R: Read> ReaderChunks<R> {
    fn new(reader: R, chunk_size: usize) -> Self {
        Self {
            reader: Some(reader),
            chunk_size: chunk_size.max(1),
        }
    }
}

impl<R: Read> Iterator for ReaderChunks<R> {
    type Item = io::Result<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        let reader = self.reader.as_mut()?;
        let mut buffer = vec![0u8; self.chunk_size];

        loop {
            match reader.read(&mut buffer) {
                Ok(0) => {
                    self.reader = None;
                    return None;
                }
                Ok(n) => {
                    buffer.truncate(n);
                    return Some(Ok(Bytes::from(buffer)));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.reader = None;
                    return Some(Err(e));
                }
            }
        }
    }
}
