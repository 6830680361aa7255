//! Omnihash Core Library
//!
//! Computes many digests of one input in a single pass: a registry selects
//! the algorithms, the fan-out engine feeds one chunk sequence to all of
//! them, and the orchestrator turns the results into per-item reports.

pub mod error;
pub mod hashing;
pub mod orchestrator;
pub mod progress;
pub mod source;

pub use error::{Error, Result};
pub use hashing::{
    AlgorithmFilter, DigestEntry, Digester, DigesterKind, DigesterRegistry, Family, ResultSet,
};
pub use orchestrator::{DigestSelection, ItemReport, Omnihasher, Outcome};
pub use progress::{NullProvider, ProgressProvider, ProgressUpdate};
pub use source::{ChunkSource, DEFAULT_CHUNK_SIZE};

/// Slurp buffers past this size log a warning
pub const DEFAULT_SLURP_WARN_BYTES: u64 = 256 * 1024 * 1024;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct HashingConfig {
    /// Read size for file and stream sources
    pub chunk_size: usize,
    /// Include the CRC family by default
    pub include_crcs: bool,
    /// Warn once a size-prefixed digester buffers more than this many bytes
    pub slurp_warn_bytes: u64,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            include_crcs: false,
            slurp_warn_bytes: DEFAULT_SLURP_WARN_BYTES,
        }
    }
}

impl HashingConfig {
    /// Create a test configuration
    pub fn test() -> Self {
        Self {
            chunk_size: 16, // tiny chunks exercise the fan-out rounds
            include_crcs: true,
            slurp_warn_bytes: 1024,
        }
    }
}
