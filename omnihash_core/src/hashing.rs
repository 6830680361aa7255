//! Streaming multi-digest engine
//!
//! A [`DigesterRegistry`] assembles the active algorithms, [`fanout`] feeds
//! one chunk sequence to all of them and collects a [`ResultSet`].

use serde::ser::{Serialize, SerializeMap, Serializer};

mod algorithms;
pub mod fanout;
mod filter;
mod providers;
mod registry;
mod traits;

pub use algorithms::git::GitObjectType;
pub use fanout::{ChunkTee, FanoutOutcome, TeeView, run_fanout};
pub use filter::AlgorithmFilter;
pub use providers::{Blake2Family, Blake3Family, FamilyProvider, OPTIONAL_FAMILIES, Sha3Family};
pub use registry::{DigesterRegistry, RegistryEntry};
pub use traits::{Digester, DigesterFactory, DigesterKind};

/// Algorithm family a registry entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Length,
    Standard,
    Sha3,
    Blake2,
    Blake3,
    Git,
    Crc,
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Family::Length => "length",
            Family::Standard => "standard",
            Family::Sha3 => "sha3",
            Family::Blake2 => "blake2",
            Family::Blake3 => "blake3",
            Family::Git => "git",
            Family::Crc => "crc",
        };
        f.write_str(label)
    }
}

/// One finalized digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestEntry {
    pub algorithm: String,
    pub digest: String,
}

/// Finalized digests of one input item, in registry order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    entries: Vec<DigestEntry>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Digest for `algorithm`, if it was computed
    pub fn get(&self, algorithm: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.algorithm == algorithm)
            .map(|entry| entry.digest.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &DigestEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.algorithm.as_str()).collect()
    }

    /// Keep only digests containing `needle`, ignoring case
    pub fn retain_matching(&mut self, needle: &str) {
        let needle = needle.to_lowercase();
        self.entries
            .retain(|entry| entry.digest.to_lowercase().contains(&needle));
    }
}

impl FromIterator<(String, String)> for ResultSet {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(algorithm, digest)| DigestEntry { algorithm, digest })
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a DigestEntry;
    type IntoIter = std::slice::Iter<'a, DigestEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for ResultSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.algorithm, &entry.digest)?;
        }
        map.end()
    }
}
