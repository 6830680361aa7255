//! Composes registry, fan-out and match filtering into per-item reports

use crate::error::ValidationError;
use crate::hashing::{
    AlgorithmFilter, Digester, DigesterKind, DigesterRegistry, ResultSet, run_fanout,
};
use crate::progress::{ProgressProvider, ProgressUpdate};
use crate::source::ChunkSource;
use crate::{HashingConfig, Result};
use std::sync::Arc;

/// Which digests to compute and which to report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigestSelection {
    /// Family substrings to include; empty means every family
    pub families: Vec<String>,
    /// Family substrings to exclude; exclusion wins over inclusion
    pub excludes: Vec<String>,
    /// Add the CRC family on top of the configured default
    pub include_crcs: bool,
    /// Keep only digests containing this substring, ignoring case
    pub match_digest: Option<String>,
}

/// How an item's result set came to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every selected digest was computed and reported
    Complete,
    /// The filters left no algorithm to run
    NoAlgorithms,
    /// Digests were computed but none contained the match string
    NoMatch,
}

/// Digests of one input item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemReport {
    pub label: Option<String>,
    pub results: ResultSet,
    pub outcome: Outcome,
    pub bytes_hashed: u64,
}

/// Hashes input items with a fixed algorithm selection
pub struct Omnihasher {
    config: HashingConfig,
    registry: DigesterRegistry,
    match_digest: Option<String>,
    progress: Arc<dyn ProgressProvider>,
}

impl Omnihasher {
    pub fn new(config: HashingConfig, selection: DigestSelection) -> Result<Self> {
        if config.chunk_size == 0 {
            return Err(ValidationError::invalid_parameter(
                "chunk_size",
                "must be greater than zero",
            )
            .into());
        }

        let filter = AlgorithmFilter::new(&selection.families, &selection.excludes);
        let include_crcs = selection.include_crcs || config.include_crcs;
        let registry = DigesterRegistry::collect(filter, include_crcs, config.slurp_warn_bytes);

        if registry.is_empty() {
            log::info!("No algorithms match the family filters");
        }

        Ok(Self {
            config,
            registry,
            match_digest: selection.match_digest.filter(|m| !m.is_empty()),
            progress: <dyn ProgressProvider>::null(),
        })
    }

    /// Report progress to `provider` instead of discarding it
    pub fn with_progress(mut self, provider: Arc<dyn ProgressProvider>) -> Self {
        self.progress = provider;
        self
    }

    pub fn registry(&self) -> &DigesterRegistry {
        &self.registry
    }

    /// Read size for reader-backed sources
    pub fn chunk_size(&self) -> usize {
        self.config.chunk_size
    }

    /// Hash one input item with fresh digester instances
    pub fn hash_item(&self, label: Option<&str>, source: ChunkSource) -> Result<ItemReport> {
        let label = label.map(str::to_string);

        if self.registry.is_empty() {
            return Ok(ItemReport {
                label,
                results: ResultSet::new(),
                outcome: Outcome::NoAlgorithms,
                bytes_hashed: 0,
            });
        }

        let size_hint = source.size_hint();
        log::debug!(
            "Hashing {} with {} algorithms (size hint: {size_hint:?})",
            label.as_deref().unwrap_or("<stream>"),
            self.registry.len()
        );

        self.progress.report(ProgressUpdate::ItemStarted {
            label: label.clone(),
            total_bytes: size_hint,
        });

        let digesters = self.registry.instantiate(size_hint);
        let buffering = buffering_digesters(&digesters);
        if !buffering.is_empty() {
            log::debug!("No size hint, buffering whole input for {}", buffering.join(", "));
        }
        let fanout = run_fanout(source, digesters, self.progress.as_ref()).map_err(|e| match &label {
            Some(label) => e.with_label(label),
            None => e,
        })?;

        self.progress.report(ProgressUpdate::ItemFinished {
            label: label.clone(),
            bytes_processed: fanout.bytes_processed,
        });

        let mut results = fanout.results;
        let outcome = match &self.match_digest {
            Some(needle) => {
                results.retain_matching(needle);
                if results.is_empty() {
                    Outcome::NoMatch
                } else {
                    Outcome::Complete
                }
            }
            None => Outcome::Complete,
        };

        Ok(ItemReport {
            label,
            results,
            outcome,
            bytes_hashed: fanout.bytes_processed,
        })
    }

    /// Hash every item in order, stopping at the first failure
    pub fn hash_all<I>(&self, items: I) -> Result<Vec<ItemReport>>
    where
        I: IntoIterator<Item = (Option<String>, ChunkSource)>,
    {
        let reports = items
            .into_iter()
            .map(|(label, source)| self.hash_item(label.as_deref(), source))
            .collect::<Result<Vec<_>>>();

        self.progress.complete();
        reports
    }
}

impl std::fmt::Debug for Omnihasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Omnihasher")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("match_digest", &self.match_digest)
            .finish_non_exhaustive()
    }
}

/// Names of the digesters that hold the whole input in memory
fn buffering_digesters(digesters: &[(&'static str, Box<dyn Digester>)]) -> Vec<&'static str> {
    digesters
        .iter()
        .filter(|(_, digester)| digester.kind() == DigesterKind::SizePrefixedSlurp)
        .map(|(name, _)| *name)
        .collect()
}
