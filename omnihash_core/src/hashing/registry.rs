//! Ordered registry of digester factories
//!
//! A registry is built fresh for each hash run. Insertion order is the
//! default output order and the first registration of a name wins.

use super::Family;
use super::algorithms::{crc, git, length, standard};
use super::filter::{AlgorithmFilter, assert_canonical};
use super::providers::FamilyProvider;
use super::traits::{Digester, DigesterFactory};

/// One named factory in the registry
pub struct RegistryEntry {
    name: &'static str,
    family: Family,
    factory: DigesterFactory,
}

impl RegistryEntry {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn family(&self) -> Family {
        self.family
    }

    /// Build a fresh digester for an input of the given size
    pub fn instantiate(&self, size_hint: Option<u64>) -> Box<dyn Digester> {
        (self.factory)(size_hint)
    }
}

impl std::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("name", &self.name)
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

/// Ordered mapping from canonical algorithm name to digester factory
#[derive(Debug)]
pub struct DigesterRegistry {
    filter: AlgorithmFilter,
    entries: Vec<RegistryEntry>,
}

impl DigesterRegistry {
    /// Create an empty registry guarded by `filter`
    pub fn new(filter: AlgorithmFilter) -> Self {
        Self {
            filter,
            entries: Vec::new(),
        }
    }

    /// Build the full registry in default order: length, standard,
    /// optional families, git and, when requested, CRCs
    pub fn collect(filter: AlgorithmFilter, include_crcs: bool, slurp_warn_bytes: u64) -> Self {
        let mut registry = Self::new(filter);
        registry.append_length();
        registry.append_standard();
        registry.append_optional_families(super::providers::OPTIONAL_FAMILIES);
        registry.append_git(slurp_warn_bytes);
        if include_crcs {
            registry.append_crcs();
        }

        log::debug!(
            "Registry built with {} algorithms: {}",
            registry.len(),
            registry.names().join(", ")
        );
        registry
    }

    pub fn filter(&self) -> &AlgorithmFilter {
        &self.filter
    }

    /// Whether the filter would accept `name`
    ///
    /// # Panics
    ///
    /// Panics when `name` is not canonical uppercase.
    pub fn is_algo_accepted(&self, name: &str) -> bool {
        self.filter.accepts(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    /// Register without consulting the filter; a name already present is kept
    ///
    /// Returns whether the entry was added.
    ///
    /// # Panics
    ///
    /// Panics when `name` is not canonical uppercase.
    pub fn register(&mut self, name: &'static str, family: Family, factory: DigesterFactory) -> bool {
        assert_canonical(name);

        if self.contains(name) {
            log::trace!("{name} already registered, keeping the first entry");
            return false;
        }

        self.entries.push(RegistryEntry {
            name,
            family,
            factory,
        });
        true
    }

    /// Register only when the filter accepts `name`
    ///
    /// Returns whether the entry was added.
    pub fn register_if_accepted(
        &mut self,
        name: &'static str,
        family: Family,
        factory: DigesterFactory,
    ) -> bool {
        if !self.is_algo_accepted(name) {
            return false;
        }
        self.register(name, family, factory)
    }

    pub fn append_length(&mut self) {
        if self.is_algo_accepted("LENGTH") {
            self.register("LENGTH", Family::Length, length::factory());
        }
    }

    pub fn append_standard(&mut self) {
        for (name, factory) in standard::catalogue() {
            self.register_if_accepted(name, Family::Standard, factory);
        }
    }

    /// Register every available provider, then prune with the filter
    pub fn append_optional_families(&mut self, providers: &[&dyn FamilyProvider]) {
        for provider in providers {
            if !provider.is_available() {
                log::debug!(
                    "{:?} family is not available in this build, skipping",
                    provider.family()
                );
                continue;
            }
            provider.register(self);
        }
        self.prune();
    }

    pub fn append_git(&mut self, slurp_warn_bytes: u64) {
        for object_type in git::GitObjectType::ALL {
            let name = object_type.algorithm_name();
            if self.is_algo_accepted(name) {
                self.register(name, Family::Git, git::factory(object_type, slurp_warn_bytes));
            }
        }
    }

    pub fn append_crcs(&mut self) {
        for (name, factory) in crc::catalogue() {
            self.register_if_accepted(name, Family::Crc, factory);
        }
    }

    /// Drop every entry the filter rejects
    pub fn prune(&mut self) {
        let filter = &self.filter;
        let before = self.entries.len();
        self.entries.retain(|entry| filter.accepts(entry.name));

        let pruned = before - self.entries.len();
        if pruned > 0 {
            log::debug!("Pruned {pruned} algorithms rejected by the filter");
        }
    }

    /// Algorithm names in registration order
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.name).collect()
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fresh digesters for one input item, in registration order
    pub fn instantiate(&self, size_hint: Option<u64>) -> Vec<(&'static str, Box<dyn Digester>)> {
        self.entries
            .iter()
            .map(|entry| (entry.name, entry.instantiate(size_hint)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::DigesterKind;

    const NO_WARN: u64 = u64::MAX;

    fn filter(includes: &[&str], excludes: &[&str]) -> AlgorithmFilter {
        AlgorithmFilter::new(includes.iter(), excludes.iter())
    }

    struct RogueFamily;

    impl FamilyProvider for RogueFamily {
        fn family(&self) -> Family {
            Family::Standard
        }

        fn is_available(&self) -> bool {
            true
        }

        fn register(&self, registry: &mut DigesterRegistry) {
            registry.register("ROGUE-MD5", Family::Standard, standard::factory::<md5::Md5>());
            registry.register("ROGUE-SHA1", Family::Standard, standard::factory::<sha1::Sha1>());
        }
    }

    struct MissingFamily;

    impl FamilyProvider for MissingFamily {
        fn family(&self) -> Family {
            Family::Blake3
        }

        fn is_available(&self) -> bool {
            false
        }

        fn register(&self, _registry: &mut DigesterRegistry) {
            panic!("unavailable provider must not register");
        }
    }

    #[test]
    fn test_default_order() {
        let registry = DigesterRegistry::collect(AlgorithmFilter::accept_all(), false, NO_WARN);
        let names = registry.names();

        assert_eq!(names[0], "LENGTH");
        assert_eq!(&names[1..4], ["MD4", "MD5", "SHA1"]);
        let git = names.iter().position(|n| *n == "GIT-BLOB").unwrap();
        assert_eq!(&names[git..], ["GIT-BLOB", "GIT-COMMIT", "GIT-TAG"]);
        assert!(!names.iter().any(|n| n.starts_with("CRC")));
    }

    #[test]
    fn test_crcs_only_on_request() {
        let registry = DigesterRegistry::collect(AlgorithmFilter::accept_all(), true, NO_WARN);
        assert!(registry.contains("CRC-32"));
        assert_eq!(registry.names().last(), Some(&"XMODEM"));
    }

    #[test]
    fn test_filter_applies_to_every_family() {
        let registry = DigesterRegistry::collect(filter(&["SHA2"], &[]), true, NO_WARN);
        assert_eq!(registry.names(), ["SHA224", "SHA256"]);
    }

    #[test]
    fn test_nothing_accepted_gives_empty_registry() {
        let registry = DigesterRegistry::collect(filter(&["NOPE"], &[]), true, NO_WARN);
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_first_registration_wins() {
        let mut registry = DigesterRegistry::new(AlgorithmFilter::accept_all());
        assert!(registry.register("LENGTH", Family::Length, length::factory()));
        assert!(!registry.register("LENGTH", Family::Standard, standard::factory::<md5::Md5>()));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.entries()[0].family(), Family::Length);
        assert_eq!(registry.entries()[0].instantiate(None).kind(), DigesterKind::Length);
    }

    #[test]
    fn test_register_if_accepted_skips_rejected() {
        let mut registry = DigesterRegistry::new(filter(&[], &["MD"]));
        assert!(!registry.register_if_accepted("MD5", Family::Standard, standard::factory::<md5::Md5>()));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_uncontrolled_provider_is_pruned() {
        let mut registry = DigesterRegistry::new(filter(&["SHA"], &[]));
        registry.append_optional_families(&[&RogueFamily, &MissingFamily]);
        assert_eq!(registry.names(), ["ROGUE-SHA1"]);
    }

    #[test]
    #[should_panic(expected = "must be uppercase")]
    fn test_lowercase_registration_panics() {
        let mut registry = DigesterRegistry::new(AlgorithmFilter::accept_all());
        registry.register("md5", Family::Standard, standard::factory::<md5::Md5>());
    }

    #[test]
    fn test_instantiate_follows_size_hint() {
        let registry = DigesterRegistry::collect(filter(&["GIT-BLOB"], &[]), false, NO_WARN);

        let known = registry.instantiate(Some(4));
        assert_eq!(known[0].0, "GIT-BLOB");
        assert_eq!(known[0].1.kind(), DigesterKind::SizePrefixedKnown);

        let unknown = registry.instantiate(None);
        assert_eq!(unknown[0].1.kind(), DigesterKind::SizePrefixedSlurp);
    }

    #[cfg(all(feature = "sha3", feature = "blake2", feature = "blake3"))]
    #[test]
    fn test_optional_families_follow_standard() {
        let registry = DigesterRegistry::collect(AlgorithmFilter::accept_all(), false, NO_WARN);
        let names = registry.names();
        let tiger = names.iter().position(|n| *n == "TIGER").unwrap();
        assert_eq!(
            &names[tiger + 1..tiger + 8],
            ["SHA3_224", "SHA3_256", "SHA3_384", "SHA3_512", "BLAKE2B", "BLAKE2S", "BLAKE3"]
        );
    }
}
