//! Optional algorithm families
//!
//! Each provider probes whether its backing crate was compiled in and, if
//! so, registers its algorithms. The set of providers is a static list;
//! nothing is discovered at runtime.

use super::Family;
use super::registry::DigesterRegistry;

/// A family of algorithms that may be absent from a build
pub trait FamilyProvider: Sync {
    /// Family label for the algorithms this provider registers
    fn family(&self) -> Family;

    /// Whether the backing implementation is linked into this build
    fn is_available(&self) -> bool;

    /// Register the family's algorithms
    ///
    /// Only called when [`FamilyProvider::is_available`] returns true.
    /// Providers may register without consulting the filter; the registry
    /// prunes afterwards.
    fn register(&self, registry: &mut DigesterRegistry);
}

pub struct Sha3Family;

impl FamilyProvider for Sha3Family {
    fn family(&self) -> Family {
        Family::Sha3
    }

    fn is_available(&self) -> bool {
        cfg!(feature = "sha3")
    }

    fn register(&self, registry: &mut DigesterRegistry) {
        #[cfg(feature = "sha3")]
        for (name, factory) in super::algorithms::keccak::catalogue() {
            registry.register_if_accepted(name, self.family(), factory);
        }
        #[cfg(not(feature = "sha3"))]
        let _ = registry;
    }
}

pub struct Blake2Family;

impl FamilyProvider for Blake2Family {
    fn family(&self) -> Family {
        Family::Blake2
    }

    fn is_available(&self) -> bool {
        cfg!(feature = "blake2")
    }

    fn register(&self, registry: &mut DigesterRegistry) {
        #[cfg(feature = "blake2")]
        for (name, factory) in super::algorithms::blake::blake2_catalogue() {
            registry.register_if_accepted(name, self.family(), factory);
        }
        #[cfg(not(feature = "blake2"))]
        let _ = registry;
    }
}

pub struct Blake3Family;

impl FamilyProvider for Blake3Family {
    fn family(&self) -> Family {
        Family::Blake3
    }

    fn is_available(&self) -> bool {
        cfg!(feature = "blake3")
    }

    fn register(&self, registry: &mut DigesterRegistry) {
        #[cfg(feature = "blake3")]
        for (name, factory) in super::algorithms::blake::blake3_catalogue() {
            registry.register_if_accepted(name, self.family(), factory);
        }
        #[cfg(not(feature = "blake3"))]
        let _ = registry;
    }
}

/// Optional families in registration order
pub static OPTIONAL_FAMILIES: &[&dyn FamilyProvider] = &[&Sha3Family, &Blake2Family, &Blake3Family];
