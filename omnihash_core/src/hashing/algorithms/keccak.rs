//! SHA-3 (Keccak) digests

use super::standard;
use crate::hashing::traits::DigesterFactory;

pub(crate) fn catalogue() -> Vec<(&'static str, DigesterFactory)> {
    vec![
        ("SHA3_224", standard::factory::<sha3::Sha3_224>()),
        ("SHA3_256", standard::factory::<sha3::Sha3_256>()),
        ("SHA3_384", standard::factory::<sha3::Sha3_384>()),
        ("SHA3_512", standard::factory::<sha3::Sha3_512>()),
    ]
}
