//! Digest algorithm adapters, one module per family

#[cfg(any(feature = "blake2", feature = "blake3"))]
pub(crate) mod blake;
pub(crate) mod crc;
pub mod git;
#[cfg(feature = "sha3")]
pub(crate) mod keccak;
pub(crate) mod length;
pub(crate) mod standard;
