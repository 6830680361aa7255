//! BLAKE2 and BLAKE3 digests

use crate::hashing::traits::{Digester, DigesterFactory, DigesterKind};

#[cfg(feature = "blake2")]
pub(crate) fn blake2_catalogue() -> Vec<(&'static str, DigesterFactory)> {
    use super::standard;

    vec![
        ("BLAKE2B", standard::factory::<blake2::Blake2b512>()),
        ("BLAKE2S", standard::factory::<blake2::Blake2s256>()),
    ]
}

/// BLAKE3 has its own hasher API rather than `digest::Digest` by default
#[cfg(feature = "blake3")]
struct Blake3Digester {
    hasher: blake3::Hasher,
}

#[cfg(feature = "blake3")]
impl Digester for Blake3Digester {
    fn update(&mut self, chunk: &[u8]) {
        self.hasher.update(chunk);
    }

    fn finalize(self: Box<Self>) -> String {
        self.hasher.finalize().to_hex().to_string()
    }

    fn kind(&self) -> DigesterKind {
        DigesterKind::Standard
    }
}

#[cfg(feature = "blake3")]
pub(crate) fn blake3_catalogue() -> Vec<(&'static str, DigesterFactory)> {
    let factory: DigesterFactory = Box::new(|_size_hint| {
        Box::new(Blake3Digester {
            hasher: blake3::Hasher::new(),
        })
    });
    vec![("BLAKE3", factory)]
}
