//! Standard cryptographic digests backed by the RustCrypto `digest` crates

use crate::hashing::traits::{Digester, DigesterFactory, DigesterKind};
use digest::Digest;

/// Adapter turning any `digest::Digest` into a [`Digester`]
pub(crate) struct DigestAdapter<D> {
    hasher: D,
}

impl<D: Digest> DigestAdapter<D> {
    pub(crate) fn new() -> Self {
        Self { hasher: D::new() }
    }
}

impl<D: Digest + Send> Digester for DigestAdapter<D> {
    fn update(&mut self, chunk: &[u8]) {
        Digest::update(&mut self.hasher, chunk);
    }

    fn finalize(self: Box<Self>) -> String {
        hex::encode(self.hasher.finalize())
    }

    fn kind(&self) -> DigesterKind {
        DigesterKind::Standard
    }
}

/// Factory for a `digest::Digest` implementation; the size hint is ignored
pub(crate) fn factory<D>() -> DigesterFactory
where
    D: Digest + Send + 'static,
{
    Box::new(|_size_hint| Box::new(DigestAdapter::<D>::new()))
}

/// The standard family, sorted by lowercase name
pub(crate) fn catalogue() -> Vec<(&'static str, DigesterFactory)> {
    vec![
        ("MD4", factory::<md4::Md4>()),
        ("MD5", factory::<md5::Md5>()),
        ("SHA1", factory::<sha1::Sha1>()),
        ("SHA224", factory::<sha2::Sha224>()),
        ("SHA256", factory::<sha2::Sha256>()),
        ("SHA384", factory::<sha2::Sha384>()),
        ("SHA512", factory::<sha2::Sha512>()),
        ("SHA512_224", factory::<sha2::Sha512_224>()),
        ("SHA512_256", factory::<sha2::Sha512_256>()),
        ("TIGER", factory::<tiger::Tiger>()),
    ]
}
