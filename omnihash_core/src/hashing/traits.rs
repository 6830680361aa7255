//! Core traits for the digester abstraction

/// Which adapter sits behind a [`Digester`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigesterKind {
    /// A cryptographic hash from a `digest`-style crate
    Standard,
    /// A CRC checksum
    Crc,
    /// The byte-counting pseudo digester
    Length,
    /// Size-prefixed hash seeded up front from a known size
    SizePrefixedKnown,
    /// Size-prefixed hash that buffers everything until finalize
    SizePrefixedSlurp,
}

/// Streaming digest calculation over successive byte chunks
///
/// A digester is single use: it sees every chunk of one input item in
/// order and is consumed by [`Digester::finalize`].
pub trait Digester: Send {
    /// Feed the next chunk; empty chunks are allowed
    fn update(&mut self, chunk: &[u8]);

    /// Finalize the calculation and return the encoded digest
    fn finalize(self: Box<Self>) -> String;

    /// The adapter variant behind this digester
    fn kind(&self) -> DigesterKind;
}

/// Constructor for a fresh [`Digester`], given the input's size hint
pub type DigesterFactory = Box<dyn Fn(Option<u64>) -> Box<dyn Digester> + Send + Sync>;
