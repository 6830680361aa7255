//! Length pseudo-digester: reports the byte count as a decimal string

use crate::hashing::traits::{Digester, DigesterFactory, DigesterKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LengthState {
    /// Nonzero size was supplied up front; chunks are not recounted
    Known(u64),
    /// Size unknown or reported as zero; every chunk is counted
    Counting(u64),
}

pub(crate) struct LengthDigester {
    state: LengthState,
}

impl LengthDigester {
    pub(crate) fn new(size_hint: Option<u64>) -> Self {
        let state = match size_hint {
            // Zero-size metadata (procfs, pipes) still gets counted
            Some(size) if size > 0 => LengthState::Known(size),
            _ => LengthState::Counting(0),
        };
        Self { state }
    }
}

impl Digester for LengthDigester {
    fn update(&mut self, chunk: &[u8]) {
        if let LengthState::Counting(count) = &mut self.state {
            *count += chunk.len() as u64;
        }
    }

    fn finalize(self: Box<Self>) -> String {
        match self.state {
            LengthState::Known(size) | LengthState::Counting(size) => size.to_string(),
        }
    }

    fn kind(&self) -> DigesterKind {
        DigesterKind::Length
    }
}

pub(crate) fn factory() -> DigesterFactory {
    Box::new(|size_hint| Box::new(LengthDigester::new(size_hint)))
}
