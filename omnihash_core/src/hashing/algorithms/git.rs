//! Git-style size-prefixed digests
//!
//! Git hashes `"<type> <length>\0"` followed by the object bytes with SHA-1.
//! When the length is known up front the header is fed first and the bytes
//! stream through; otherwise every chunk is buffered until finalize.
//! No end-of-line conversion is performed, unlike `git hash-object`.

use crate::hashing::traits::{Digester, DigesterFactory, DigesterKind};
use sha1::{Digest, Sha1};

/// Git object types with their own digest entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GitObjectType {
    Blob,
    Commit,
    Tag,
}

impl GitObjectType {
    pub const ALL: [GitObjectType; 3] = [Self::Blob, Self::Commit, Self::Tag];

    /// Object type as written in the header
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blob => "blob",
            Self::Commit => "commit",
            Self::Tag => "tag",
        }
    }

    /// Registry name, e.g. `GIT-BLOB`
    pub fn algorithm_name(&self) -> &'static str {
        match self {
            Self::Blob => "GIT-BLOB",
            Self::Commit => "GIT-COMMIT",
            Self::Tag => "GIT-TAG",
        }
    }
}

fn git_header(object_type: GitObjectType, size: u64) -> Vec<u8> {
    format!("{} {size}\0", object_type.as_str()).into_bytes()
}

/// Streams chunks through SHA-1 after seeding it with a header built from
/// the known size
struct SizedGitDigester {
    hasher: Sha1,
}

impl SizedGitDigester {
    fn new(object_type: GitObjectType, size: u64) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(git_header(object_type, size));
        Self { hasher }
    }
}

impl Digester for SizedGitDigester {
    fn update(&mut self, chunk: &[u8]) {
        self.hasher.update(chunk);
    }

    fn finalize(self: Box<Self>) -> String {
        hex::encode(self.hasher.finalize())
    }

    fn kind(&self) -> DigesterKind {
        DigesterKind::SizePrefixedKnown
    }
}

/// Buffers the whole input, since the header needs the total length
struct SlurpGitDigester {
    object_type: GitObjectType,
    buffer: Vec<u8>,
    warn_bytes: u64,
    warned: bool,
}

impl SlurpGitDigester {
    fn new(object_type: GitObjectType, warn_bytes: u64) -> Self {
        Self {
            object_type,
            buffer: Vec::new(),
            warn_bytes,
            warned: false,
        }
    }
}

impl Digester for SlurpGitDigester {
    fn update(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);

        if !self.warned && self.buffer.len() as u64 > self.warn_bytes {
            self.warned = true;
            log::warn!(
                "{} is buffering an unsized input in memory ({} bytes so far)",
                self.object_type.algorithm_name(),
                self.buffer.len()
            );
        }
    }

    fn finalize(self: Box<Self>) -> String {
        let mut hasher = Sha1::new();
        hasher.update(git_header(self.object_type, self.buffer.len() as u64));
        hasher.update(&self.buffer);
        hex::encode(hasher.finalize())
    }

    fn kind(&self) -> DigesterKind {
        DigesterKind::SizePrefixedSlurp
    }
}

/// Size-prefixed digester for `object_type`, slurping only without a size hint
pub(crate) fn new_digester(
    object_type: GitObjectType,
    size_hint: Option<u64>,
    warn_bytes: u64,
) -> Box<dyn Digester> {
    match size_hint {
        Some(size) => Box::new(SizedGitDigester::new(object_type, size)),
        None => {
            log::debug!(
                "No size hint for {}, buffering input",
                object_type.algorithm_name()
            );
            Box::new(SlurpGitDigester::new(object_type, warn_bytes))
        }
    }
}

pub(crate) fn factory(object_type: GitObjectType, warn_bytes: u64) -> DigesterFactory {
    Box::new(move |size_hint| new_digester(object_type, size_hint, warn_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_WARN: u64 = u64::MAX;

    fn run(object_type: GitObjectType, hint: Option<u64>, chunks: &[&[u8]]) -> String {
        let mut digester = new_digester(object_type, hint, NO_WARN);
        for chunk in chunks {
            digester.update(chunk);
        }
        digester.finalize()
    }

    #[test]
    fn test_header_format() {
        assert_eq!(git_header(GitObjectType::Blob, 0), b"blob 0\0");
        assert_eq!(git_header(GitObjectType::Commit, 1234), b"commit 1234\0");
    }

    #[test]
    fn test_empty_blob_matches_git() {
        assert_eq!(
            run(GitObjectType::Blob, Some(0), &[]),
            "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391"
        );
        assert_eq!(
            run(GitObjectType::Blob, None, &[]),
            "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391"
        );
    }

    #[test]
    fn test_hello_blob_matches_git() {
        assert_eq!(
            run(GitObjectType::Blob, Some(6), &[b"hel", b"lo\n"]),
            "ce013625030ba8dba906f756967f9e9ca394464a"
        );
    }

    #[test]
    fn test_known_and_slurp_modes_agree() {
        let data: &[&[u8]] = &[b"tree 4b825dc642cb6eb9a060e54bf8d69288fbee4904\n", b"", b"msg\n"];
        let total: usize = data.iter().map(|c| c.len()).sum();

        for object_type in GitObjectType::ALL {
            assert_eq!(
                run(object_type, Some(total as u64), data),
                run(object_type, None, data),
                "{object_type:?}"
            );
        }
    }

    #[test]
    fn test_mode_follows_size_hint() {
        assert_eq!(
            new_digester(GitObjectType::Tag, Some(3), NO_WARN).kind(),
            DigesterKind::SizePrefixedKnown
        );
        assert_eq!(
            new_digester(GitObjectType::Tag, None, NO_WARN).kind(),
            DigesterKind::SizePrefixedSlurp
        );
    }

    #[test]
    fn test_object_types_differ() {
        let blob = run(GitObjectType::Blob, None, &[b"x"]);
        let commit = run(GitObjectType::Commit, None, &[b"x"]);
        let tag = run(GitObjectType::Tag, None, &[b"x"]);
        assert_ne!(blob, commit);
        assert_ne!(commit, tag);
    }

    #[test]
    fn test_slurp_warning_fires_once() {
        let mut digester = SlurpGitDigester::new(GitObjectType::Blob, 4);
        digester.update(b"abc");
        assert!(!digester.warned);
        digester.update(b"de");
        assert!(digester.warned);
        digester.update(b"f");
        assert!(digester.warned);
    }
}
