//! Turning HASHME arguments into chunk sources
//!
//! Each argument is a URL, an existing path, or a literal string, in that
//! order of preference. Acquisition failures are reported here, before the
//! engine ever sees the item.

use crate::error::{CliError, CliResult, ErrorContext};
use colored::*;
use omnihash_core::ChunkSource;
use reqwest::Url;
use reqwest::blocking::Client;
use std::cell::OnceCell;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

const USER_AGENT: &str = concat!("omnihash/", env!("CARGO_PKG_VERSION"));

/// What a HASHME argument refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    Url(Url),
    File(PathBuf),
    Directory(PathBuf),
    String(String),
    Stdin,
}

impl InputKind {
    /// Classify one argument; `force_string` skips URL and path detection
    pub fn classify(hashme: &str, force_string: bool) -> Self {
        if force_string {
            return Self::String(hashme.to_string());
        }

        if let Some(url) = parse_http_url(hashme) {
            return Self::Url(url);
        }

        let path = Path::new(hashme);
        if path.is_dir() {
            Self::Directory(path.to_path_buf())
        } else if path.exists() {
            Self::File(path.to_path_buf())
        } else {
            Self::String(hashme.to_string())
        }
    }

    /// The "Hashing ..." line printed before an item's digests
    pub fn header(&self) -> String {
        match self {
            Self::Url(url) => format!("Hashing content of URL {}..", url.as_str().bold()),
            Self::File(path) => format!("Hashing file {}..", path.display().to_string().bold()),
            Self::Directory(path) => format!("{} directory '{}'..", "Skipping".yellow(), path.display()),
            Self::String(s) => format!("Hashing string {}..", s.bold()),
            Self::Stdin => format!("Hashing {}..", "standard input".bold()),
        }
    }
}

fn parse_http_url(candidate: &str) -> Option<Url> {
    let url = Url::parse(candidate).ok()?;
    let is_http = matches!(url.scheme(), "http" | "https");
    (is_http && url.host_str().is_some_and(|h| !h.is_empty())).then_some(url)
}

/// Opens files, streams and URLs as [`ChunkSource`]s
pub struct Acquirer {
    chunk_size: usize,
    timeout: Duration,
    client: OnceCell<Client>,
}

impl Acquirer {
    pub fn new(chunk_size: usize, timeout: Duration) -> Self {
        Self {
            chunk_size,
            timeout,
            client: OnceCell::new(),
        }
    }

    /// Open the bytes behind `kind`
    pub fn open(&self, kind: &InputKind) -> CliResult<ChunkSource> {
        match kind {
            InputKind::Url(url) => self.fetch(url),
            InputKind::File(path) => self.open_file(path),
            InputKind::String(s) => Ok(ChunkSource::from_bytes(s.clone().into_bytes())),
            InputKind::Stdin => Ok(ChunkSource::from_reader(io::stdin(), None, self.chunk_size)),
            InputKind::Directory(path) => Err(CliError::filesystem(&format!(
                "'{}' is a directory",
                path.display()
            ))),
        }
    }

    fn open_file(&self, path: &Path) -> CliResult<ChunkSource> {
        let display = path.display().to_string();
        let file = File::open(path).map_err(|e| CliError::from_io_error(e, &display))?;
        let size = file
            .metadata()
            .map_err(|e| CliError::from_io_error(e, &display))?
            .len();

        log::debug!("Opened {display} ({size} bytes)");
        Ok(ChunkSource::from_reader(file, Some(size), self.chunk_size))
    }

    fn client(&self) -> CliResult<&Client> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }

        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CliError::network("Failed to build HTTP client").with_source(Box::new(e)))?;
        Ok(self.client.get_or_init(|| client))
    }

    fn fetch(&self, url: &Url) -> CliResult<ChunkSource> {
        log::debug!("Fetching {url} (timeout {:?})", self.timeout);

        let response = self.client()?.get(url.clone()).send().map_err(|e| {
            CliError::network(&format!("Could not fetch '{url}'"))
                .with_context("url", url.as_str())
                .with_suggestion("Check the URL and your network connection")
                .with_suggestion("Pass -s to hash the URL text itself")
                .with_source(Box::new(e))
        })?;

        let status = response.status();
        if !status.is_success() {
            // Non-success bodies are still hashed
            eprintln!("Response returned {}. :(", status.as_u16());
        }

        let size_hint = response.content_length();
        log::debug!("{url} answered {status}, content length {size_hint:?}");
        Ok(ChunkSource::from_reader(response, size_hint, self.chunk_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_classify_urls() {
        assert!(matches!(
            InputKind::classify("https://example.com/file.bin", false),
            InputKind::Url(_)
        ));
        assert!(matches!(
            InputKind::classify("http://localhost:8080", false),
            InputKind::Url(_)
        ));
        assert_eq!(
            InputKind::classify("ftp://example.com/file", false),
            InputKind::String("ftp://example.com/file".to_string())
        );
        assert_eq!(
            InputKind::classify("https://example.com", true),
            InputKind::String("https://example.com".to_string())
        );
    }

    #[test]
    fn test_classify_paths() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("data.bin");
        fs::write(&file, b"hashme").unwrap();
        let file_arg = file.to_str().unwrap();
        let dir_arg = dir.path().to_str().unwrap();

        assert_eq!(InputKind::classify(file_arg, false), InputKind::File(file.clone()));
        assert_eq!(
            InputKind::classify(dir_arg, false),
            InputKind::Directory(dir.path().to_path_buf())
        );
        assert_eq!(
            InputKind::classify(file_arg, true),
            InputKind::String(file_arg.to_string())
        );
    }

    #[test]
    fn test_missing_path_is_a_string() {
        assert_eq!(
            InputKind::classify("no/such/file.txt", false),
            InputKind::String("no/such/file.txt".to_string())
        );
    }

    #[test]
    fn test_headers() {
        colored::control::set_override(false);
        assert_eq!(
            InputKind::String("hashme".to_string()).header(),
            "Hashing string hashme.."
        );
        assert_eq!(InputKind::Stdin.header(), "Hashing standard input..");
        assert_eq!(
            InputKind::File(PathBuf::from("LICENSE")).header(),
            "Hashing file LICENSE.."
        );
        assert_eq!(
            InputKind::Directory(PathBuf::from("src")).header(),
            "Skipping directory 'src'.."
        );
        let url = Url::parse("https://example.com/x").unwrap();
        assert_eq!(
            InputKind::Url(url).header(),
            "Hashing content of URL https://example.com/x.."
        );
    }

    #[test]
    fn test_open_file_uses_metadata_size() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("data.bin");
        fs::write(&file, vec![7u8; 100]).unwrap();

        let acquirer = Acquirer::new(16, Duration::from_secs(1));
        let source = acquirer.open(&InputKind::File(file)).unwrap();
        assert_eq!(source.size_hint(), Some(100));
        assert_eq!(source.into_chunks().count(), 7);
    }

    #[test]
    fn test_open_missing_file_is_filesystem_error() {
        let acquirer = Acquirer::new(16, Duration::from_secs(1));
        let err = acquirer
            .open(&InputKind::File(PathBuf::from("/definitely/not/here")))
            .unwrap_err();
        assert_eq!(err.exit_code(), crate::error::ExitCode::FilesystemError);
    }

    #[test]
    fn test_unreachable_url_is_network_error() {
        let acquirer = Acquirer::new(16, Duration::from_secs(2));
        let url = Url::parse("http://127.0.0.1:1/").unwrap();
        let err = acquirer.open(&InputKind::Url(url)).unwrap_err();

        assert_eq!(err.exit_code(), crate::error::ExitCode::NetworkError);
        assert!(err.suggestions.iter().any(|s| s.contains("-s")));
    }

    #[test]
    fn test_string_source_is_sized() {
        let acquirer = Acquirer::new(16, Duration::from_secs(1));
        let source = acquirer
            .open(&InputKind::String("hashme".to_string()))
            .unwrap();
        assert_eq!(source.size_hint(), Some(6));
    }
}
