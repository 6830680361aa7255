//! Omnihash command-line front end
//!
//! Classifies each argument as a URL, file or string, streams it through the
//! [`omnihash_core`] engine and prints the digests as text or JSON.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;
pub mod terminal;
