//! Progress reporting for the CLI
//!
//! The engine reports through [`TerminalProvider`], which draws indicatif
//! bars on stderr via [`ProgressRenderer`].

pub mod provider;
pub mod renderer;
pub mod utils;

pub use provider::TerminalProvider;
pub use renderer::ProgressRenderer;
pub use utils::{format_bytes, format_throughput};
