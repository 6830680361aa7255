mod formatters;

pub use formatters::{JsonFormatter, NAME_COLUMN_WIDTH, TextFormatter};

pub use crate::config::OutputFormat;
use anyhow::Result;
use omnihash_core::ItemReport;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format one item's digests
    fn format_single(&self, report: &ItemReport) -> Result<String>;

    /// Format every item's digests at once
    fn format_batch(&self, reports: &[ItemReport]) -> Result<String> {
        let formatted: Result<Vec<String>> =
            reports.iter().map(|r| self.format_single(r)).collect();

        Ok(formatted?.concat())
    }

    /// Whether items are printed as they finish rather than all at the end
    fn is_streaming(&self) -> bool {
        true
    }
}

/// Create a formatter based on output format
pub fn create_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new()),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
    }
}
