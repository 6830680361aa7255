use super::OutputFormatter;
use anyhow::Result;
use colored::*;
use omnihash_core::ItemReport;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::collections::BTreeMap;

/// Visible width of the `NAME:` column in text output
pub const NAME_COLUMN_WIDTH: usize = 23;

/// Key holding the item label in JSON output
const NAME_KEY: &str = "NAME";

/// Text formatter for human-readable output
///
/// Coloring follows the process-wide `colored` setting.
#[derive(Debug, Default)]
pub struct TextFormatter;

impl TextFormatter {
    pub fn new() -> Self {
        Self
    }

    /// One `  NAME:   digest` line, padded before coloring so escape codes
    /// never shift the digest column
    pub fn digest_line(algorithm: &str, digest: &str) -> String {
        let padding = NAME_COLUMN_WIDTH.saturating_sub(algorithm.chars().count() + 1);
        format!("  {}:{}{digest}\n", algorithm.green(), " ".repeat(padding))
    }
}

impl OutputFormatter for TextFormatter {
    fn format_single(&self, report: &ItemReport) -> Result<String> {
        Ok(report
            .results
            .iter()
            .map(|entry| Self::digest_line(&entry.algorithm, &entry.digest))
            .collect())
    }
}

/// JSON formatter for machine-readable output
///
/// Emits one array for the whole run, with keys sorted and a four-space
/// indent. Items without digests are left out.
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    fn item_object(report: &ItemReport) -> BTreeMap<&str, &str> {
        let mut object: BTreeMap<&str, &str> = report
            .results
            .iter()
            .map(|entry| (entry.algorithm.as_str(), entry.digest.as_str()))
            .collect();

        if let Some(label) = &report.label {
            object.insert(NAME_KEY, label);
        }
        object
    }

    fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
        let mut buffer = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
        value.serialize(&mut serializer)?;
        buffer.push(b'\n');
        Ok(String::from_utf8(buffer)?)
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_single(&self, report: &ItemReport) -> Result<String> {
        Self::to_pretty_json(&Self::item_object(report))
    }

    fn format_batch(&self, reports: &[ItemReport]) -> Result<String> {
        let objects: Vec<_> = reports
            .iter()
            .filter(|r| !r.results.is_empty())
            .map(Self::item_object)
            .collect();

        if objects.is_empty() {
            return Ok(String::new());
        }
        Self::to_pretty_json(&objects)
    }

    fn is_streaming(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omnihash_core::{Outcome, ResultSet};

    fn report(label: Option<&str>, digests: &[(&str, &str)]) -> ItemReport {
        ItemReport {
            label: label.map(str::to_string),
            results: digests
                .iter()
                .map(|(a, d)| (a.to_string(), d.to_string()))
                .collect::<ResultSet>(),
            outcome: Outcome::Complete,
            bytes_hashed: 2,
        }
    }

    #[test]
    fn test_digest_line_padding() {
        colored::control::set_override(false);
        assert_eq!(
            TextFormatter::digest_line("SHA224", "abc"),
            format!("  SHA224:{}abc\n", " ".repeat(16))
        );
        assert_eq!(
            TextFormatter::digest_line("LENGTH", "0"),
            format!("  LENGTH:{}0\n", " ".repeat(16))
        );
    }

    #[test]
    fn test_colon_is_outside_the_colored_name() {
        // Holds with or without color: nothing but padding follows the colon
        let line = TextFormatter::digest_line("SHA1", "ff");
        let (_, rest) = line.split_once(':').unwrap();
        assert_eq!(rest, format!("{}ff\n", " ".repeat(18)));
    }

    #[test]
    fn test_long_names_are_not_truncated() {
        colored::control::set_override(false);
        let name = "A".repeat(30);
        assert_eq!(
            TextFormatter::digest_line(&name, "ff"),
            format!("  {name}:ff\n")
        );
    }

    #[test]
    fn test_text_keeps_result_order() {
        colored::control::set_override(false);
        let text = TextFormatter::new()
            .format_single(&report(Some("Hi"), &[("SHA512", "b"), ("SHA224", "a")]))
            .unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert!(lines[0].starts_with("  SHA512:"));
        assert!(lines[1].starts_with("  SHA224:"));
    }

    #[test]
    fn test_json_batch_sorted_with_name() {
        let json = JsonFormatter::new()
            .format_batch(&[
                report(Some("hashme"), &[("SHA1", "fb78"), ("LENGTH", "6"), ("MD5", "9cc2")]),
                report(Some("nothing"), &[]),
                report(None, &[("LENGTH", "0")]),
            ])
            .unwrap();

        let expected = r#"[
    {
        "LENGTH": "6",
        "MD5": "9cc2",
        "NAME": "hashme",
        "SHA1": "fb78"
    },
    {
        "LENGTH": "0"
    }
]
"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_json_batch_without_results_is_empty() {
        let json = JsonFormatter::new()
            .format_batch(&[report(Some("x"), &[])])
            .unwrap();
        assert!(json.is_empty());
    }
}
