//! Record rendering for the text, JSON and JSON Lines formats.

use aupdump_core::{Diagnostic, MetadataEntry, PluginCategory, PluginRecord};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use super::dump::JsonStyle;

/// Formatted record for JSON output.
#[derive(Debug, Serialize)]
pub struct RecordOutput<'a> {
    pub path: String,
    pub filename: &'a str,
    pub sha256: &'a str,
    #[serde(rename = "type")]
    pub plugin_type: PluginCategory,
    pub table: &'a [MetadataEntry],
    #[serde(skip_serializing_if = "no_errors")]
    pub errors: &'a [Diagnostic],
}

impl<'a> From<&'a PluginRecord> for RecordOutput<'a> {
    fn from(record: &'a PluginRecord) -> Self {
        Self {
            path: record.path.to_string_lossy().to_string(),
            filename: &record.filename,
            sha256: &record.content_hash,
            plugin_type: record.category,
            table: &record.entries,
            errors: &record.diagnostics,
        }
    }
}

fn no_errors(errors: &&[Diagnostic]) -> bool {
    errors.is_empty()
}

/// Print one record as an indented text block.
pub fn print_record_text(record: &PluginRecord) {
    println!("{}", render_text(record));
}

/// Print one record as a single JSON line.
pub fn print_record_jsonl(record: &PluginRecord) {
    let output = RecordOutput::from(record);
    print_json(&output, JsonStyle::Compact, &record.path.display().to_string());
}

/// Print all records as one JSON array.
pub fn print_records_json(records: &[PluginRecord], style: JsonStyle) {
    let output: Vec<RecordOutput<'_>> = records.iter().map(RecordOutput::from).collect();
    print_json(&output, style, "records");
}

fn print_json<T: Serialize>(value: &T, style: JsonStyle, what: &str) {
    match to_json(value, style) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("error: failed to serialize {what}: {e}"),
    }
}

fn render_text(record: &PluginRecord) -> String {
    let mut lines = vec![
        record.path.display().to_string(),
        format!("  Filename: {}", record.filename),
        format!("  SHA256: {}", record.content_hash),
        format!("  Type: {}", record.category.description()),
    ];

    for entry in &record.entries {
        lines.push(format!("  - Name: {}", entry.name));
        lines.push(format!("    Info: {}", entry.info));
    }

    for diag in &record.diagnostics {
        lines.push(format!("  Error ({}): {}", diag.stage.as_str(), diag.message));
    }

    lines.join("\n")
}

fn to_json<T: Serialize>(value: &T, style: JsonStyle) -> serde_json::Result<String> {
    match style {
        JsonStyle::Compact => serde_json::to_string(value),
        JsonStyle::Pretty(width) => {
            let indent = " ".repeat(width);
            let mut buf = Vec::new();
            let mut ser =
                Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
            value.serialize(&mut ser)?;
            Ok(String::from_utf8_lossy(&buf).into_owned())
        }
    }
}
