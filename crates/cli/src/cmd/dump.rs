//! Dump command implementation.

use std::path::PathBuf;

use aupdump_core::config::types::OutputFormat;
use aupdump_core::{IntrospectError, Introspector, PluginRecord};

use super::output::{print_record_jsonl, print_record_text, print_records_json};

/// How JSON output is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonStyle {
    Compact,
    /// Pretty-printed with this many spaces per level.
    Pretty(usize),
}

#[derive(Debug, Clone)]
pub struct DumpOptions {
    pub format: OutputFormat,
    pub json: JsonStyle,
}

pub fn run(files: &[PathBuf], options: &DumpOptions) {
    let introspector = Introspector::native();
    let mut collected = Vec::new();

    for path in files {
        let record = match introspector.introspect(path) {
            Ok(record) => record,
            Err(e) => {
                report_failure(&e);
                continue;
            }
        };

        report_diagnostics(&record);

        match options.format {
            OutputFormat::Text => print_record_text(&record),
            OutputFormat::Jsonl => print_record_jsonl(&record),
            OutputFormat::Json => collected.push(record),
        }
    }

    if options.format == OutputFormat::Json {
        print_records_json(&collected, options.json);
    }

    tracing::debug!(files = files.len(), "dump finished");
}

fn report_failure(err: &IntrospectError) {
    match err {
        IntrospectError::Hash { path, source } => {
            eprintln!("error: {}: hash: {}", path.display(), source);
        }
    }
}

fn report_diagnostics(record: &PluginRecord) {
    for diag in &record.diagnostics {
        eprintln!(
            "warning: {}: {}: {}",
            record.path.display(),
            diag.stage.as_str(),
            diag.message
        );
    }
}
