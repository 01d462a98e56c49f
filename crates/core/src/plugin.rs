//! Plugin categories and the records produced for each inspected file.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Role of a plugin module, decided by its file extension alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginCategory {
    Unknown,
    Filter,
    Input,
    Output,
    Color,
    Language,
}

/// Accessor export names for a table-based category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExportNames {
    /// Export returning a single record pointer.
    pub table: &'static str,
    /// Export returning a null-terminated array of record pointers.
    pub table_list: &'static str,
}

const FILTER_EXPORTS: ExportNames =
    ExportNames { table: "GetFilterTable", table_list: "GetFilterTableList" };
const INPUT_EXPORTS: ExportNames =
    ExportNames { table: "GetInputPluginTable", table_list: "GetInputPluginTableList" };
const OUTPUT_EXPORTS: ExportNames =
    ExportNames { table: "GetOutputPluginTable", table_list: "GetOutputPluginTableList" };
const COLOR_EXPORTS: ExportNames =
    ExportNames { table: "GetColorPluginTable", table_list: "GetColorPluginTableList" };

impl PluginCategory {
    /// Classify by extension (without the dot). Matching is exact and
    /// case-sensitive: `AUF` is not a filter.
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "auf" => Self::Filter,
            "aui" => Self::Input,
            "auo" => Self::Output,
            "auc" => Self::Color,
            "aul" => Self::Language,
            _ => Self::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension().and_then(|e| e.to_str()).map_or(Self::Unknown, Self::from_extension)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Filter => "filter",
            Self::Input => "input",
            Self::Output => "output",
            Self::Color => "color",
            Self::Language => "language",
        }
    }

    /// Human-readable label, e.g. "filter plugin".
    pub fn description(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Filter => "filter plugin",
            Self::Input => "input plugin",
            Self::Output => "output plugin",
            Self::Color => "color plugin",
            Self::Language => "language plugin",
        }
    }

    /// Accessor exports for table-based categories; `None` for language
    /// and unknown files.
    pub fn export_names(&self) -> Option<ExportNames> {
        match self {
            Self::Filter => Some(FILTER_EXPORTS),
            Self::Input => Some(INPUT_EXPORTS),
            Self::Output => Some(OUTPUT_EXPORTS),
            Self::Color => Some(COLOR_EXPORTS),
            Self::Language | Self::Unknown => None,
        }
    }
}

impl fmt::Display for PluginCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decoded name/description pair declared by a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataEntry {
    pub name: String,
    pub info: String,
}

/// Stage of introspection a diagnostic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Load,
    Walk,
    Decode,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Walk => "walk",
            Self::Decode => "decode",
        }
    }
}

/// A non-fatal problem recorded against a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub stage: Stage,
    pub message: String,
}

impl Diagnostic {
    pub fn new(stage: Stage, message: impl Into<String>) -> Self {
        Self { stage, message: message.into() }
    }
}

/// Everything learned about one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginRecord {
    pub path: PathBuf,
    pub filename: String,
    /// SHA-256 of the file bytes, 64 lowercase hex characters.
    pub content_hash: String,
    pub category: PluginCategory,
    /// Entries in the order the module returned them.
    pub entries: Vec<MetadataEntry>,
    /// Load, walk and decode problems; empty on a clean run.
    pub diagnostics: Vec<Diagnostic>,
}

impl PluginRecord {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
