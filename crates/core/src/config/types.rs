use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
}

fn default_version() -> u32 {
    1
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// How records are rendered.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented human-readable blocks.
    #[default]
    Text,
    /// One JSON array holding every record.
    Json,
    /// One compact JSON object per line.
    Jsonl,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Spaces per JSON indentation level.
    #[serde(default = "default_indent")]
    pub indent: usize,
    /// Emit JSON without any pretty-printing.
    #[serde(default)]
    pub compact: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { format: OutputFormat::default(), indent: default_indent(), compact: false }
    }
}

fn default_indent() -> usize {
    2
}

/// Console behaviour on Windows.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Switch the console output code page to UTF-8 while running.
    #[serde(default = "default_utf8")]
    pub utf8: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self { utf8: default_utf8() }
    }
}

fn default_utf8() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// File the settings came from; `None` when running on defaults.
    pub source: Option<PathBuf>,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
    pub console: ConsoleConfig,
}
