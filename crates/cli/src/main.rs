mod cmd;
mod console;
mod logging;

use aupdump_core::config::loader::ConfigLoader;
use aupdump_core::config::types::OutputFormat as ConfigFormat;
use aupdump_core::{ValidationError, validate_input};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

use cmd::dump::{DumpOptions, JsonStyle};

#[derive(Debug, Parser)]
#[command(
    name = "aupdump",
    version,
    about = "Dump the metadata and SHA-256 of AviUtl plugin modules"
)]
struct Cli {
    /// Plugin files to inspect (.auf, .aui, .auo, .auc, .aul; others are hashed only)
    #[arg(required = true, value_name = "FILES", value_parser = existing_file)]
    files: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Spaces per indentation level for JSON output
    #[arg(long, value_name = "N", conflicts_with = "compact")]
    indent: Option<usize>,

    /// Emit JSON without pretty-printing
    #[arg(long)]
    compact: bool,

    /// Path to the config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Indented human-readable blocks
    Text,
    /// One JSON array holding every record
    Json,
    /// One JSON object per line
    Jsonl,
}

impl From<OutputFormat> for ConfigFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Text => ConfigFormat::Text,
            OutputFormat::Json => ConfigFormat::Json,
            OutputFormat::Jsonl => ConfigFormat::Jsonl,
        }
    }
}

fn existing_file(s: &str) -> Result<PathBuf, ValidationError> {
    validate_input(Path::new(s))
}

fn main() {
    let cli = Cli::parse();

    let rc = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(rc) => rc,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    logging::init(&rc.logging);

    let console = rc.console.utf8.then(console::Utf8Console::enable);

    let json = if cli.compact || (cli.indent.is_none() && rc.output.compact) {
        JsonStyle::Compact
    } else {
        JsonStyle::Pretty(cli.indent.unwrap_or(rc.output.indent))
    };

    let options = DumpOptions {
        format: cli.format.map(Into::into).unwrap_or(rc.output.format),
        json,
    };

    cmd::dump::run(&cli.files, &options);

    drop(console);
    logging::flush();
}
