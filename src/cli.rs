//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::PathBuf;

/// Stamp local asset references in an HTML file with content-hash
/// cache-busting tokens (and optional subresource integrity).
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// HTML file whose asset references get stamped
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub html_file: PathBuf,

    /// Write the result back to the file instead of printing to stdout
    #[arg(short, long)]
    pub write: bool,

    /// Add integrity/crossorigin attributes to local script references
    #[arg(short, long)]
    pub integrity: bool,

    /// TOML file with custom [[tags]] rules (replaces the defaults)
    #[arg(short = 'C', long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,
}
