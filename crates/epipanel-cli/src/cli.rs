//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use epipanel_ingest::SourceLocation;

#[derive(Parser)]
#[command(
    name = "epipanel",
    version,
    about = "Build a per-country daily COVID-19 panel",
    long_about = "Reconcile cumulative case, death and recovery time series with a \
                  per-country vaccination table.\n\n\
                  Writes panel.csv, latest.csv and diagnostics.json."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load the sources and build the panel.
    Build(BuildArgs),

    /// Print the effective country alias table.
    Aliases(AliasesArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Cumulative cases table (path or URL; default: upstream JHU CSSE).
    #[arg(long, value_name = "SRC")]
    pub cases: Option<SourceLocation>,

    /// Cumulative deaths table (path or URL; default: upstream JHU CSSE).
    #[arg(long, value_name = "SRC")]
    pub deaths: Option<SourceLocation>,

    /// Cumulative recoveries table (path or URL; default: upstream JHU CSSE).
    #[arg(long, value_name = "SRC")]
    pub recovered: Option<SourceLocation>,

    /// Vaccination and population table (path or URL; default: upstream OWID).
    #[arg(long, value_name = "SRC")]
    pub vaccinations: Option<SourceLocation>,

    /// Countries to include, comma separated, in output order.
    #[arg(long, value_name = "A,B,...", value_delimiter = ',')]
    pub countries: Vec<String>,

    /// TOML config with countries, default countries and aliases.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output directory for generated files.
    #[arg(long = "output-dir", value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Build and summarize without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct AliasesArgs {
    /// TOML config whose `[aliases]` extend the built-in table.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
