//! Epidemiological panel builder CLI.

use clap::{ColorChoice, Parser};
use epipanel_cli::commands::{run_aliases, run_build};
use epipanel_cli::logging::{LogConfig, LogFormat, init_logging};
use epipanel_cli::types::BuildRequest;
use epipanel_ingest::SourceSet;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{BuildArgs, Cli, Command, LogFormatArg, LogLevelArg};
use crate::summary::{print_aliases, print_build_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Build(args) => match run_build(&build_request(args)) {
            Ok(result) => {
                print_build_summary(&result);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Aliases(args) => match run_aliases(args.config.as_deref()) {
            Ok(aliases) => {
                print_aliases(&aliases);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

/// Source flags override the upstream defaults one by one.
fn build_request(args: BuildArgs) -> BuildRequest {
    let defaults = SourceSet::default();
    BuildRequest {
        sources: SourceSet {
            cases: args.cases.unwrap_or(defaults.cases),
            deaths: args.deaths.unwrap_or(defaults.deaths),
            recovered: args.recovered.unwrap_or(defaults.recovered),
            vaccinations: args.vaccinations.unwrap_or(defaults.vaccinations),
        },
        countries: args.countries,
        config: args.config,
        output_dir: args.output_dir,
        dry_run: args.dry_run,
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
///
/// `--log-level` beats `-v/-q`; either one disables `RUST_LOG`. Log files get
/// timestamps and no colors.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig::default()
        .with_level(level_filter)
        .with_env_filter(!(cli.verbosity.is_present() || cli.log_level.is_some()))
        .with_format(format)
        .with_ansi(with_ansi)
        .with_timestamps(cli.log_file.is_some())
        .with_log_file(cli.log_file.clone())
}
