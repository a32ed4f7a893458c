// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::process;

use subsync::app_config::{Config, LogLevel};
use subsync::app_controller::{Controller, SyncRequest};
use subsync::timecode;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// subsync - re-time SubRip subtitles between two known-correct cues
///
/// Moves the first subtitle to the time given with -f and the last subtitle to
/// the time given with -l; every subtitle in between is shifted and stretched
/// along the same line.
#[derive(Parser, Debug)]
#[command(name = "subsync")]
#[command(version)]
#[command(about = "Synchronize SubRip subtitles by their first and last cue")]
#[command(arg_required_else_help = true)]
#[command(after_help = "Example:
  subsync -f 00:01:33,492 -l 01:39:23,561 -i file.srt")]
struct CommandLineOptions {
    /// Time of the first subtitle (HH:MM:SS,mmm)
    #[arg(short = 'f', long = "first-sub", value_name = "TIME", value_parser = parse_time_arg)]
    first_sub: Option<u64>,

    /// Time of the last subtitle (HH:MM:SS,mmm)
    #[arg(short = 'l', long = "last-sub", value_name = "TIME", value_parser = parse_time_arg)]
    last_sub: Option<u64>,

    /// Input file, '-' for standard input
    #[arg(short, long, value_name = "PATH", required_unless_present = "completions")]
    input: Option<PathBuf>,

    /// Output file (if not specified, it overwrites the input file)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL", exclusive = true)]
    completions: Option<Shell>,
}

fn parse_time_arg(value: &str) -> Result<u64, String> {
    timecode::parse_time(value).map_err(|e| e.to_string())
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
    colored: bool,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger {
            level: LevelFilter::Trace,
            colored: std::io::stderr().is_terminal(),
        });
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Tag and ANSI color for level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("error", "1;31"),
            Level::Warn => ("warn ", "1;33"),
            Level::Info => ("info ", "1;32"),
            Level::Debug => ("debug", "1;36"),
            Level::Trace => ("trace", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (tag, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = if self.colored {
                writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, tag, record.args())
            } else {
                writeln!(stderr, "{} {} {}", now, tag, record.args())
            };
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() {
    let cli = match CommandLineOptions::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            process::exit(code);
        }
    };

    if let Some(shell) = cli.completions {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "subsync", &mut std::io::stdout());
        return;
    }

    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
        process::exit(1);
    }

    if let Err(err) = run(cli) {
        error!("{:#}", err);
        log::logger().flush();
        process::exit(1);
    }
}

fn run(options: CommandLineOptions) -> Result<()> {
    let config = Config::load_or_default(options.config.as_ref())
        .context("Configuration loading failed")?;

    // Command line wins over the config file
    let log_level = options
        .log_level
        .map(LogLevel::from)
        .unwrap_or(config.log_level);
    log::set_max_level(log_level.to_level_filter());

    let input = options
        .input
        .context("You must specify an input file with -i option")?;

    let request = SyncRequest {
        input,
        output: options.output,
        first_ms: options.first_sub,
        last_ms: options.last_sub,
    };

    let controller = Controller::with_config(config);
    controller.run(&request)?;

    Ok(())
}
