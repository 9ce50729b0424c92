//! Deskcalc - A desk calculator for the terminal

mod error;
mod logging;
#[cfg(feature = "tui")]
mod tui;

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use tracing::debug;

use deskcalc_core::{Session, Settings};
use deskcalc_engine::engine::{
    MAX_SUPPORTED_DIGITS, ascii_rows, layout_cells, parse_key_sequence, render,
};

use crate::error::CliError;
use crate::logging::LogTarget;

fn print_usage() {
    eprintln!("Usage: deskcalc [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -k, --keys <SEQ>          Press keys non-interactively and print the display");
    eprintln!("      --segments            With --keys, draw the seven-segment display");
    eprintln!("      --max-digits <N>      Digit positions on the display (1-{MAX_SUPPORTED_DIGITS})");
    eprintln!("      --config <FILE>       Read settings from FILE");
    eprintln!("      --no-config           Ignore the settings file and never write it");
    eprintln!("      --log <FILE>          Append log output to FILE");
    eprintln!("  -h, --help                Print help");
    eprintln!();
    eprintln!("Key sequences use button labels, e.g. \"12+3= M+ GT\" or \"2 SQRT\".");
    eprintln!("Log verbosity is read from ${}.", logging::LOG_ENV);
}

#[derive(Debug, Default, PartialEq)]
struct Options {
    keys: Option<String>,
    segments: bool,
    max_digits: Option<usize>,
    config: Option<PathBuf>,
    no_config: bool,
    log_file: Option<PathBuf>,
}

#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Run(Options),
}

fn take_value<'a>(
    flag: &str,
    args: &mut impl Iterator<Item = &'a String>,
) -> error::Result<&'a String> {
    args.next().ok_or_else(|| CliError::MissingValue {
        flag: flag.to_string(),
    })
}

fn parse_args(args: &[String]) -> error::Result<Command> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-k" | "--keys" => {
                options.keys = Some(take_value(arg, &mut iter)?.clone());
            }
            "--segments" => options.segments = true,
            "--max-digits" => {
                let value = take_value(arg, &mut iter)?;
                let digits = value
                    .parse::<usize>()
                    .ok()
                    .filter(|n| (1..=MAX_SUPPORTED_DIGITS).contains(n))
                    .ok_or_else(|| CliError::InvalidValue {
                        flag: arg.clone(),
                        value: value.clone(),
                    })?;
                options.max_digits = Some(digits);
            }
            "--config" => {
                options.config = Some(PathBuf::from(take_value(arg, &mut iter)?));
            }
            "--no-config" => options.no_config = true,
            "--log" => {
                options.log_file = Some(PathBuf::from(take_value(arg, &mut iter)?));
            }
            other if other.starts_with('-') && other.len() > 1 => {
                return Err(CliError::UnknownOption(other.to_string()));
            }
            other => return Err(CliError::UnexpectedArgument(other.to_string())),
        }
    }

    if options.no_config && options.config.is_some() {
        return Err(CliError::ConflictingConfig);
    }
    Ok(Command::Run(options))
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let options = match parse_args(&args) {
        Ok(Command::Help) => {
            print_usage();
            return;
        }
        Ok(Command::Run(options)) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    match run(options) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(options: Options) -> anyhow::Result<i32> {
    let target = match (&options.keys, &options.log_file) {
        (_, Some(path)) => LogTarget::File(path),
        (Some(_), None) => LogTarget::Stderr,
        (None, None) => LogTarget::Discard,
    };
    logging::init(target)?;

    let settings = load_settings(&options)?;
    let settings_path = if options.no_config {
        None
    } else {
        options.config.clone().or_else(Settings::default_path)
    };
    debug!(?settings, "starting");

    let session = Session::new(settings);

    match options.keys.as_deref() {
        Some(script) => run_keys(session, script, options.segments),
        None => run_interactive(session, settings_path),
    }
}

fn load_settings(options: &Options) -> anyhow::Result<Settings> {
    let mut settings = if options.no_config {
        Settings::default()
    } else {
        let (settings, warnings) = Settings::load_or_default(options.config.as_deref());
        for warning in warnings {
            eprintln!("Warning: {}", warning);
        }
        settings
    };

    if let Some(digits) = options.max_digits {
        settings.max_digits = digits;
    }
    settings.validated().context("invalid settings")
}

/// Apply a key script and print the final display. Exit code 1 means the
/// calculator ended in the error state.
fn run_keys(mut session: Session, script: &str, segments: bool) -> anyhow::Result<i32> {
    let keys = parse_key_sequence(script).context("invalid key sequence")?;
    let snapshot = session.press_all(&keys);

    if segments {
        let cells = layout_cells(&snapshot.entry, session.settings().max_digits);
        for row in ascii_rows(&render(&cells)) {
            println!("{}", row.trim_end());
        }
    } else {
        println!("{}", session.display_text());
    }

    Ok(if snapshot.is_error { 1 } else { 0 })
}

#[cfg(feature = "tui")]
fn run_interactive(session: Session, settings_path: Option<PathBuf>) -> anyhow::Result<i32> {
    let mut app = tui::App::new(session, settings_path);
    tui::run(&mut app).context("terminal UI failed")?;
    Ok(0)
}

#[cfg(not(feature = "tui"))]
fn run_interactive(_session: Session, _settings_path: Option<PathBuf>) -> anyhow::Result<i32> {
    anyhow::bail!("built without the `tui` feature; use --keys <SEQ>")
}
