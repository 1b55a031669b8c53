//! Native desktop host for the sbs formatting engine.
//!
//! Formats single values from the command line or runs the command echo loop
//! over stdin, printing through the same verbosity-gated console the board
//! builds use.
//!
//! ```text
//! sbs-native int -27 --width 8 --signed --base hex     # e5
//! sbs-native float 0.000002659 --mode sci --precision 2 # 2.66e-06
//! printf 'int 16 186 oct\n' | sbs-native echo           # 000272
//! ```

mod args;
mod echo;
mod error;
mod sink;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, info};

use sbs_core::config::FormatConfig;
use sbs_core::console::{self, Console, Verbosity};
use sbs_core::fmt::format_float_raw;

use crate::args::{IntArg, parse_base, parse_mode, parse_precision, parse_verbosity, parse_width};
use crate::error::CliError;
use crate::sink::IoSink;

#[derive(Debug, Parser)]
#[command(name = "sbs-native")]
#[command(about = "Format numbers with the sbs toolkit engine")]
struct Cli {
    /// JSON file with formatting defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Console verbosity: mute, error, warning, debug or 0..=3
    #[arg(long, global = true, value_parser = parse_verbosity)]
    verbosity: Option<Verbosity>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Format one integer.
    Int {
        /// Value, parsed at the selected width
        #[arg(allow_negative_numbers = true)]
        value: String,
        /// Width in bits: 8, 16, 32 or 64
        #[arg(long, default_value = "32", value_parser = parse_width)]
        width: u32,
        /// Parse the value as a signed integer
        #[arg(long)]
        signed: bool,
        /// auto, bin, oct, dec, hex or a raw base number
        #[arg(long, value_parser = parse_base)]
        base: Option<i32>,
    },
    /// Format one float.
    Float {
        #[arg(allow_negative_numbers = true)]
        value: f64,
        /// Use 32-bit arithmetic
        #[arg(long)]
        single: bool,
        /// auto, dec, sci or a raw mode number
        #[arg(long, value_parser = parse_mode)]
        mode: Option<i32>,
        /// Digit count or "auto"
        #[arg(long, value_parser = parse_precision)]
        precision: Option<u8>,
    },
    /// Execute commands read line by line from stdin.
    Echo,
}

fn load_config(path: Option<&Path>) -> Result<FormatConfig, CliError> {
    let Some(path) = path else {
        return Ok(FormatConfig::default());
    };
    let body = fs::read_to_string(path)?;
    let config = serde_json::from_str(&body)?;
    info!("Loaded format config from {}", path.display());
    Ok(config)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;
    console::set_verbosity(cli.verbosity.unwrap_or(config.verbosity));

    let mut out = Console::new(IoSink::new(io::stdout().lock()));
    match cli.command {
        Command::Int {
            value,
            width,
            signed,
            base,
        } => {
            let value = IntArg::parse(width, signed, &value)?;
            let base = base.unwrap_or(i32::from(config.int_base));
            info!("Formatting {:?} with base {}", value, base);
            out.logger_ln(value.format(base));
        }
        Command::Float {
            value,
            single,
            mode,
            precision,
        } => {
            let mode = mode.unwrap_or(i32::from(config.float_mode));
            let precision = precision.unwrap_or(config.precision);
            info!(
                "Formatting {} ({}) with mode {} precision {}",
                value,
                if single { "f32" } else { "f64" },
                mode,
                precision
            );
            let text = if single {
                format_float_raw(value as f32, mode, precision)
            } else {
                format_float_raw(value, mode, precision)
            };
            out.logger_ln(text);
        }
        Command::Echo => {
            let stdin = io::stdin();
            let executed = echo::run_echo(stdin.lock(), &mut out, &config)?;
            info!("Echo loop finished after {} commands", executed);
        }
    }
    out.into_inner().flush()?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("sbs-native: {}", err);
            ExitCode::FAILURE
        }
    }
}
