//! Line-oriented command echo loop
//!
//! Each input line is one command; its result is printed through a
//! [`Console`]:
//!
//! ```text
//! int <width> <value> [base]          width: 8|16|32|64, or u8/i8 .. u64/i64
//! float <value> [mode] [precision]
//! log|error|warning|debug <text...>
//! verbosity <level>
//! ```
//!
//! Omitted base, mode and precision fall back to the loaded [`FormatConfig`].
//! A bad line reports an `ERROR` line and the loop carries on.

use std::io::BufRead;

use core::fmt::Write;
use log::debug;

use sbs_core::Text;
use sbs_core::config::FormatConfig;
use sbs_core::console::{Console, Verbosity};
use sbs_core::fmt::format_float_raw;

use crate::args::{IntArg, parse_base, parse_mode, parse_precision, parse_verbosity};
use crate::error::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageClass {
    Log,
    Error,
    Warning,
    Debug,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EchoCommand {
    Int { value: IntArg, base: i32 },
    Float { value: f64, mode: i32, precision: u8 },
    Message { class: MessageClass, text: Text },
    Verbosity(Verbosity),
}

/// Pop the next non-empty word off `rest`.
fn next_word(rest: &mut Text) -> Option<Text> {
    while !rest.is_empty() {
        let word = rest.first_word();
        rest.remove_first_word();
        if !word.is_empty() {
            return Some(word);
        }
    }
    None
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str, defaults: &FormatConfig) -> Result<Option<EchoCommand>, CliError> {
    let mut rest = Text::from(line.trim());
    let Some(name) = next_word(&mut rest) else {
        return Ok(None);
    };

    let command = match name.as_str() {
        "int" => {
            let width = next_word(&mut rest).ok_or(CliError::MissingArgument("integer width"))?;
            let value = next_word(&mut rest).ok_or(CliError::MissingArgument("integer value"))?;
            let base = match next_word(&mut rest) {
                Some(base) => parse_base(&base)?,
                None => i32::from(defaults.int_base),
            };
            EchoCommand::Int {
                value: IntArg::parse_typed(&width, &value)?,
                base,
            }
        }
        "float" => {
            let value = next_word(&mut rest).ok_or(CliError::MissingArgument("float value"))?;
            let value = value
                .parse()
                .map_err(|_| CliError::invalid("float value", &value))?;
            let mode = match next_word(&mut rest) {
                Some(mode) => parse_mode(&mode)?,
                None => i32::from(defaults.float_mode),
            };
            let precision = match next_word(&mut rest) {
                Some(precision) => parse_precision(&precision)?,
                None => defaults.precision,
            };
            EchoCommand::Float {
                value,
                mode,
                precision,
            }
        }
        "log" => EchoCommand::Message {
            class: MessageClass::Log,
            text: rest,
        },
        "error" => EchoCommand::Message {
            class: MessageClass::Error,
            text: rest,
        },
        "warning" => EchoCommand::Message {
            class: MessageClass::Warning,
            text: rest,
        },
        "debug" => EchoCommand::Message {
            class: MessageClass::Debug,
            text: rest,
        },
        "verbosity" => {
            let level = next_word(&mut rest).ok_or(CliError::MissingArgument("verbosity level"))?;
            EchoCommand::Verbosity(parse_verbosity(&level)?)
        }
        other => return Err(CliError::UnknownCommand(other.to_owned())),
    };
    Ok(Some(command))
}

/// Print the result of `command`.
pub fn execute<W: Write>(console: &mut Console<W>, command: EchoCommand) {
    match command {
        EchoCommand::Int { value, base } => console.logger_ln(value.format(base)),
        EchoCommand::Float {
            value,
            mode,
            precision,
        } => console.logger_ln(format_float_raw(value, mode, precision)),
        EchoCommand::Message { class, text } => match class {
            MessageClass::Log => console.logger_ln(&text),
            MessageClass::Error => console.error_ln(&text),
            MessageClass::Warning => console.warning_ln(&text),
            MessageClass::Debug => console.debug_ln(&text),
        },
        EchoCommand::Verbosity(verbosity) => {
            debug!("Echo verbosity -> {:?}", verbosity);
            console.set_verbosity(verbosity);
        }
    }
}

/// Run commands from `input` until EOF; returns the number of commands
/// executed.
pub fn run_echo<R: BufRead, W: Write>(
    input: R,
    console: &mut Console<W>,
    defaults: &FormatConfig,
) -> Result<usize, CliError> {
    let mut executed = 0;
    for line in input.lines() {
        let line = line?;
        match parse_command(&line, defaults) {
            Ok(Some(command)) => {
                execute(console, command);
                executed += 1;
            }
            Ok(None) => {}
            Err(err) => {
                debug!("Rejected echo line {:?}: {}", line, err);
                console.error_ln(err.to_string().as_str());
            }
        }
    }
    Ok(executed)
}
