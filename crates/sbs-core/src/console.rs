//! Verbosity-gated console output
//!
//! A [`Console`] prints formatted values to any [`core::fmt::Write`] sink
//! (a serial port through [`crate::serial::SerialWriter`], stdout on the
//! native host, a [`Text`] in tests).
//!
//! # Message classes
//!
//! | Method      | Printed at          | Line tag   |
//! |-------------|---------------------|------------|
//! | `logger`    | any level but Mute  | none       |
//! | `error`     | Error and above     | `ERROR `   |
//! | `warning`   | Warning and above   | `WARNING ` |
//! | `debug`     | Debug               | `DEBUG `   |
//!
//! A tag is printed in front of the first fragment of its class on a line, and
//! again whenever a fragment of another tagged class follows. The `*_ln` variants end the line and re-arm the tag. A
//! fragment below the active verbosity prints nothing at all.
//!
//! Sink errors are dropped: logging never fails the caller.

use core::cell::Cell;
use core::fmt::Write;

use critical_section::Mutex;
use log::debug;

use crate::error::SbsError;
use crate::fmt::{FloatMode, FloatValue, IntBase, IntegerValue, Precision, write_float, write_int};
use crate::text::Text;

/// Default digit count when logging a float without an explicit one.
pub const DEFAULT_FLOAT_DIGITS: u8 = 2;

/// Console output level, from silent to chattiest
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, serde::Serialize, serde::Deserialize,
)]
pub enum Verbosity {
    /// Print nothing
    Mute,
    /// Plain logs and errors
    #[default]
    Error,
    /// Plain logs, errors and warnings
    Warning,
    /// Everything
    Debug,
}

impl TryFrom<i32> for Verbosity {
    type Error = SbsError;

    fn try_from(raw: i32) -> Result<Self, SbsError> {
        match raw {
            0 => Ok(Self::Mute),
            1 => Ok(Self::Error),
            2 => Ok(Self::Warning),
            3 => Ok(Self::Debug),
            _ => Err(SbsError::UnsupportedVerbosity(raw)),
        }
    }
}

impl From<Verbosity> for i32 {
    fn from(verbosity: Verbosity) -> Self {
        verbosity as i32
    }
}

// ---------------------------------------------------------------------------
// Process-wide default
// ---------------------------------------------------------------------------

static VERBOSITY: Mutex<Cell<Verbosity>> = Mutex::new(Cell::new(Verbosity::Error));

/// Set the verbosity picked up by consoles created with [`Console::new`].
pub fn set_verbosity(verbosity: Verbosity) {
    critical_section::with(|cs| VERBOSITY.borrow(cs).set(verbosity));
    debug!("Console verbosity set to {:?}", verbosity);
}

/// Current process-wide verbosity.
pub fn verbosity() -> Verbosity {
    critical_section::with(|cs| VERBOSITY.borrow(cs).get())
}

// ---------------------------------------------------------------------------
// Loggable values
// ---------------------------------------------------------------------------

/// A value the console knows how to print.
pub trait Loggable {
    fn write_to<W: Write>(&self, out: &mut W) -> core::fmt::Result;
}

impl<L: Loggable + ?Sized> Loggable for &L {
    fn write_to<W: Write>(&self, out: &mut W) -> core::fmt::Result {
        (**self).write_to(out)
    }
}

impl Loggable for str {
    fn write_to<W: Write>(&self, out: &mut W) -> core::fmt::Result {
        out.write_str(self)
    }
}

impl Loggable for Text {
    fn write_to<W: Write>(&self, out: &mut W) -> core::fmt::Result {
        out.write_str(self.as_str())
    }
}

macro_rules! impl_loggable_int {
    ($($ty:ty),*) => {$(
        impl Loggable for $ty {
            fn write_to<W: Write>(&self, out: &mut W) -> core::fmt::Result {
                write_int(out, *self, IntBase::Auto)
            }
        }
    )*};
}

impl_loggable_int!(u8, u16, u32, u64, i8, i16, i32, i64);

/// An integer with an explicit base.
impl<I: IntegerValue> Loggable for (I, IntBase) {
    fn write_to<W: Write>(&self, out: &mut W) -> core::fmt::Result {
        write_int(out, self.0, self.1)
    }
}

macro_rules! impl_loggable_float {
    ($($ty:ty),*) => {$(
        impl Loggable for $ty {
            fn write_to<W: Write>(&self, out: &mut W) -> core::fmt::Result {
                (*self, DEFAULT_FLOAT_DIGITS).write_to(out)
            }
        }
    )*};
}

impl_loggable_float!(f32, f64);

/// A float printed in decimal notation with an explicit digit count.
impl<T: FloatValue> Loggable for (T, u8) {
    fn write_to<W: Write>(&self, out: &mut W) -> core::fmt::Result {
        write_float(out, self.0, FloatMode::Decimal, Precision::Digits(self.1))
    }
}

// ---------------------------------------------------------------------------
// Console
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Log,
    Error,
    Warning,
    Debug,
}

impl Class {
    /// Lowest verbosity at which this class prints.
    const fn threshold(self) -> Verbosity {
        match self {
            Self::Log | Self::Error => Verbosity::Error,
            Self::Warning => Verbosity::Warning,
            Self::Debug => Verbosity::Debug,
        }
    }

    const fn tag(self) -> Option<&'static str> {
        match self {
            Self::Log => None,
            Self::Error => Some("ERROR "),
            Self::Warning => Some("WARNING "),
            Self::Debug => Some("DEBUG "),
        }
    }
}

/// Verbosity-gated printer over a text sink
pub struct Console<W: Write> {
    sink: W,
    verbosity: Verbosity,
    /// Class whose tag already opened the current line
    line_tag: Option<Class>,
}

impl<W: Write> Console<W> {
    /// Console using the process-wide verbosity at creation time.
    pub fn new(sink: W) -> Self {
        Self::with_verbosity(sink, verbosity())
    }

    pub fn with_verbosity(sink: W, verbosity: Verbosity) -> Self {
        Self {
            sink,
            verbosity,
            line_tag: None,
        }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: Verbosity) {
        self.verbosity = verbosity;
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Untagged output.
    pub fn logger<L: Loggable>(&mut self, value: L) {
        self.emit(Class::Log, &value, false);
    }

    pub fn logger_ln<L: Loggable>(&mut self, value: L) {
        self.emit(Class::Log, &value, true);
    }

    pub fn error<L: Loggable>(&mut self, value: L) {
        self.emit(Class::Error, &value, false);
    }

    pub fn error_ln<L: Loggable>(&mut self, value: L) {
        self.emit(Class::Error, &value, true);
    }

    pub fn warning<L: Loggable>(&mut self, value: L) {
        self.emit(Class::Warning, &value, false);
    }

    pub fn warning_ln<L: Loggable>(&mut self, value: L) {
        self.emit(Class::Warning, &value, true);
    }

    pub fn debug<L: Loggable>(&mut self, value: L) {
        self.emit(Class::Debug, &value, false);
    }

    pub fn debug_ln<L: Loggable>(&mut self, value: L) {
        self.emit(Class::Debug, &value, true);
    }

    fn emit<L: Loggable>(&mut self, class: Class, value: &L, end_line: bool) {
        if self.verbosity < class.threshold() {
            return;
        }
        if let Some(tag) = class.tag()
            && self.line_tag != Some(class)
        {
            let _ = self.sink.write_str(tag);
            self.line_tag = Some(class);
        }
        let _ = value.write_to(&mut self.sink);
        if end_line {
            let _ = self.sink.write_char('\n');
            self.line_tag = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn console(verbosity: Verbosity) -> Console<Text> {
        Console::with_verbosity(Text::new(), verbosity)
    }

    #[test]
    fn test_mute_prints_nothing() {
        let mut out = console(Verbosity::Mute);
        out.logger("toto");
        out.logger(Text::from("toto"));
        out.logger(1u8);
        out.logger(1i64);
        out.logger(1.0f64);
        out.error_ln("foo");
        out.debug("foo");
        assert!(out.sink().is_empty(), "Mute must not print: {:?}", out.sink());
    }

    #[test]
    fn test_logger_integers_in_every_base() {
        let mut out = console(Verbosity::Error);
        out.logger("toto");
        out.logger(&Text::from("toto"));
        out.logger(" ");
        out.logger(1u8);
        out.logger((1u8, IntBase::Binary));
        out.logger((1u8, IntBase::Hexadecimal));
        out.logger(" ");
        out.logger(1i16);
        out.logger((1i16, IntBase::Binary));
        out.logger((1i16, IntBase::Hexadecimal));
        out.logger(" ");
        out.logger(1u32);
        out.logger((1u32, IntBase::Hexadecimal));
        out.logger(" ");
        out.logger(1.0f64);
        assert_eq!(
            out.into_inner(),
            "totototo 10000000101 100000000000000010001 100000001 1.00"
        );
    }

    #[test]
    fn test_float_logging() {
        let mut out = console(Verbosity::Error);
        out.logger(-1.0f64);
        out.logger(-1e35f64);
        out.logger(1e35f64);
        out.logger((10.0f64, 0u8));
        out.logger(f64::NAN);
        out.logger(f64::INFINITY);
        out.logger(2.5f32);
        assert_eq!(out.into_inner(), "-1.00ovfovf10naninf2.50");
    }

    #[test]
    fn test_error_levels() {
        for (verbosity, expected) in [
            (Verbosity::Mute, ""),
            (Verbosity::Error, "ERROR foo\n"),
            (Verbosity::Warning, "ERROR foo\n"),
            (Verbosity::Debug, "ERROR foo\n"),
        ] {
            let mut out = console(verbosity);
            out.error_ln("foo");
            assert_eq!(out.into_inner(), expected, "at {:?}", verbosity);
        }
    }

    #[test]
    fn test_warning_and_debug_levels() {
        let mut out = console(Verbosity::Error);
        out.warning_ln("foo");
        out.debug_ln("foo");
        assert!(out.sink().is_empty());

        let mut out = console(Verbosity::Warning);
        out.warning_ln("foo");
        out.debug_ln("foo");
        assert_eq!(out.into_inner(), "WARNING foo\n");

        let mut out = console(Verbosity::Debug);
        out.warning_ln("foo");
        out.debug_ln("foo");
        assert_eq!(out.into_inner(), "WARNING foo\nDEBUG foo\n");
    }

    #[test]
    fn test_tag_once_per_line() {
        let mut out = console(Verbosity::Debug);
        out.error("value ");
        out.error(12u8);
        out.error_ln(" out of range");
        out.debug("raw ");
        out.debug_ln((12u8, IntBase::Hexadecimal));
        assert_eq!(
            out.into_inner(),
            "ERROR value 12 out of range\nDEBUG raw 0c\n"
        );
    }

    #[test]
    fn test_suppressed_fragment_keeps_tag_armed() {
        let mut out = console(Verbosity::Error);
        out.debug("hidden");
        out.error_ln("shown");
        assert_eq!(out.into_inner(), "ERROR shown\n");
    }

    #[test]
    fn test_class_change_on_a_line_adds_its_tag() {
        let mut out = console(Verbosity::Debug);
        out.error("a ");
        out.warning("b ");
        out.error_ln("c");
        assert_eq!(out.into_inner(), "ERROR a WARNING b ERROR c\n");
    }

    #[test]
    fn test_plain_fragments_are_never_tagged() {
        let mut out = console(Verbosity::Debug);
        out.logger("a ");
        out.warning("b ");
        out.logger_ln("c");
        assert_eq!(out.into_inner(), "a WARNING b c\n");
    }

    #[test]
    fn test_verbosity_raw_conversion() {
        for raw in 0..=3 {
            let verbosity = Verbosity::try_from(raw).unwrap();
            assert_eq!(i32::from(verbosity), raw);
        }
        assert_eq!(
            Verbosity::try_from(4),
            Err(SbsError::UnsupportedVerbosity(4))
        );
        assert!(Verbosity::Mute < Verbosity::Error);
        assert!(Verbosity::Warning < Verbosity::Debug);
    }

    #[test]
    fn test_global_verbosity_is_captured_at_creation() {
        // Only test touching the process-wide value.
        assert_eq!(verbosity(), Verbosity::Error, "default is Error");
        set_verbosity(Verbosity::Debug);
        let mut out = Console::new(Text::new());
        set_verbosity(Verbosity::Mute);
        out.debug_ln("kept");
        assert_eq!(out.verbosity(), Verbosity::Debug);
        assert_eq!(out.into_inner(), "DEBUG kept\n");
        set_verbosity(Verbosity::Error);
    }
}
