//! Fixed-capacity text buffer
//!
//! [`Text`] is the output type of the formatting engine and the string type
//! the console prints. It lives entirely on the stack: the capacity is large
//! enough for the longest formatter output (a sign, ten integral digits, a
//! point, 254 fractional digits and a widened exponent).
//!
//! Appends through [`Text::push_str`] are all-or-nothing. The concatenation
//! operators instead keep as much as fits and log a warning, so chained
//! expressions never fail.

use core::fmt;
use core::ops::{Add, AddAssign, Deref, Div, DivAssign};

use heapless::String;
use log::warn;

use crate::error::SbsError;
use crate::fmt::{FloatMode, FloatValue, IntBase, IntegerValue, Precision};

/// Text capacity in bytes
pub const TEXT_CAPACITY: usize = 288;

/// Stack-allocated, bounded UTF-8 text
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Text {
    inner: String<TEXT_CAPACITY>,
}

impl Text {
    /// Create an empty text.
    pub const fn new() -> Self {
        Self {
            inner: String::new(),
        }
    }

    /// Format an integer (see [`crate::fmt::int`]).
    pub fn from_int<I: IntegerValue>(value: I, base: IntBase) -> Self {
        crate::fmt::format_int(value, base)
    }

    /// Format a float (see [`crate::fmt::float`]).
    pub fn from_float<T: FloatValue>(value: T, mode: FloatMode, precision: Precision) -> Self {
        crate::fmt::format_float(value, mode, precision)
    }

    pub fn as_str(&self) -> &str {
        self.inner.as_str()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        TEXT_CAPACITY
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Append one character.
    pub fn push(&mut self, c: char) -> Result<(), SbsError> {
        self.inner.push(c).map_err(|_| SbsError::Capacity)
    }

    /// Append `s` entirely, or leave the text unchanged and fail.
    pub fn push_str(&mut self, s: &str) -> Result<(), SbsError> {
        self.inner.push_str(s).map_err(|_| SbsError::Capacity)
    }

    /// Append the longest prefix of `s` that fits, cut on a char boundary.
    ///
    /// Returns `true` when all of `s` was appended.
    fn push_truncated(&mut self, s: &str) -> bool {
        let room = TEXT_CAPACITY - self.inner.len();
        if s.len() <= room {
            // Cannot fail: checked against the remaining room above.
            let _ = self.inner.push_str(s);
            return true;
        }
        let mut end = room;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        let _ = self.inner.push_str(&s[..end]);
        warn!(
            "Text truncated: dropped {} of {} bytes",
            s.len() - end,
            s.len()
        );
        false
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Byte index of the first occurrence of `pattern`.
    pub fn first_index_of(&self, pattern: &str) -> Option<usize> {
        self.inner.find(pattern)
    }

    /// Byte index of the last occurrence of `pattern`.
    pub fn last_index_of(&self, pattern: &str) -> Option<usize> {
        self.inner.rfind(pattern)
    }

    /// Copy of `len` bytes starting at `start`; a `len` of 0 takes everything
    /// up to the end.
    ///
    /// The range is clamped to the text. A range that does not fall on char
    /// boundaries yields an empty text.
    pub fn substr(&self, start: usize, len: usize) -> Self {
        let start = start.min(self.len());
        let end = if len == 0 {
            self.len()
        } else {
            start.saturating_add(len).min(self.len())
        };
        self.inner.get(start..end).map(Self::from).unwrap_or_default()
    }

    /// Everything before the first space (the whole text if there is none).
    pub fn first_word(&self) -> Self {
        match self.first_index_of(" ") {
            Some(0) => Self::new(),
            Some(index) => self.substr(0, index),
            None => self.clone(),
        }
    }

    /// Everything up to and including the first `\n` (the whole text if there
    /// is none).
    pub fn first_line(&self) -> Self {
        match self.first_index_of("\n") {
            Some(index) => self.substr(0, index + 1),
            None => self.clone(),
        }
    }

    /// Drop the first word and its trailing space. Clears the text when it
    /// holds a single word.
    pub fn remove_first_word(&mut self) {
        self.remove_through(" ");
    }

    /// Drop the first line and its `\n`. Clears the text when it holds a
    /// single line.
    pub fn remove_first_line(&mut self) {
        self.remove_through("\n");
    }

    fn remove_through(&mut self, separator: &str) {
        *self = match self.first_index_of(separator) {
            Some(index) => Self::from(&self.as_str()[index + separator.len()..]),
            None => Self::new(),
        };
    }
}

impl From<&str> for Text {
    /// Truncates at [`TEXT_CAPACITY`].
    fn from(s: &str) -> Self {
        let mut text = Self::new();
        text.push_truncated(s);
        text
    }
}

impl Deref for Text {
    type Target = str;

    fn deref(&self) -> &str {
        self.inner.as_str()
    }
}

impl AsRef<str> for Text {
    fn as_ref(&self) -> &str {
        self.inner.as_str()
    }
}

impl PartialEq<&str> for Text {
    fn eq(&self, other: &&str) -> bool {
        self.inner.as_str() == *other
    }
}

impl PartialEq<str> for Text {
    fn eq(&self, other: &str) -> bool {
        self.inner.as_str() == other
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.inner.as_str(), f)
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.inner.as_str())
    }
}

impl fmt::Write for Text {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s).map_err(|_| fmt::Error)
    }
}

// ---------------------------------------------------------------------------
// Concatenation
// ---------------------------------------------------------------------------

impl AddAssign<&str> for Text {
    fn add_assign(&mut self, rhs: &str) {
        self.push_truncated(rhs);
    }
}

impl Add<&str> for Text {
    type Output = Text;

    fn add(mut self, rhs: &str) -> Text {
        self += rhs;
        self
    }
}

impl DivAssign<&str> for Text {
    /// Path-style join: appends `/` then `rhs`.
    fn div_assign(&mut self, rhs: &str) {
        if self.push_truncated("/") {
            self.push_truncated(rhs);
        }
    }
}

impl Div<&str> for Text {
    type Output = Text;

    fn div(mut self, rhs: &str) -> Text {
        self /= rhs;
        self
    }
}
