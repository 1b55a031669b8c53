//! Error type shared by the fallible parts of the crate.
//!
//! The formatting entry points themselves never fail: an unsupported mode
//! produces empty text and non-finite input produces sentinel text. Errors
//! only surface from the explicit conversions and buffer/config plumbing.

use thiserror_no_std::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SbsError {
    #[error("Unsupported integer base: {0}")]
    UnsupportedIntBase(i32),
    #[error("Unsupported float mode: {0}")]
    UnsupportedFloatMode(i32),
    #[error("Unsupported verbosity: {0}")]
    UnsupportedVerbosity(i32),
    #[error("Text capacity exceeded")]
    Capacity,
    #[error("Config encoding failed")]
    Encode,
    #[error("Config decoding failed")]
    Decode,
}
