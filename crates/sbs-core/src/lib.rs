//! Hardware-independent core library for the sbs toolkit
//!
//! This crate contains the platform-agnostic pieces shared by every board
//! build and the native desktop host: the numeric-to-text formatting engine,
//! the fixed-capacity text buffer it writes into, and the verbosity-gated
//! console that prints that text.
//!
//! It is `#![no_std]` and does not need an allocator, so it compiles on 8-bit
//! targets as well as on desktop hosts (for the native build and tests).

#![no_std]

pub mod config;
pub mod console;
pub mod error;
pub mod fmt;
pub mod math;
pub mod serial;
pub mod text;

pub use error::SbsError;
pub use fmt::{FloatMode, IntBase, Precision, format_float, format_int};
pub use text::Text;
