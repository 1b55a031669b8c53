//! Numeric-to-text formatting engine
//!
//! - [`int`]: fixed-width binary/octal/hexadecimal and minimal decimal output
//!   for the eight primitive integer types
//! - [`float`]: fixed-point, scientific and automatic output for `f32`/`f64`
//! - [`select`]: mode enums and validation of raw mode values
//!
//! Every formatter writes into any [`core::fmt::Write`] sink. The `format_*`
//! helpers collect the output into a [`Text`](crate::text::Text).

pub mod float;
pub mod int;
pub mod select;

pub use float::{
    FloatValue, INF_TEXT, NAN_TEXT, OVF_TEXT, format_float, format_float_raw, write_float,
};
pub use int::{IntegerValue, format_int, format_int_raw, write_int};
pub use select::{
    AUTO_PRECISION_RAW, FloatMode, IntBase, MAX_AUTO_DECIMALS, Notation, Precision, Radix,
};
