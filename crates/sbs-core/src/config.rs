//! Persisted formatting defaults
//!
//! On device the config is stored as a compact postcard blob (a few bytes);
//! the native host reads the same structure from JSON.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::console::Verbosity;
use crate::error::SbsError;
use crate::fmt::{FloatMode, IntBase, Precision};

/// Upper bound of an encoded [`FormatConfig`]
pub const CONFIG_MAX_SIZE: usize = 8;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct FormatConfig {
    pub int_base: IntBase,
    pub float_mode: FloatMode,
    /// Raw precision byte, 255 meaning Auto
    pub precision: u8,
    pub verbosity: Verbosity,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            int_base: IntBase::Auto,
            float_mode: FloatMode::Auto,
            precision: Precision::default().to_raw(),
            verbosity: Verbosity::Error,
        }
    }
}

impl FormatConfig {
    pub fn precision(&self) -> Precision {
        Precision::from_raw(self.precision)
    }

    /// Encode into `buf`, returning the used prefix.
    pub fn to_slice<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], SbsError> {
        postcard::to_slice(self, buf).map_err(|err| {
            warn!("Failed to encode format config: {}", err);
            SbsError::Encode
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SbsError> {
        postcard::from_bytes(bytes).map_err(|err| {
            warn!("Failed to decode format config: {}", err);
            SbsError::Decode
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_console_defaults() {
        let config = FormatConfig::default();
        assert_eq!(config.precision(), Precision::Digits(2));
        assert_eq!(config.verbosity, Verbosity::Error);
        assert_eq!(config.int_base, IntBase::Auto);
        assert_eq!(config.float_mode, FloatMode::Auto);
    }

    #[test]
    fn test_postcard_round_trip() {
        let config = FormatConfig {
            int_base: IntBase::Hexadecimal,
            float_mode: FloatMode::Scientific,
            precision: 255,
            verbosity: Verbosity::Debug,
        };
        let mut buf = [0u8; CONFIG_MAX_SIZE];
        let used = config.to_slice(&mut buf).unwrap();
        assert_eq!(used.len(), 4, "each field encodes as one byte");
        let decoded = FormatConfig::from_bytes(used).unwrap();
        assert_eq!(decoded, config);
        assert_eq!(decoded.precision(), Precision::Auto);
    }

    #[test]
    fn test_encode_into_short_buffer_fails() {
        let mut buf = [0u8; 2];
        assert_eq!(
            FormatConfig::default().to_slice(&mut buf),
            Err(SbsError::Encode)
        );
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert_eq!(FormatConfig::from_bytes(&[]), Err(SbsError::Decode));
        // Variant index 9 is not an IntBase.
        assert_eq!(FormatConfig::from_bytes(&[9, 0, 2, 1]), Err(SbsError::Decode));
    }
}
