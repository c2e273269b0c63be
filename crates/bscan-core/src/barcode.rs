use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Local validation failure for a scanned code.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BarcodeError {
    #[error("barcode is empty")]
    Empty,
}

/// A scanned barcode identifier (UPC-A, EAN-13, UPC-E, …).
///
/// Construction trims surrounding whitespace and rejects the empty result.
/// No checksum validation happens here — malformed codes travel to the
/// upstream provider and are rejected there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Barcode(String);

impl Barcode {
    /// Parses raw decoded text into a `Barcode`.
    ///
    /// # Errors
    ///
    /// Returns [`BarcodeError::Empty`] if the input is empty after trimming.
    pub fn parse(raw: &str) -> Result<Self, BarcodeError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BarcodeError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Zero-pads the code to 13 digits for providers that require
    /// fixed-width identifiers. Codes already 13 digits or longer are
    /// returned unchanged.
    #[must_use]
    pub fn padded13(&self) -> String {
        format!("{:0>13}", self.0)
    }
}

impl std::fmt::Display for Barcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_whitespace() {
        let code = Barcode::parse("  049000050103 ").expect("valid barcode");
        assert_eq!(code.as_str(), "049000050103");
    }

    #[test]
    fn parse_rejects_empty_input() {
        assert_eq!(Barcode::parse(""), Err(BarcodeError::Empty));
        assert_eq!(Barcode::parse("   "), Err(BarcodeError::Empty));
    }

    #[test]
    fn padded13_pads_short_codes_with_leading_zeros() {
        let code = Barcode::parse("12345").expect("valid barcode");
        assert_eq!(code.padded13(), "0000000012345");
    }

    #[test]
    fn padded13_leaves_full_width_codes_unchanged() {
        let code = Barcode::parse("4006381333931").expect("valid barcode");
        assert_eq!(code.padded13(), "4006381333931");
    }

    #[test]
    fn parse_passes_through_malformed_codes() {
        // Checksum validation is the upstream provider's job.
        let code = Barcode::parse("not-a-upc").expect("no local checksum validation");
        assert_eq!(code.as_str(), "not-a-upc");
    }
}
