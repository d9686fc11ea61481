//! Identifier types for the IVR service.
//!
//! This module provides strongly-typed identifiers for reservations, trains,
//! complaints, refunds, emergency reports and provider call sessions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::extract::digits_only;

/// Number of digits in a reservation code.
pub const RESERVATION_CODE_LEN: usize = 10;

/// A passenger reservation code (PNR).
///
/// Always exactly [`RESERVATION_CODE_LEN`] ASCII digits. Transcribed input is
/// normalized by dropping every non-digit character before the length check,
/// so `"1 2 3 4 5 6 7 8 9 0"` and `"1234567890"` parse to the same code.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReservationCode(String);

impl ReservationCode {
    /// Normalize a transcript into a reservation code.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidReservationCode`] carrying the normalized
    /// digits when they are not exactly ten long.
    pub fn from_transcript(text: &str) -> Result<Self, IdError> {
        let digits = digits_only(text);
        if digits.len() == RESERVATION_CODE_LEN {
            Ok(Self(digits))
        } else {
            Err(IdError::InvalidReservationCode { normalized: digits })
        }
    }

    /// Return the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ReservationCode {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == RESERVATION_CODE_LEN && s.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(s.to_string()))
        } else {
            Err(IdError::InvalidReservationCode {
                normalized: digits_only(s),
            })
        }
    }
}

impl fmt::Debug for ReservationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReservationCode({})", self.0)
    }
}

impl fmt::Display for ReservationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ReservationCode {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReservationCode> for String {
    fn from(code: ReservationCode) -> Self {
        code.0
    }
}

/// A train number as spoken by the caller (digits only, unvalidated length).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrainNumber(String);

impl TrainNumber {
    /// Build a train number from a transcript by keeping only its digits.
    #[must_use]
    pub fn from_transcript(text: &str) -> Self {
        Self(digits_only(text))
    }

    /// Wrap an already-normalized train number.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    /// Return the number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TrainNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrainNumber({})", self.0)
    }
}

impl fmt::Display for TrainNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Auto-incrementing complaint identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComplaintId(pub u64);

impl fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Auto-incrementing refund identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RefundId(pub u64);

impl fmt::Display for RefundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Emergency report identifier in the `E001` format.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmergencyReportId(String);

impl EmergencyReportId {
    /// Prefix shared by every report identifier.
    pub const PREFIX: char = 'E';

    /// Build the identifier for the given sequence number.
    #[must_use]
    pub fn from_sequence(sequence: u64) -> Self {
        Self(format!("{}{sequence:03}", Self::PREFIX))
    }

    /// Sequence number encoded in the identifier, if it has the standard shape.
    #[must_use]
    pub fn sequence(&self) -> Option<u64> {
        self.0.strip_prefix(Self::PREFIX)?.parse().ok()
    }

    /// Return the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for EmergencyReportId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = s
            .strip_prefix(Self::PREFIX)
            .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()));
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(IdError::InvalidReportId(s.to_string()))
        }
    }
}

impl fmt::Debug for EmergencyReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EmergencyReportId({})", self.0)
    }
}

impl fmt::Display for EmergencyReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque call identifier assigned by the telephony provider (`CallSid`).
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallSid(String);

impl CallSid {
    /// Wrap a provider call identifier. Blank identifiers are rejected.
    #[must_use]
    pub fn new(sid: &str) -> Option<Self> {
        let sid = sid.trim();
        (!sid.is_empty()).then(|| Self(sid.to_string()))
    }

    /// Return the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CallSid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CallSid({})", self.0)
    }
}

impl fmt::Display for CallSid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The input does not normalize to a ten digit reservation code.
    #[error("invalid reservation code: {normalized:?}")]
    InvalidReservationCode {
        /// The digits left after normalization.
        normalized: String,
    },

    /// The input is not an emergency report identifier.
    #[error("invalid emergency report id: {0}")]
    InvalidReportId(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reservation_code_strips_spoken_noise() {
        let code = ReservationCode::from_transcript("my P N R is 1 2 3 4 5 6 7 8 9 0").unwrap();
        assert_eq!(code.as_str(), "1234567890");
    }

    #[test]
    fn reservation_code_spacing_is_irrelevant() {
        let spaced = ReservationCode::from_transcript("1 2 3 4 5 6 7 8 9 0").unwrap();
        let packed = ReservationCode::from_transcript("1234567890").unwrap();
        assert_eq!(spaced, packed);
    }

    #[test]
    fn reservation_code_wrong_length_rejected() {
        let err = ReservationCode::from_transcript("pnr 12345").unwrap_err();
        assert_eq!(
            err,
            IdError::InvalidReservationCode {
                normalized: "12345".into()
            }
        );

        assert!(ReservationCode::from_transcript("123456789012").is_err());
        assert!(ReservationCode::from_transcript("").is_err());
    }

    #[test]
    fn reservation_code_serde_rejects_garbage() {
        let parsed: Result<ReservationCode, _> = serde_json::from_str("\"12ab\"");
        assert!(parsed.is_err());

        let parsed: ReservationCode = serde_json::from_str("\"1234567890\"").unwrap();
        assert_eq!(parsed.to_string(), "1234567890");
    }

    #[test]
    fn train_number_keeps_digits() {
        assert_eq!(
            TrainNumber::from_transcript("one two, 12627.").as_str(),
            "12627"
        );
    }

    #[test]
    fn emergency_report_id_sequence() {
        let id = EmergencyReportId::from_sequence(11);
        assert_eq!(id.as_str(), "E011");
        assert_eq!(id.sequence(), Some(11));

        let wide = EmergencyReportId::from_sequence(1234);
        assert_eq!(wide.as_str(), "E1234");

        assert!("E007".parse::<EmergencyReportId>().is_ok());
        assert!("X007".parse::<EmergencyReportId>().is_err());
        assert!("E".parse::<EmergencyReportId>().is_err());
    }

    #[test]
    fn call_sid_rejects_blank() {
        assert!(CallSid::new("  ").is_none());
        assert_eq!(CallSid::new(" CA123 ").unwrap().as_str(), "CA123");
    }
}
