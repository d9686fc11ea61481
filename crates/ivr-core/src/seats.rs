//! Seat availability snapshots.
//!
//! Snapshots are keyed by the composite (train number, date, class). Callers
//! speak each part separately, so the key is assembled across several dialog
//! steps and normalized here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::extract::{strip_sentence_end, title_case};
use crate::TrainNumber;

/// Available seats for one class of one train on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatAvailability {
    /// Train number.
    pub train_number: TrainNumber,
    /// Train name.
    pub train_name: String,
    /// Origin station.
    pub origin: String,
    /// Destination station.
    pub destination: String,
    /// Date of journey.
    pub date: NaiveDate,
    /// Travel class (e.g. `Sleeper`, `3A`, `Chair Car`).
    pub class: String,
    /// Seats in the class.
    pub total_seats: u32,
    /// Seats still bookable.
    pub available_seats: u32,
}

impl SeatAvailability {
    /// The composite key of this snapshot.
    #[must_use]
    pub fn key(&self) -> SeatKey {
        SeatKey {
            train_number: self.train_number.clone(),
            date: self.date,
            class: self.class.clone(),
        }
    }
}

/// Composite lookup key for [`SeatAvailability`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeatKey {
    /// Train number.
    pub train_number: TrainNumber,
    /// Date of journey.
    pub date: NaiveDate,
    /// Normalized travel class.
    pub class: String,
}

/// Normalize a spoken journey date: drop whitespace and a trailing full stop.
///
/// `"2025 - 11 - 05."` becomes `"2025-11-05"`.
#[must_use]
pub fn normalize_spoken_date(text: &str) -> String {
    strip_sentence_end(text)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Parse a normalized spoken date in `YYYY-MM-DD` form.
#[must_use]
pub fn parse_journey_date(normalized: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(normalized, "%Y-%m-%d").ok()
}

/// Normalize a spoken travel class: `"chair car."` becomes `"Chair Car"`.
#[must_use]
pub fn normalize_class(text: &str) -> String {
    title_case(strip_sentence_end(text))
}
