//! Journey (PNR) records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{ReservationCode, TrainNumber};

/// A booked journey, keyed by its reservation code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyRecord {
    /// Reservation code (PNR).
    pub reservation_code: ReservationCode,
    /// Passenger name as booked.
    pub passenger_name: String,
    /// Train number.
    pub train_number: TrainNumber,
    /// Train name.
    pub train_name: String,
    /// Boarding station.
    pub origin: String,
    /// Destination station.
    pub destination: String,
    /// Date of journey.
    pub date: NaiveDate,
    /// Coach label (e.g. `S2`).
    pub coach: String,
    /// Seat or berth number.
    pub seat: String,
    /// Booking status.
    pub status: BookingStatus,
}

/// Booking status of a journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BookingStatus {
    /// Seat confirmed.
    Confirmed,
    /// On the waiting list, with the label as reported (e.g. `WL 12`).
    Waiting(String),
    /// Reservation against cancellation, with the label as reported.
    Rac(String),
    /// Any other status reported by the reservation system.
    Other(String),
}

impl BookingStatus {
    /// Label as stored and spoken.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Confirmed => "Confirmed",
            Self::Waiting(s) | Self::Rac(s) | Self::Other(s) => s,
        }
    }
}

impl From<String> for BookingStatus {
    fn from(value: String) -> Self {
        let lowered = value.to_lowercase();
        if lowered == "confirmed" {
            Self::Confirmed
        } else if lowered.contains("waiting") {
            Self::Waiting(value)
        } else if lowered.contains("rac") {
            Self::Rac(value)
        } else {
            Self::Other(value)
        }
    }
}

impl From<&str> for BookingStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<BookingStatus> for String {
    fn from(status: BookingStatus) -> Self {
        status.label().to_string()
    }
}
