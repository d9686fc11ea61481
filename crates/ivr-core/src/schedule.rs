//! Train schedules.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::TrainNumber;

/// Timetable entry for a train, keyed by train number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainSchedule {
    /// Train number.
    pub train_number: TrainNumber,
    /// Train name.
    pub name: String,
    /// Origin station.
    pub origin: String,
    /// Destination station.
    pub destination: String,
    /// Departure time from the origin.
    pub departure: NaiveTime,
    /// Arrival time at the destination.
    pub arrival: NaiveTime,
    /// Travel duration as published (e.g. `35h 50m`).
    pub duration: String,
    /// Days of operation (e.g. `Daily`, `Mon, Wed, Fri`).
    pub days_of_operation: String,
}
