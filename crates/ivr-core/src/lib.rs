//! Core types and utilities for the railway IVR service.
//!
//! This crate provides the foundational types used throughout the IVR backend:
//!
//! - **Identifiers**: `ReservationCode`, `TrainNumber`, `ComplaintId`, `RefundId`,
//!   `EmergencyReportId`, `CallSid`
//! - **Records**: `JourneyRecord`, `Complaint`, `EmergencyReport`, `Refund`,
//!   `TrainSchedule`, `SeatAvailability`
//! - **Routing**: `Department`, `RoutingRule`, `classify`
//! - **Extraction**: digit filtering, reservation/name/train extraction from transcripts
//!
//! # Reservation codes
//!
//! A reservation code is always ten ASCII digits. Spoken input is normalized
//! by discarding every non-digit character, and anything that does not come
//! out at exactly ten digits is rejected rather than padded or truncated.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod complaint;
pub mod emergency;
pub mod extract;
pub mod ids;
pub mod intent;
pub mod journey;
pub mod refund;
pub mod schedule;
pub mod seats;

pub use complaint::{
    Complaint, ComplaintStatus, NewComplaint, CONTACT_NOT_PROVIDED, DEFAULT_COMPLAINT_CATEGORY,
};
pub use emergency::{EmergencyKind, EmergencyReport, EmergencyStatus, NewEmergencyReport};
pub use extract::{IntakeDetails, UNKNOWN, UNKNOWN_PASSENGER};
pub use ids::{
    CallSid, ComplaintId, EmergencyReportId, IdError, RefundId, ReservationCode, TrainNumber,
    RESERVATION_CODE_LEN,
};
pub use intent::{classify, Department, RoutingRule, ROUTING_RULES};
pub use journey::{BookingStatus, JourneyRecord};
pub use refund::{Refund, RefundStatus};
pub use schedule::TrainSchedule;
pub use seats::{SeatAvailability, SeatKey};
