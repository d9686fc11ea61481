//! Record store for the railway IVR service.
//!
//! This crate provides the flat, independently keyed tables the voice flows
//! read from and write to:
//!
//! - journeys, keyed by reservation code
//! - complaints, keyed by an auto-incrementing id and indexed by reservation code
//! - emergency reports, keyed by `E###` report id
//! - refunds, keyed by an auto-incrementing id and indexed by reservation code
//! - train schedules, keyed by train number
//! - seat availability snapshots, keyed by (train number, date, class)
//!
//! Two backends implement [`Store`]: [`MemoryStore`] (always available) and
//! `RocksStore` (feature `rocksdb-backend`), which keeps one column family per
//! table with CBOR-encoded values.
//!
//! # Example
//!
//! ```
//! use ivr_core::ReservationCode;
//! use ivr_store::{seed, MemoryStore, Store};
//!
//! let store = MemoryStore::new();
//! seed::seed_if_empty(&store).unwrap();
//!
//! let code: ReservationCode = "1234567890".parse().unwrap();
//! let journey = store.get_journey(&code).unwrap().unwrap();
//! assert_eq!(journey.passenger_name, "Rahul Sharma");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
#[cfg(feature = "rocksdb-backend")]
pub mod keys;
pub mod memory;
#[cfg(feature = "rocksdb-backend")]
pub mod rocks;
#[cfg(feature = "rocksdb-backend")]
pub mod schema;
pub mod seed;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
#[cfg(feature = "rocksdb-backend")]
pub use rocks::RocksStore;

use ivr_core::{
    Complaint, ComplaintId, ComplaintStatus, EmergencyReport, EmergencyReportId, JourneyRecord,
    NewComplaint, NewEmergencyReport, Refund, ReservationCode, SeatAvailability, SeatKey,
    TrainNumber, TrainSchedule,
};

/// The storage trait defining all record operations.
///
/// Every operation is a single synchronous point read or write; nothing
/// spans more than one statement.
pub trait Store: Send + Sync {
    // =========================================================================
    // Journeys
    // =========================================================================

    /// Insert or replace a journey record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_journey(&self, journey: &JourneyRecord) -> Result<()>;

    /// Get a journey by reservation code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_journey(&self, code: &ReservationCode) -> Result<Option<JourneyRecord>>;

    /// Number of journey records.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn journey_count(&self) -> Result<usize>;

    // =========================================================================
    // Complaints
    // =========================================================================

    /// Register a new complaint, assigning the next id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn register_complaint(&self, complaint: NewComplaint) -> Result<Complaint>;

    /// Insert or replace a complaint with a known id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_complaint(&self, complaint: &Complaint) -> Result<()>;

    /// List complaints filed against a reservation code, oldest first.
    ///
    /// The code is matched verbatim so complaints stored with the unknown
    /// sentinel are never returned for a real reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn complaints_by_reservation(&self, reservation_code: &str) -> Result<Vec<Complaint>>;

    /// Move a complaint to a new status with optional remarks.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the complaint doesn't exist.
    fn update_complaint_status(
        &self,
        id: ComplaintId,
        status: ComplaintStatus,
        remarks: Option<String>,
    ) -> Result<Complaint>;

    // =========================================================================
    // Emergency reports
    // =========================================================================

    /// File a new emergency report, assigning the next `E###` id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn file_emergency(&self, report: NewEmergencyReport) -> Result<EmergencyReport>;

    /// Insert or replace an emergency report with a known id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_emergency(&self, report: &EmergencyReport) -> Result<()>;

    /// Get an emergency report by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_emergency(&self, id: &EmergencyReportId) -> Result<Option<EmergencyReport>>;

    // =========================================================================
    // Refunds
    // =========================================================================

    /// Insert or replace a refund.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_refund(&self, refund: &Refund) -> Result<()>;

    /// Get the earliest refund recorded for a reservation code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn refund_by_reservation(&self, code: &ReservationCode) -> Result<Option<Refund>>;

    // =========================================================================
    // Schedules and seats
    // =========================================================================

    /// Insert or replace a train schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_schedule(&self, schedule: &TrainSchedule) -> Result<()>;

    /// Get a schedule by train number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_schedule(&self, train_number: &TrainNumber) -> Result<Option<TrainSchedule>>;

    /// Insert or replace a seat availability snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_seat_availability(&self, seats: &SeatAvailability) -> Result<()>;

    /// Get the seat availability snapshot for an exact composite key.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_seat_availability(&self, key: &SeatKey) -> Result<Option<SeatAvailability>>;
}
