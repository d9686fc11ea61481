//! Column families of the `RocksDB` backend.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Journey records, keyed by reservation code.
    pub const JOURNEYS: &str = "journeys";

    /// Complaints, keyed by big-endian complaint id.
    pub const COMPLAINTS: &str = "complaints";

    /// Index: complaints by reservation, keyed by `code || 0x00 || complaint_id`.
    /// Value is empty (index only).
    pub const COMPLAINTS_BY_RESERVATION: &str = "complaints_by_reservation";

    /// Emergency reports, keyed by big-endian report sequence.
    pub const EMERGENCIES: &str = "emergencies";

    /// Refunds, keyed by big-endian refund id.
    pub const REFUNDS: &str = "refunds";

    /// Index: refunds by reservation, keyed by `code || 0x00 || refund_id`.
    pub const REFUNDS_BY_RESERVATION: &str = "refunds_by_reservation";

    /// Train schedules, keyed by train number.
    pub const SCHEDULES: &str = "schedules";

    /// Seat availability, keyed by `train || 0x00 || date || 0x00 || class`.
    pub const SEATS: &str = "seats";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![
        cf::JOURNEYS,
        cf::COMPLAINTS,
        cf::COMPLAINTS_BY_RESERVATION,
        cf::EMERGENCIES,
        cf::REFUNDS,
        cf::REFUNDS_BY_RESERVATION,
        cf::SCHEDULES,
        cf::SEATS,
    ]
}
