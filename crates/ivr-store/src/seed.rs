//! Sample data loaded into an empty store at startup.

use chrono::{NaiveDate, NaiveTime};
use ivr_core::{
    BookingStatus, Complaint, ComplaintId, ComplaintStatus, EmergencyKind, EmergencyReport,
    EmergencyReportId, EmergencyStatus, JourneyRecord, Refund, RefundId, RefundStatus,
    SeatAvailability, TrainNumber, TrainSchedule,
};
use tracing::info;

use crate::error::{Result, StoreError};
use crate::Store;

/// (code, passenger, train, train name, origin, destination, date, coach, seat, status)
type JourneyRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
);

const JOURNEYS: &[JourneyRow] = &[
    ("1234567890", "Rahul Sharma", "12627", "Karnataka Express", "Delhi", "Bangalore", "2025-11-05", "S2", "34", "Confirmed"),
    ("2345678901", "Priya Singh", "12841", "Coromandel Express", "Kolkata", "Chennai", "2025-11-06", "A1", "14", "RAC"),
    ("3456789012", "Amit Kumar", "12951", "Mumbai Rajdhani", "Mumbai", "Delhi", "2025-11-07", "B1", "21", "Confirmed"),
    ("4567890123", "Neha Patel", "12723", "Andhra Express", "Vijayawada", "Delhi", "2025-11-08", "S4", "10", "Waiting"),
    ("5678901234", "Ravi Verma", "12659", "Chennai Mail", "Chennai", "Delhi", "2025-11-09", "S3", "17", "Confirmed"),
    ("6789012345", "Sneha Reddy", "12760", "Charminar Express", "Hyderabad", "Chennai", "2025-11-10", "A2", "06", "Confirmed"),
    ("7890123456", "Vikram Das", "12009", "Shatabdi Express", "Bhopal", "Delhi", "2025-11-11", "C1", "02", "Confirmed"),
    ("8901234567", "Kiran Nair", "16382", "Kanniyakumari Express", "Trivandrum", "Mumbai", "2025-11-12", "S6", "59", "RAC"),
    ("9012345678", "Deepika Rao", "12533", "Pushpak Express", "Lucknow", "Mumbai", "2025-11-13", "B2", "28", "Confirmed"),
    ("1122334455", "Arjun Mehta", "12615", "Grand Trunk Express", "Delhi", "Chennai", "2025-11-14", "S1", "49", "Waiting"),
    ("2233445566", "Meena Iyer", "12709", "Simhapuri Express", "Tirupati", "Secunderabad", "2025-11-15", "S2", "12", "Confirmed"),
    ("3344556677", "Sameer Khan", "12953", "August Kranti Rajdhani", "Mumbai", "Delhi", "2025-11-16", "A1", "05", "Confirmed"),
    ("4455667788", "Lakshmi Menon", "12625", "Kerala Express", "Trivandrum", "Delhi", "2025-11-17", "S5", "27", "RAC"),
    ("5566778899", "Manish Gupta", "12138", "Punjab Mail", "Delhi", "Mumbai", "2025-11-18", "B3", "30", "Confirmed"),
    ("6677889900", "Pooja Sharma", "12687", "Dehradun Express", "Chennai", "Dehradun", "2025-11-19", "A2", "11", "Waiting"),
    ("7788990011", "Harish Pandey", "12711", "Pinakini Express", "Vijayawada", "Chennai", "2025-11-20", "S2", "23", "Confirmed"),
    ("8899001122", "Nisha Bhat", "12029", "Shatabdi Express", "Pune", "Mumbai", "2025-11-21", "C1", "09", "Confirmed"),
    ("9900112233", "Gaurav Sinha", "12863", "Howrah Express", "Howrah", "Bangalore", "2025-11-22", "S6", "15", "RAC"),
    ("1010101010", "Rohit Joshi", "12673", "Cheran Express", "Coimbatore", "Chennai", "2025-11-23", "B1", "19", "Confirmed"),
    ("2020202020", "Ananya Das", "12785", "Bangalore Express", "Hyderabad", "Bangalore", "2025-11-24", "S3", "45", "Confirmed"),
];

/// (passenger, code, contact, category, description, date, status, remarks)
type ComplaintRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    ComplaintStatus,
    &'static str,
);

const COMPLAINTS: &[ComplaintRow] = &[
    ("Rahul Sharma", "1234567890", "9876543210", "Cleanliness", "Coach was not clean", "2025-10-25", ComplaintStatus::Resolved, "Coach cleaned and inspected."),
    ("Priya Singh", "2345678901", "9876501234", "Delay", "Train delayed by 3 hours", "2025-10-26", ComplaintStatus::Pending, ""),
    ("Amit Kumar", "3456789012", "9876512345", "Catering", "Poor food quality in pantry car", "2025-10-27", ComplaintStatus::InProgress, "Vendor notified for action."),
    ("Neha Patel", "4567890123", "9876523456", "Staff behavior", "Rude staff at boarding", "2025-10-28", ComplaintStatus::Resolved, "Staff counseled and warned."),
    ("Ravi Verma", "5678901234", "9876534567", "Seat Issue", "Double booking on same seat", "2025-10-29", ComplaintStatus::Pending, ""),
];

/// (passenger, contact, kind, description, train, coach, seat, location, date, status)
type EmergencyRow = (
    &'static str,
    &'static str,
    EmergencyKind,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    EmergencyStatus,
);

const EMERGENCIES: &[EmergencyRow] = &[
    ("Rahul Sharma", "9876543210", EmergencyKind::Medical, "Passenger fainted", "12627", "S2", "34", "Between Delhi and Agra", "2025-11-01", EmergencyStatus::Resolved),
    ("Priya Singh", "9123456789", EmergencyKind::Security, "Suspicious luggage found", "12841", "A1", "14", "Chennai Station", "2025-11-02", EmergencyStatus::InProgress),
    ("Amit Kumar", "9988776655", EmergencyKind::Fire, "Smoke detected in pantry car", "12951", "B1", "21", "Near Kota", "2025-11-03", EmergencyStatus::Resolved),
    ("Neha Patel", "9765432109", EmergencyKind::Medical, "Child injured during boarding", "12723", "S4", "10", "Vijayawada", "2025-11-04", EmergencyStatus::Pending),
    ("Ravi Verma", "9456123789", EmergencyKind::Technical, "Brake issue reported", "12659", "S3", "17", "Nagpur", "2025-11-05", EmergencyStatus::Resolved),
    ("Sneha Reddy", "9090909090", EmergencyKind::Security, "Unauthorized person onboard", "12760", "A2", "06", "Hyderabad", "2025-11-06", EmergencyStatus::InProgress),
    ("Vikram Das", "9543216789", EmergencyKind::Fire, "Burning smell from AC unit", "12009", "C1", "02", "Jhansi", "2025-11-07", EmergencyStatus::Resolved),
    ("Kiran Nair", "9845012345", EmergencyKind::Medical, "Passenger diabetic shock", "16382", "S6", "59", "Mumbai", "2025-11-08", EmergencyStatus::Pending),
    ("Deepika Rao", "9998887776", EmergencyKind::Technical, "Generator failure reported", "12533", "B2", "28", "Lucknow", "2025-11-09", EmergencyStatus::Resolved),
    ("Arjun Mehta", "9001234567", EmergencyKind::Security, "Theft of luggage", "12615", "S1", "49", "Chennai", "2025-11-10", EmergencyStatus::InProgress),
];

/// (code, passenger, train, amount in paise, payment mode, status, date, remarks)
type RefundRow = (
    &'static str,
    &'static str,
    &'static str,
    i64,
    &'static str,
    RefundStatus,
    &'static str,
    &'static str,
);

const REFUNDS: &[RefundRow] = &[
    ("1234567890", "Rahul Sharma", "12627", 85_000, "UPI", RefundStatus::Processed, "2025-10-25", "Refund credited to bank."),
    ("2345678901", "Priya Singh", "12841", 125_000, "Credit Card", RefundStatus::Pending, "2025-10-26", "Processing delay due to bank issue."),
    ("3456789012", "Amit Kumar", "12951", 98_050, "Net Banking", RefundStatus::Processed, "2025-10-27", "Refund successful."),
    ("4567890123", "Neha Patel", "12723", 65_000, "UPI", RefundStatus::Failed, "2025-10-28", "UPI ID not valid."),
    ("5678901234", "Ravi Verma", "12659", 134_000, "Debit Card", RefundStatus::Processed, "2025-10-29", "Refund successful."),
    ("6789012345", "Sneha Reddy", "12760", 72_000, "Wallet", RefundStatus::Processed, "2025-10-30", "Amount added to wallet."),
    ("7890123456", "Vikram Das", "12009", 160_000, "UPI", RefundStatus::Pending, "2025-10-31", "Awaiting confirmation."),
    ("8901234567", "Kiran Nair", "16382", 94_000, "Credit Card", RefundStatus::Processed, "2025-11-01", "Refund completed."),
    ("9012345678", "Deepika Rao", "12533", 125_000, "Net Banking", RefundStatus::Processed, "2025-11-02", "Amount credited successfully."),
    ("1122334455", "Arjun Mehta", "12615", 50_000, "UPI", RefundStatus::Failed, "2025-11-03", "Invalid UPI ID."),
];

/// (train, name, origin, destination, date, class, total, available)
type SeatRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    u32,
    u32,
);

const SEATS: &[SeatRow] = &[
    ("12627", "Karnataka Express", "Delhi", "Bangalore", "2025-11-05", "Sleeper", 200, 35),
    ("12627", "Karnataka Express", "Delhi", "Bangalore", "2025-11-05", "3A", 72, 12),
    ("12841", "Coromandel Express", "Kolkata", "Chennai", "2025-11-06", "2A", 48, 6),
    ("12951", "Mumbai Rajdhani", "Mumbai", "Delhi", "2025-11-07", "1A", 22, 2),
    ("12723", "Andhra Express", "Vijayawada", "Delhi", "2025-11-08", "Sleeper", 180, 20),
    ("12659", "Chennai Mail", "Chennai", "Delhi", "2025-11-09", "3A", 72, 10),
    ("12760", "Charminar Express", "Hyderabad", "Chennai", "2025-11-10", "Sleeper", 200, 42),
    ("12009", "Shatabdi Express", "Bhopal", "Delhi", "2025-11-11", "Chair Car", 100, 18),
    ("16382", "Kanniyakumari Express", "Trivandrum", "Mumbai", "2025-11-12", "Sleeper", 220, 8),
    ("12533", "Pushpak Express", "Lucknow", "Mumbai", "2025-11-13", "2A", 52, 9),
];

/// (train, name, origin, destination, departure, arrival, duration, days)
type ScheduleRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
);

const SCHEDULES: &[ScheduleRow] = &[
    ("12627", "Karnataka Express", "New Delhi", "Bangalore", "20:20", "08:10", "35h 50m", "Daily"),
    ("12841", "Coromandel Express", "Kolkata", "Chennai", "14:50", "18:45", "27h 55m", "Daily"),
    ("12951", "Mumbai Rajdhani", "Mumbai Central", "New Delhi", "17:00", "08:35", "15h 35m", "Daily"),
    ("12723", "Andhra Express", "Vijayawada", "New Delhi", "05:25", "11:00", "29h 35m", "Daily"),
    ("12659", "Chennai Mail", "Chennai Central", "New Delhi", "23:00", "06:30", "31h 30m", "Daily"),
    ("12760", "Charminar Express", "Hyderabad", "Chennai", "18:00", "07:50", "13h 50m", "Daily"),
    ("12009", "Shatabdi Express", "Bhopal", "New Delhi", "06:00", "12:00", "6h 00m", "Daily"),
    ("16382", "Kanniyakumari Express", "Trivandrum", "Mumbai", "05:20", "22:15", "16h 55m", "Mon, Wed, Fri"),
    ("12533", "Pushpak Express", "Lucknow", "Mumbai CST", "20:30", "16:10", "19h 40m", "Daily"),
    ("12615", "Grand Trunk Express", "New Delhi", "Chennai", "18:40", "05:30", "34h 50m", "Daily"),
];

fn date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| StoreError::Serialization(format!("seed date {value:?}: {e}")))
}

fn time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|e| StoreError::Serialization(format!("seed time {value:?}: {e}")))
}

fn remarks(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Write every sample row into the store.
///
/// Rows are upserted under fixed ids, so loading twice leaves the same
/// contents.
///
/// # Errors
///
/// Returns an error if a write fails.
pub fn load(store: &dyn Store) -> Result<()> {
    for &(code, passenger, train, train_name, origin, destination, day, coach, seat, status) in
        JOURNEYS
    {
        store.put_journey(&JourneyRecord {
            reservation_code: code
                .parse()
                .map_err(|e| StoreError::Serialization(format!("seed journey: {e}")))?,
            passenger_name: passenger.into(),
            train_number: TrainNumber::new(train),
            train_name: train_name.into(),
            origin: origin.into(),
            destination: destination.into(),
            date: date(day)?,
            coach: coach.into(),
            seat: seat.into(),
            status: BookingStatus::from(status),
        })?;
    }

    for (index, &(passenger, code, contact, category, description, day, status, note)) in
        (1u64..).zip(COMPLAINTS)
    {
        store.put_complaint(&Complaint {
            id: ComplaintId(index),
            passenger_name: passenger.into(),
            reservation_code: code.into(),
            contact: contact.into(),
            category: category.into(),
            description: description.into(),
            date: date(day)?,
            status,
            remarks: remarks(note),
        })?;
    }

    for (sequence, &(passenger, contact, kind, description, train, coach, seat, location, day, status)) in
        (1u64..).zip(EMERGENCIES)
    {
        store.put_emergency(&EmergencyReport {
            id: EmergencyReportId::from_sequence(sequence),
            passenger_name: passenger.into(),
            contact: contact.into(),
            kind,
            description: description.into(),
            train_number: train.into(),
            coach: coach.into(),
            seat: seat.into(),
            location: location.into(),
            reported_at: date(day)?.and_time(NaiveTime::MIN),
            status,
            recording_url: None,
        })?;
    }

    for (index, &(code, passenger, train, amount_paise, mode, status, day, note)) in
        (1u64..).zip(REFUNDS)
    {
        store.put_refund(&Refund {
            id: RefundId(index),
            reservation_code: code
                .parse()
                .map_err(|e| StoreError::Serialization(format!("seed refund: {e}")))?,
            passenger_name: passenger.into(),
            train_number: TrainNumber::new(train),
            amount_paise,
            payment_mode: mode.into(),
            status,
            date: date(day)?,
            remarks: remarks(note),
        })?;
    }

    for &(train, name, origin, destination, day, class, total, available) in SEATS {
        store.put_seat_availability(&SeatAvailability {
            train_number: TrainNumber::new(train),
            train_name: name.into(),
            origin: origin.into(),
            destination: destination.into(),
            date: date(day)?,
            class: class.into(),
            total_seats: total,
            available_seats: available,
        })?;
    }

    for &(train, name, origin, destination, departure, arrival, duration, days) in SCHEDULES {
        store.put_schedule(&TrainSchedule {
            train_number: TrainNumber::new(train),
            name: name.into(),
            origin: origin.into(),
            destination: destination.into(),
            departure: time(departure)?,
            arrival: time(arrival)?,
            duration: duration.into(),
            days_of_operation: days.into(),
        })?;
    }

    Ok(())
}

/// Load the sample rows unless the store already holds journeys.
///
/// Returns whether anything was written.
///
/// # Errors
///
/// Returns an error if the emptiness check or a write fails.
pub fn seed_if_empty(store: &dyn Store) -> Result<bool> {
    if store.journey_count()? > 0 {
        info!("store already populated, skipping sample data");
        return Ok(false);
    }
    load(store)?;
    info!(
        journeys = JOURNEYS.len(),
        complaints = COMPLAINTS.len(),
        emergencies = EMERGENCIES.len(),
        refunds = REFUNDS.len(),
        seats = SEATS.len(),
        schedules = SCHEDULES.len(),
        "sample data loaded"
    );
    Ok(true)
}
