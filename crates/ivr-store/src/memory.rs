//! In-memory store.
//!
//! Every table is a `BTreeMap` behind one `RwLock`, so ids come out in
//! insertion order and secondary lookups can scan in key order.

use std::collections::BTreeMap;

use ivr_core::{
    Complaint, ComplaintId, ComplaintStatus, EmergencyReport, EmergencyReportId, JourneyRecord,
    NewComplaint, NewEmergencyReport, Refund, RefundId, ReservationCode, SeatAvailability,
    SeatKey, TrainNumber, TrainSchedule,
};
use parking_lot::RwLock;
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::Store;

#[derive(Default)]
struct Tables {
    journeys: BTreeMap<ReservationCode, JourneyRecord>,
    complaints: BTreeMap<ComplaintId, Complaint>,
    emergencies: BTreeMap<u64, EmergencyReport>,
    refunds: BTreeMap<RefundId, Refund>,
    schedules: BTreeMap<TrainNumber, TrainSchedule>,
    seats: BTreeMap<SeatKey, SeatAvailability>,
}

/// Process-local store used by default and in tests.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn put_journey(&self, journey: &JourneyRecord) -> Result<()> {
        self.tables
            .write()
            .journeys
            .insert(journey.reservation_code.clone(), journey.clone());
        Ok(())
    }

    fn get_journey(&self, code: &ReservationCode) -> Result<Option<JourneyRecord>> {
        Ok(self.tables.read().journeys.get(code).cloned())
    }

    fn journey_count(&self) -> Result<usize> {
        Ok(self.tables.read().journeys.len())
    }

    fn register_complaint(&self, complaint: NewComplaint) -> Result<Complaint> {
        let mut tables = self.tables.write();
        let next = tables
            .complaints
            .last_key_value()
            .map_or(1, |(id, _)| id.0 + 1);
        let complaint = complaint.into_complaint(ComplaintId(next));
        tables.complaints.insert(complaint.id, complaint.clone());
        debug!(complaint_id = next, "complaint registered");
        Ok(complaint)
    }

    fn put_complaint(&self, complaint: &Complaint) -> Result<()> {
        self.tables
            .write()
            .complaints
            .insert(complaint.id, complaint.clone());
        Ok(())
    }

    fn complaints_by_reservation(&self, reservation_code: &str) -> Result<Vec<Complaint>> {
        Ok(self
            .tables
            .read()
            .complaints
            .values()
            .filter(|c| c.reservation_code == reservation_code)
            .cloned()
            .collect())
    }

    fn update_complaint_status(
        &self,
        id: ComplaintId,
        status: ComplaintStatus,
        remarks: Option<String>,
    ) -> Result<Complaint> {
        let mut tables = self.tables.write();
        let complaint = tables
            .complaints
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound {
                entity: "complaint",
                id: id.to_string(),
            })?;
        complaint.status = status;
        complaint.remarks = remarks;
        Ok(complaint.clone())
    }

    fn file_emergency(&self, report: NewEmergencyReport) -> Result<EmergencyReport> {
        let mut tables = self.tables.write();
        let next = tables
            .emergencies
            .last_key_value()
            .map_or(1, |(seq, _)| seq + 1);
        let report = report.into_report(EmergencyReportId::from_sequence(next));
        tables.emergencies.insert(next, report.clone());
        debug!(report_id = %report.id, "emergency report filed");
        Ok(report)
    }

    fn put_emergency(&self, report: &EmergencyReport) -> Result<()> {
        let seq = report.id.sequence().ok_or_else(|| {
            StoreError::Serialization(format!("emergency report id {} has no sequence", report.id))
        })?;
        self.tables.write().emergencies.insert(seq, report.clone());
        Ok(())
    }

    fn get_emergency(&self, id: &EmergencyReportId) -> Result<Option<EmergencyReport>> {
        let Some(seq) = id.sequence() else {
            return Ok(None);
        };
        Ok(self.tables.read().emergencies.get(&seq).cloned())
    }

    fn put_refund(&self, refund: &Refund) -> Result<()> {
        self.tables.write().refunds.insert(refund.id, refund.clone());
        Ok(())
    }

    fn refund_by_reservation(&self, code: &ReservationCode) -> Result<Option<Refund>> {
        Ok(self
            .tables
            .read()
            .refunds
            .values()
            .find(|r| &r.reservation_code == code)
            .cloned())
    }

    fn put_schedule(&self, schedule: &TrainSchedule) -> Result<()> {
        self.tables
            .write()
            .schedules
            .insert(schedule.train_number.clone(), schedule.clone());
        Ok(())
    }

    fn get_schedule(&self, train_number: &TrainNumber) -> Result<Option<TrainSchedule>> {
        Ok(self.tables.read().schedules.get(train_number).cloned())
    }

    fn put_seat_availability(&self, seats: &SeatAvailability) -> Result<()> {
        self.tables.write().seats.insert(seats.key(), seats.clone());
        Ok(())
    }

    fn get_seat_availability(&self, key: &SeatKey) -> Result<Option<SeatAvailability>> {
        Ok(self.tables.read().seats.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ivr_core::{EmergencyKind, EmergencyStatus};

    fn new_complaint(code: &str) -> NewComplaint {
        NewComplaint {
            passenger_name: "Rahul Sharma".into(),
            reservation_code: code.into(),
            contact: "+919876543210".into(),
            category: "General".into(),
            description: "Train was dirty".into(),
            date: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
        }
    }

    fn new_emergency() -> NewEmergencyReport {
        NewEmergencyReport {
            passenger_name: "Unknown Passenger".into(),
            contact: "+911234567890".into(),
            kind: EmergencyKind::Fire,
            description: "Smoke in coach S4".into(),
            train_number: "12627".into(),
            coach: "Unknown".into(),
            seat: "Unknown".into(),
            location: "Unknown".into(),
            reported_at: NaiveDate::from_ymd_opt(2025, 11, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            recording_url: None,
        }
    }

    #[test]
    fn complaint_ids_increase() {
        let store = MemoryStore::new();
        let first = store.register_complaint(new_complaint("1234567890")).unwrap();
        let second = store.register_complaint(new_complaint("1234567890")).unwrap();
        assert_eq!(first.id, ComplaintId(1));
        assert_eq!(second.id, ComplaintId(2));
        assert_eq!(first.status, ComplaintStatus::Pending);
    }

    #[test]
    fn complaints_by_reservation_is_exact() {
        let store = MemoryStore::new();
        store.register_complaint(new_complaint("1234567890")).unwrap();
        store.register_complaint(new_complaint("Unknown")).unwrap();
        store.register_complaint(new_complaint("1234567890")).unwrap();

        let found = store.complaints_by_reservation("1234567890").unwrap();
        assert_eq!(found.len(), 2);
        assert!(found[0].id < found[1].id);
        assert!(store.complaints_by_reservation("0000000000").unwrap().is_empty());
    }

    #[test]
    fn update_missing_complaint_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update_complaint_status(ComplaintId(9), ComplaintStatus::Resolved, None)
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "complaint", .. }));
    }

    #[test]
    fn update_complaint_sets_remarks() {
        let store = MemoryStore::new();
        let filed = store.register_complaint(new_complaint("1234567890")).unwrap();
        let updated = store
            .update_complaint_status(
                filed.id,
                ComplaintStatus::InProgress,
                Some("Cleaning staff notified".into()),
            )
            .unwrap();
        assert_eq!(updated.status, ComplaintStatus::InProgress);
        assert_eq!(updated.remarks.as_deref(), Some("Cleaning staff notified"));
    }

    #[test]
    fn emergency_ids_follow_existing_sequence() {
        let store = MemoryStore::new();
        let seeded = new_emergency().into_report(EmergencyReportId::from_sequence(10));
        store.put_emergency(&seeded).unwrap();

        let filed = store.file_emergency(new_emergency()).unwrap();
        assert_eq!(filed.id.as_str(), "E011");
        assert_eq!(filed.status, EmergencyStatus::Pending);
        assert_eq!(store.get_emergency(&filed.id).unwrap(), Some(filed));
    }

    #[test]
    fn unknown_seat_key_misses() {
        let store = MemoryStore::new();
        let key = SeatKey {
            train_number: TrainNumber::new("12627"),
            date: NaiveDate::from_ymd_opt(2025, 11, 5).unwrap(),
            class: "Sleeper".into(),
        };
        assert_eq!(store.get_seat_availability(&key).unwrap(), None);
    }
}
