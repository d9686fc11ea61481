//! `RocksDB` storage implementation.
//!
//! One column family per table, values encoded as CBOR. New complaint and
//! emergency ids are allocated from the last key of their column family
//! while holding `alloc`, so concurrent intakes never share an id.

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, Direction, IteratorMode,
    MultiThreaded, Options, WriteBatch,
};

use ivr_core::{
    Complaint, ComplaintId, ComplaintStatus, EmergencyReport, EmergencyReportId, JourneyRecord,
    NewComplaint, NewEmergencyReport, Refund, ReservationCode, SeatAvailability, SeatKey,
    TrainNumber, TrainSchedule,
};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::Store;

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    alloc: Mutex<()>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self {
            db: Arc::new(db),
            alloc: Mutex::new(()),
        })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn get<T: serde::de::DeserializeOwned>(&self, family: &str, key: &[u8]) -> Result<Option<T>> {
        let cf = self.cf(family)?;
        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn put<T: serde::Serialize>(&self, family: &str, key: &[u8], value: &T) -> Result<()> {
        let cf = self.cf(family)?;
        let value = Self::serialize(value)?;
        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    /// Highest numeric id in a column family keyed by [`keys::id_key`].
    fn last_id(&self, family: &str) -> Result<u64> {
        let cf = self.cf(family)?;
        match self.db.iterator_cf(&cf, IteratorMode::End).next() {
            Some(item) => {
                let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;
                keys::decode_id(&key).ok_or_else(|| {
                    StoreError::Serialization(format!("malformed id key in {family}"))
                })
            }
            None => Ok(0),
        }
    }

    /// Ids recorded in a reservation index, in ascending order.
    fn indexed_ids(&self, family: &str, code: &str) -> Result<Vec<u64>> {
        let cf = self.cf(family)?;
        let prefix = keys::reservation_prefix(code);
        let mut ids = Vec::new();

        for item in self
            .db
            .iterator_cf(&cf, IteratorMode::From(&prefix, Direction::Forward))
        {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            if !key.starts_with(&prefix) {
                break;
            }
            if let Some(id) = keys::id_from_index_key(&key) {
                ids.push(id);
            }
        }

        Ok(ids)
    }

    fn write_complaint(&self, complaint: &Complaint, previous: Option<&Complaint>) -> Result<()> {
        let cf_complaints = self.cf(cf::COMPLAINTS)?;
        let cf_index = self.cf(cf::COMPLAINTS_BY_RESERVATION)?;

        let key = keys::id_key(complaint.id.0);
        let value = Self::serialize(complaint)?;

        let mut batch = WriteBatch::default();
        if let Some(old) = previous {
            batch.delete_cf(
                &cf_index,
                keys::reservation_index_key(&old.reservation_code, old.id.0),
            );
        }
        batch.put_cf(&cf_complaints, key, &value);
        batch.put_cf(
            &cf_index,
            keys::reservation_index_key(&complaint.reservation_code, complaint.id.0),
            [],
        );

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))
    }
}

impl Store for RocksStore {
    // =========================================================================
    // Journeys
    // =========================================================================

    fn put_journey(&self, journey: &JourneyRecord) -> Result<()> {
        self.put(
            cf::JOURNEYS,
            &keys::journey_key(&journey.reservation_code),
            journey,
        )
    }

    fn get_journey(&self, code: &ReservationCode) -> Result<Option<JourneyRecord>> {
        self.get(cf::JOURNEYS, &keys::journey_key(code))
    }

    fn journey_count(&self) -> Result<usize> {
        let cf = self.cf(cf::JOURNEYS)?;
        let mut count = 0;
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            item.map_err(|e| StoreError::Database(e.to_string()))?;
            count += 1;
        }
        Ok(count)
    }

    // =========================================================================
    // Complaints
    // =========================================================================

    fn register_complaint(&self, complaint: NewComplaint) -> Result<Complaint> {
        let _guard = self.alloc.lock();
        let id = ComplaintId(self.last_id(cf::COMPLAINTS)? + 1);
        let complaint = complaint.into_complaint(id);
        self.write_complaint(&complaint, None)?;
        tracing::debug!(complaint_id = id.0, "complaint registered");
        Ok(complaint)
    }

    fn put_complaint(&self, complaint: &Complaint) -> Result<()> {
        let previous: Option<Complaint> =
            self.get(cf::COMPLAINTS, &keys::id_key(complaint.id.0))?;
        self.write_complaint(complaint, previous.as_ref())
    }

    fn complaints_by_reservation(&self, reservation_code: &str) -> Result<Vec<Complaint>> {
        let mut complaints = Vec::new();
        for id in self.indexed_ids(cf::COMPLAINTS_BY_RESERVATION, reservation_code)? {
            if let Some(complaint) = self.get(cf::COMPLAINTS, &keys::id_key(id))? {
                complaints.push(complaint);
            }
        }
        Ok(complaints)
    }

    fn update_complaint_status(
        &self,
        id: ComplaintId,
        status: ComplaintStatus,
        remarks: Option<String>,
    ) -> Result<Complaint> {
        let mut complaint: Complaint =
            self.get(cf::COMPLAINTS, &keys::id_key(id.0))?
                .ok_or_else(|| StoreError::NotFound {
                    entity: "complaint",
                    id: id.to_string(),
                })?;
        complaint.status = status;
        complaint.remarks = remarks;
        self.put(cf::COMPLAINTS, &keys::id_key(id.0), &complaint)?;
        Ok(complaint)
    }

    // =========================================================================
    // Emergency reports
    // =========================================================================

    fn file_emergency(&self, report: NewEmergencyReport) -> Result<EmergencyReport> {
        let _guard = self.alloc.lock();
        let sequence = self.last_id(cf::EMERGENCIES)? + 1;
        let report = report.into_report(EmergencyReportId::from_sequence(sequence));
        self.put(cf::EMERGENCIES, &keys::id_key(sequence), &report)?;
        tracing::debug!(report_id = %report.id, "emergency report filed");
        Ok(report)
    }

    fn put_emergency(&self, report: &EmergencyReport) -> Result<()> {
        let sequence = report.id.sequence().ok_or_else(|| {
            StoreError::Serialization(format!("emergency report id {} has no sequence", report.id))
        })?;
        self.put(cf::EMERGENCIES, &keys::id_key(sequence), report)
    }

    fn get_emergency(&self, id: &EmergencyReportId) -> Result<Option<EmergencyReport>> {
        match id.sequence() {
            Some(sequence) => self.get(cf::EMERGENCIES, &keys::id_key(sequence)),
            None => Ok(None),
        }
    }

    // =========================================================================
    // Refunds
    // =========================================================================

    fn put_refund(&self, refund: &Refund) -> Result<()> {
        let cf_refunds = self.cf(cf::REFUNDS)?;
        let cf_index = self.cf(cf::REFUNDS_BY_RESERVATION)?;
        let value = Self::serialize(refund)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_refunds, keys::id_key(refund.id.0), &value);
        batch.put_cf(
            &cf_index,
            keys::reservation_index_key(refund.reservation_code.as_str(), refund.id.0),
            [],
        );

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn refund_by_reservation(&self, code: &ReservationCode) -> Result<Option<Refund>> {
        for id in self.indexed_ids(cf::REFUNDS_BY_RESERVATION, code.as_str())? {
            if let Some(refund) = self.get(cf::REFUNDS, &keys::id_key(id))? {
                return Ok(Some(refund));
            }
        }
        Ok(None)
    }

    // =========================================================================
    // Schedules and seats
    // =========================================================================

    fn put_schedule(&self, schedule: &TrainSchedule) -> Result<()> {
        self.put(
            cf::SCHEDULES,
            &keys::schedule_key(&schedule.train_number),
            schedule,
        )
    }

    fn get_schedule(&self, train_number: &TrainNumber) -> Result<Option<TrainSchedule>> {
        self.get(cf::SCHEDULES, &keys::schedule_key(train_number))
    }

    fn put_seat_availability(&self, seats: &SeatAvailability) -> Result<()> {
        self.put(cf::SEATS, &keys::seat_key(&seats.key()), seats)
    }

    fn get_seat_availability(&self, key: &SeatKey) -> Result<Option<SeatAvailability>> {
        self.get(cf::SEATS, &keys::seat_key(key))
    }
}
