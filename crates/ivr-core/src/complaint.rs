//! Complaint records.
//!
//! Complaints are created by the intake flow and later progressed by an
//! administrative process. A reservation code may carry many complaints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ComplaintId;

/// Category recorded for complaints taken over the phone.
pub const DEFAULT_COMPLAINT_CATEGORY: &str = "General";

/// Contact recorded when the caller's number is not known.
pub const CONTACT_NOT_PROVIDED: &str = "Not Provided";

/// A registered complaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complaint {
    /// Auto-incrementing identifier.
    pub id: ComplaintId,
    /// Caller name, possibly the unknown-passenger sentinel.
    pub passenger_name: String,
    /// Reservation code, or the unknown sentinel.
    pub reservation_code: String,
    /// Contact number.
    pub contact: String,
    /// Category (e.g. Cleanliness, Delay).
    pub category: String,
    /// Free-text description.
    pub description: String,
    /// Date the complaint was registered.
    pub date: NaiveDate,
    /// Processing status.
    pub status: ComplaintStatus,
    /// Resolution remarks, if any.
    pub remarks: Option<String>,
}

/// Fields supplied when registering a complaint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComplaint {
    /// Caller name.
    pub passenger_name: String,
    /// Reservation code or sentinel.
    pub reservation_code: String,
    /// Contact number.
    pub contact: String,
    /// Category.
    pub category: String,
    /// Description.
    pub description: String,
    /// Registration date.
    pub date: NaiveDate,
}

impl NewComplaint {
    /// Materialize the complaint under `id` with status [`ComplaintStatus::Pending`].
    #[must_use]
    pub fn into_complaint(self, id: ComplaintId) -> Complaint {
        Complaint {
            id,
            passenger_name: self.passenger_name,
            reservation_code: self.reservation_code,
            contact: self.contact,
            category: self.category,
            description: self.description,
            date: self.date,
            status: ComplaintStatus::Pending,
            remarks: None,
        }
    }
}

/// Complaint processing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplaintStatus {
    /// Registered, not yet picked up.
    Pending,
    /// Being worked on.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Closed.
    Resolved,
}

impl ComplaintStatus {
    /// Label as stored and spoken.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_complaint_starts_pending() {
        let complaint = NewComplaint {
            passenger_name: "Rahul Sharma".into(),
            reservation_code: "1234567890".into(),
            contact: CONTACT_NOT_PROVIDED.into(),
            category: DEFAULT_COMPLAINT_CATEGORY.into(),
            description: "train was dirty".into(),
            date: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
        }
        .into_complaint(ComplaintId(6));

        assert_eq!(complaint.status, ComplaintStatus::Pending);
        assert_eq!(complaint.remarks, None);
        assert_eq!(complaint.id, ComplaintId(6));
    }

    #[test]
    fn in_progress_uses_spaced_label() {
        let json = serde_json::to_string(&ComplaintStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
    }
}
