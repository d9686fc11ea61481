//! Refund records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{RefundId, ReservationCode, TrainNumber};

/// A refund issued against a reservation.
///
/// Amounts are stored as integer paise (1 rupee = 100 paise) to avoid
/// floating point drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refund {
    /// Auto-incrementing identifier.
    pub id: RefundId,
    /// Reservation the refund belongs to.
    pub reservation_code: ReservationCode,
    /// Passenger name.
    pub passenger_name: String,
    /// Train number.
    pub train_number: TrainNumber,
    /// Refund amount in paise.
    pub amount_paise: i64,
    /// Payment instrument (UPI, card, ...).
    pub payment_mode: String,
    /// Processing status.
    pub status: RefundStatus,
    /// Date of the last status change.
    pub date: NaiveDate,
    /// Remarks from the payments team.
    pub remarks: Option<String>,
}

impl Refund {
    /// Amount in rupees for speech: `850` or `980.50`.
    #[must_use]
    pub fn amount_rupees(&self) -> String {
        let rupees = self.amount_paise / 100;
        let paise = self.amount_paise % 100;
        if paise == 0 {
            rupees.to_string()
        } else {
            format!("{rupees}.{paise:02}")
        }
    }
}

/// Refund processing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefundStatus {
    /// Paid out.
    Processed,
    /// Awaiting processing.
    Pending,
    /// Payment attempt failed.
    Failed,
}

impl RefundStatus {
    /// Label as stored and spoken.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Processed => "Processed",
            Self::Pending => "Pending",
            Self::Failed => "Failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refund(amount_paise: i64) -> Refund {
        Refund {
            id: RefundId(1),
            reservation_code: "1234567890".parse().unwrap(),
            passenger_name: "Rahul Sharma".into(),
            train_number: TrainNumber::new("12627"),
            amount_paise,
            payment_mode: "UPI".into(),
            status: RefundStatus::Processed,
            date: NaiveDate::from_ymd_opt(2025, 10, 25).unwrap(),
            remarks: None,
        }
    }

    #[test]
    fn whole_rupees_have_no_fraction() {
        assert_eq!(refund(85_000).amount_rupees(), "850");
    }

    #[test]
    fn fractional_rupees_keep_two_places() {
        assert_eq!(refund(98_050).amount_rupees(), "980.50");
        assert_eq!(refund(98_005).amount_rupees(), "980.05");
    }
}
