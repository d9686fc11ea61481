//! Emergency reports.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::EmergencyReportId;

/// Maximum number of description characters forwarded in an alert.
pub const ALERT_EXCERPT_CHARS: usize = 150;

/// An emergency reported through the helpline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyReport {
    /// Report identifier (`E001`, ...).
    pub id: EmergencyReportId,
    /// Caller name, possibly the unknown-passenger sentinel.
    pub passenger_name: String,
    /// Contact number.
    pub contact: String,
    /// Kind of emergency.
    pub kind: EmergencyKind,
    /// What the caller said.
    pub description: String,
    /// Train number, or the unknown sentinel.
    pub train_number: String,
    /// Coach label, or the unknown sentinel.
    pub coach: String,
    /// Seat number, or the unknown sentinel.
    pub seat: String,
    /// Location description, or the unknown sentinel.
    pub location: String,
    /// When the report was taken.
    pub reported_at: NaiveDateTime,
    /// Handling status.
    pub status: EmergencyStatus,
    /// Provider reference to the caller's recording.
    pub recording_url: Option<String>,
}

impl EmergencyReport {
    /// Text sent to the operations desk when the report is filed.
    #[must_use]
    pub fn alert_text(&self) -> String {
        let excerpt: String = self.description.chars().take(ALERT_EXCERPT_CHARS).collect();
        format!(
            "Emergency Alert {} ({}): {excerpt}...",
            self.id,
            self.kind.label()
        )
    }
}

/// Fields supplied when filing an emergency report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmergencyReport {
    /// Caller name.
    pub passenger_name: String,
    /// Contact number.
    pub contact: String,
    /// Kind of emergency.
    pub kind: EmergencyKind,
    /// Description.
    pub description: String,
    /// Train number.
    pub train_number: String,
    /// Coach label.
    pub coach: String,
    /// Seat number.
    pub seat: String,
    /// Location.
    pub location: String,
    /// When the report was taken.
    pub reported_at: NaiveDateTime,
    /// Recording reference.
    pub recording_url: Option<String>,
}

impl NewEmergencyReport {
    /// Materialize the report under `id` with status [`EmergencyStatus::Pending`].
    #[must_use]
    pub fn into_report(self, id: EmergencyReportId) -> EmergencyReport {
        EmergencyReport {
            id,
            passenger_name: self.passenger_name,
            contact: self.contact,
            kind: self.kind,
            description: self.description,
            train_number: self.train_number,
            coach: self.coach,
            seat: self.seat,
            location: self.location,
            reported_at: self.reported_at,
            status: EmergencyStatus::Pending,
            recording_url: self.recording_url,
        }
    }
}

/// Kind of emergency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmergencyKind {
    /// Injury or illness.
    Medical,
    /// Fire or smoke.
    Fire,
    /// Theft, threats, suspicious objects.
    Security,
    /// Equipment failure.
    Technical,
    /// Anything else.
    General,
}

impl EmergencyKind {
    const KEYWORDS: &'static [(Self, &'static [&'static str])] = &[
        (
            Self::Medical,
            &["medical", "doctor", "injur", "faint", "sick", "heart", "bleed", "unconscious"],
        ),
        (Self::Fire, &["fire", "smoke", "burn", "flame"]),
        (
            Self::Security,
            &["theft", "stolen", "suspicious", "security", "attack", "weapon", "harass"],
        ),
        (
            Self::Technical,
            &["brake", "generator", "derail", "technical", "signal", "electric"],
        ),
    ];

    /// Pick a kind from keywords in the description.
    #[must_use]
    pub fn classify(description: &str) -> Self {
        let lowered = description.to_lowercase();
        Self::KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|w| lowered.contains(w)))
            .map_or(Self::General, |(kind, _)| *kind)
    }

    /// Label as stored.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Medical => "Medical",
            Self::Fire => "Fire",
            Self::Security => "Security",
            Self::Technical => "Technical",
            Self::General => "General",
        }
    }
}

/// Emergency handling status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmergencyStatus {
    /// Reported, not yet acknowledged.
    Pending,
    /// Responders engaged.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Closed.
    Resolved,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn report(description: &str) -> EmergencyReport {
        NewEmergencyReport {
            passenger_name: "Unknown Passenger".into(),
            contact: "+911234567890".into(),
            kind: EmergencyKind::classify(description),
            description: description.into(),
            train_number: "12627".into(),
            coach: "Unknown".into(),
            seat: "Unknown".into(),
            location: "Unknown".into(),
            reported_at: NaiveDate::from_ymd_opt(2025, 11, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            recording_url: None,
        }
        .into_report(EmergencyReportId::from_sequence(11))
    }

    #[test]
    fn kind_from_keywords() {
        assert_eq!(EmergencyKind::classify("Passenger fainted"), EmergencyKind::Medical);
        assert_eq!(EmergencyKind::classify("smoke in pantry"), EmergencyKind::Fire);
        assert_eq!(EmergencyKind::classify("my bag was stolen"), EmergencyKind::Security);
        assert_eq!(EmergencyKind::classify("brake is jammed"), EmergencyKind::Technical);
        assert_eq!(EmergencyKind::classify("please come"), EmergencyKind::General);
    }

    #[test]
    fn new_report_starts_pending() {
        let report = report("fire in coach");
        assert_eq!(report.status, EmergencyStatus::Pending);
        assert_eq!(report.id.as_str(), "E011");
    }

    #[test]
    fn alert_text_truncates_description() {
        let long = "x".repeat(400);
        let text = report(&long).alert_text();
        assert!(text.starts_with("Emergency Alert E011 (General): "));
        assert_eq!(text.matches('x').count(), ALERT_EXCERPT_CHARS);
    }
}
