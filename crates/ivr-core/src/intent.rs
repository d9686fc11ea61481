//! Keyword-based department routing.
//!
//! The router is an ordered table of keyword rules. A transcript is matched
//! against the rules top to bottom and the first rule with any keyword
//! contained in the lower-cased transcript decides the department.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The passenger-service departments a call can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    /// Reservation (PNR) status enquiries.
    PnrStatus,
    /// Complaint registration.
    Complaints,
    /// Emergency helpline.
    Emergency,
    /// Train schedule enquiries.
    TrainSchedule,
    /// Seat availability enquiries.
    SeatAvailability,
    /// Refund status enquiries.
    Refunds,
}

impl Department {
    /// Every department, in routing priority order.
    pub const ALL: [Self; 6] = [
        Self::PnrStatus,
        Self::Complaints,
        Self::Emergency,
        Self::TrainSchedule,
        Self::SeatAvailability,
        Self::Refunds,
    ];

    /// Path of the department's first dialog step.
    #[must_use]
    pub const fn entry_path(self) -> &'static str {
        match self {
            Self::PnrStatus => "/pnr_status",
            Self::Complaints => "/complaints",
            Self::Emergency => "/emergency",
            Self::TrainSchedule => "/train_schedule",
            Self::SeatAvailability => "/seat_availability",
            Self::Refunds => "/refunds",
        }
    }

    /// Sentence spoken when the router hands the call over.
    #[must_use]
    pub const fn acknowledgement(self) -> &'static str {
        match self {
            Self::PnrStatus => "Redirecting you to the P N R status department.",
            Self::Complaints => "Redirecting you to the complaints department.",
            Self::Emergency => "Connecting you to emergency services.",
            Self::TrainSchedule => "Redirecting you to the train schedule department.",
            Self::SeatAvailability => "Redirecting you to the seat availability department.",
            Self::Refunds => "Redirecting you to the refund department.",
        }
    }

    /// Short machine-friendly name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PnrStatus => "pnr_status",
            Self::Complaints => "complaints",
            Self::Emergency => "emergency",
            Self::TrainSchedule => "train_schedule",
            Self::SeatAvailability => "seat_availability",
            Self::Refunds => "refunds",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single routing rule: any keyword hit selects the department.
#[derive(Debug, Clone, Copy)]
pub struct RoutingRule {
    /// Lower-case keywords checked as substrings.
    pub keywords: &'static [&'static str],
    /// Department selected when a keyword matches.
    pub department: Department,
}

impl RoutingRule {
    /// Whether any keyword occurs in the (already lower-cased) transcript.
    #[must_use]
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// Routing rules in priority order. The first match wins.
pub const ROUTING_RULES: &[RoutingRule] = &[
    RoutingRule {
        keywords: &["pnr", "status"],
        department: Department::PnrStatus,
    },
    RoutingRule {
        keywords: &["complaint", "issue", "problem"],
        department: Department::Complaints,
    },
    RoutingRule {
        keywords: &["emergency", "help", "accident"],
        department: Department::Emergency,
    },
    RoutingRule {
        keywords: &["schedule", "time", "train"],
        department: Department::TrainSchedule,
    },
    RoutingRule {
        keywords: &["seat", "availability", "booking"],
        department: Department::SeatAvailability,
    },
    RoutingRule {
        keywords: &["refund", "cancel", "money"],
        department: Department::Refunds,
    },
];

/// Classify a transcript against [`ROUTING_RULES`].
///
/// Returns `None` for an empty or unmatched transcript.
#[must_use]
pub fn classify(transcript: &str) -> Option<Department> {
    classify_with(ROUTING_RULES, transcript)
}

/// Classify a transcript against an explicit rule table.
#[must_use]
pub fn classify_with(rules: &[RoutingRule], transcript: &str) -> Option<Department> {
    let lowered = transcript.to_lowercase();
    rules
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.department)
}
