//! Lightweight pattern extraction over caller transcripts.
//!
//! Transcripts arrive as free text from the speech-to-text provider. These
//! helpers pull the handful of structured values the dialog flows need out of
//! that text without any language model: digit filtering, fixed-length digit
//! runs, and the `my name is ...` phrase.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ids::ReservationCode;

/// Sentinel stored when no caller name could be extracted.
pub const UNKNOWN_PASSENGER: &str = "Unknown Passenger";

/// Sentinel stored when no value could be extracted for an optional field.
pub const UNKNOWN: &str = "Unknown";

static RESERVATION_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{10}\b").expect("reservation run pattern is valid"));

static TRAIN_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{5}\b").expect("train run pattern is valid"));

static NAME_PHRASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"my name is ([a-z ]+)").expect("name pattern is valid"));

/// Keep only the ASCII digits of `text`, in order.
#[must_use]
pub fn digits_only(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

/// Return the trimmed transcript, or `None` when it is missing or blank.
#[must_use]
pub fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

/// Find the first standalone ten digit run in the transcript.
#[must_use]
pub fn find_reservation_code(text: &str) -> Option<ReservationCode> {
    RESERVATION_RUN
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
}

/// Find the first standalone five digit run, the usual train number shape.
#[must_use]
pub fn find_train_number(text: &str) -> Option<String> {
    TRAIN_RUN.find(text).map(|m| m.as_str().to_string())
}

/// Extract the caller's name from a `my name is X` phrase.
///
/// Matching is case-insensitive; the captured letters and spaces are
/// title-cased. A phrase with nothing after it yields `None`.
#[must_use]
pub fn find_caller_name(text: &str) -> Option<String> {
    let lowered = text.to_lowercase();
    let captured = NAME_PHRASE.captures(&lowered)?.get(1)?.as_str().trim();
    (!captured.is_empty()).then(|| title_case(captured))
}

/// Uppercase the first cased character of every word and lowercase the rest.
///
/// A "word" starts at any letter that does not follow another letter, so
/// `"3a"` becomes `"3A"` and `"chair car"` becomes `"Chair Car"`.
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(ch);
            previous_is_letter = false;
        }
    }
    out
}

/// Trim whitespace and a single trailing full stop added by transcription.
#[must_use]
pub fn strip_sentence_end(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed.strip_suffix('.').unwrap_or(trimmed).trim_end()
}

/// Details pulled out of an intake transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeDetails {
    /// Caller name, or [`UNKNOWN_PASSENGER`].
    pub passenger_name: String,
    /// Reservation code if one was spoken.
    pub reservation_code: Option<ReservationCode>,
    /// Train number if one was spoken.
    pub train_number: Option<String>,
    /// The trimmed transcript.
    pub description: String,
}

impl IntakeDetails {
    /// Run every extractor over the transcript.
    #[must_use]
    pub fn from_transcript(text: &str) -> Self {
        let lowered = text.to_lowercase();
        Self {
            passenger_name: find_caller_name(&lowered)
                .unwrap_or_else(|| UNKNOWN_PASSENGER.to_string()),
            reservation_code: find_reservation_code(&lowered),
            train_number: find_train_number(&lowered),
            description: text.trim().to_string(),
        }
    }

    /// Reservation code as stored, falling back to [`UNKNOWN`].
    #[must_use]
    pub fn reservation_code_or_unknown(&self) -> String {
        self.reservation_code
            .as_ref()
            .map_or_else(|| UNKNOWN.to_string(), ToString::to_string)
    }
}
