//! HTTP handlers.
//!
//! Department handlers answer provider callbacks with voice scripts; only
//! `health` and `voice::make_call` speak JSON.

pub mod complaints;
pub mod emergency;
pub mod health;
pub mod pnr;
pub mod refunds;
pub mod schedule;
pub mod seats;
pub mod voice;

use ivr_core::extract::non_blank;
use ivr_core::CallSid;
use serde::Deserialize;

/// Form fields the provider posts to recording callbacks.
///
/// Every field is optional: redirects carry no transcript, and transcription
/// may fail. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackForm {
    /// Provider call id.
    #[serde(rename = "CallSid")]
    pub call_sid: Option<String>,
    /// Transcribed caller speech.
    #[serde(rename = "TranscriptionText")]
    pub transcription_text: Option<String>,
    /// URL of the recorded audio.
    #[serde(rename = "RecordingUrl")]
    pub recording_url: Option<String>,
    /// Caller's phone number.
    #[serde(rename = "From")]
    pub from: Option<String>,
}

impl CallbackForm {
    /// The transcript, unless it is missing or blank.
    #[must_use]
    pub fn transcript(&self) -> Option<&str> {
        non_blank(self.transcription_text.as_deref())
    }

    /// The provider call id, unless it is missing or blank.
    #[must_use]
    pub fn call_sid(&self) -> Option<CallSid> {
        self.call_sid.as_deref().and_then(CallSid::new)
    }

    /// The caller's number, unless it is missing or blank.
    #[must_use]
    pub fn caller(&self) -> Option<&str> {
        non_blank(self.from.as_deref())
    }

    /// The recording URL, unless it is missing or blank.
    #[must_use]
    pub fn recording_url(&self) -> Option<&str> {
        non_blank(self.recording_url.as_deref())
    }
}
