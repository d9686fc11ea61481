//! Twilio REST API types.

use serde::Deserialize;

/// Twilio message resource.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    /// Message SID (`SM...`).
    pub sid: String,
    /// Delivery status (`queued`, `sent`, ...).
    #[serde(default)]
    pub status: Option<String>,
    /// Recipient.
    #[serde(default)]
    pub to: Option<String>,
}

/// Twilio call resource.
#[derive(Debug, Clone, Deserialize)]
pub struct Call {
    /// Call SID (`CA...`).
    pub sid: String,
    /// Call status (`queued`, `ringing`, ...).
    #[serde(default)]
    pub status: Option<String>,
    /// Callee.
    #[serde(default)]
    pub to: Option<String>,
}

/// Twilio error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TwilioErrorResponse {
    /// Twilio error code (e.g. 21211 for an invalid `To` number).
    #[serde(default)]
    pub code: Option<i64>,
    /// Human-readable message.
    pub message: String,
    /// Link to the error documentation.
    #[serde(default)]
    pub more_info: Option<String>,
}
