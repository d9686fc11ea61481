//! Twilio integration for outbound calls and SMS alerts.
//!
//! Twilio handles:
//! - Outbound greeting calls
//! - SMS alerts to the operations desk

pub mod client;
pub mod types;

pub use client::TwilioClient;
pub use client::TwilioError;
pub use types::*;
