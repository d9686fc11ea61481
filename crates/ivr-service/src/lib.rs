//! Railway IVR HTTP service.
//!
//! This crate answers the telephony provider's voice callbacks for the
//! passenger helpline:
//!
//! - Call entry and spoken-intent routing
//! - PNR status, train schedule, seat availability and refund lookups
//! - Complaint intake and complaint status
//! - Emergency reports with an SMS alert to the operations desk
//! - Outbound calls
//!
//! Each callback is answered with a voice script (TwiML). Per-call state
//! that spans several callbacks lives in [`context::CallContexts`].
//!
//! # Authentication
//!
//! When enabled, provider callbacks must carry a valid `X-Twilio-Signature`
//! (see [`auth`]).

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::unused_async)] // Entry-step handlers never await

pub mod auth;
pub mod config;
pub mod context;
pub mod crypto;
pub mod error;
pub mod flow;
pub mod handlers;
pub mod notify;
pub mod routes;
pub mod state;
pub mod twilio;
pub mod twiml;

pub use config::ServiceConfig;
pub use context::{CallContext, CallContexts};
pub use error::ApiError;
pub use notify::{Notifier, NotifyError};
pub use routes::create_router;
pub use state::AppState;
pub use twilio::{TwilioClient, TwilioError};
pub use twiml::VoiceScript;
