//! Call entry and intent routing.

use std::sync::Arc;

use axum::extract::State;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

use ivr_core::classify;
use ivr_core::extract::non_blank;

use super::CallbackForm;
use crate::error::ApiError;
use crate::state::AppState;
use crate::twiml::VoiceScript;

/// Callback receiving the caller's stated intent.
pub const RECORDING_COMPLETE: &str = "/voice/recording_complete";

/// Greeting played on outbound calls.
pub const OUTBOUND_GREETING: &str = "Hello, this is the Indian Railways IVR system calling you.";

/// Answer an incoming call and ask what the caller needs.
pub async fn incoming(State(state): State<Arc<AppState>>) -> VoiceScript {
    tracing::info!("incoming call");
    state
        .script()
        .say("Welcome to Indian Railways Interactive Voice Response System.")
        .pause(1)
        .say(
            "Please clearly state your query after the beep. You can say things like: \
             Check P N R status, register a complaint, emergency help, train schedule, \
             seat availability, or refund status.",
        )
        .record(5, 20, state.config.callback_url(RECORDING_COMPLETE))
}

/// Route the caller to a department based on what they said.
pub async fn recording_complete(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CallbackForm>,
) -> VoiceScript {
    tracing::info!(
        call_sid = ?form.call_sid,
        recording_url = ?form.recording_url(),
        transcript = ?form.transcript(),
        "intent recording received"
    );

    let department = form.transcript().and_then(classify);
    let call = form.call_sid();

    let Some(department) = department else {
        if let Some(call) = &call {
            state.contexts.clear(call);
        }
        return state
            .script()
            .say("Sorry, I could not understand your request.")
            .say("Please try again or contact customer service.")
            .hangup();
    };

    tracing::info!(department = %department, call_sid = ?call, "routing call");
    if let Some(call) = &call {
        state.contexts.begin(call, department);
    }

    state
        .script()
        .say(department.acknowledgement())
        .redirect(state.config.callback_url(department.entry_path()))
}

/// Outbound call request.
#[derive(Debug, Deserialize)]
pub struct MakeCallRequest {
    /// Number to dial.
    pub to_number: Option<String>,
}

/// Outbound call response.
#[derive(Debug, Serialize)]
pub struct MakeCallResponse {
    /// Outcome description.
    pub status: String,
    /// Provider call id.
    pub call_sid: String,
}

/// Place an outbound call that plays a short greeting.
pub async fn make_call(
    State(state): State<Arc<AppState>>,
    Form(request): Form<MakeCallRequest>,
) -> Result<Json<MakeCallResponse>, ApiError> {
    let to = non_blank(request.to_number.as_deref())
        .ok_or_else(|| ApiError::BadRequest("to_number is required".into()))?;

    let twilio = state
        .twilio
        .as_ref()
        .ok_or_else(|| ApiError::ExternalService("Twilio is not configured".into()))?;

    let greeting = state.script().say(OUTBOUND_GREETING).render();
    let call = twilio.create_call(to, &greeting).await?;

    tracing::info!(call_sid = %call.sid, to = %to, "outbound call initiated");

    Ok(Json(MakeCallResponse {
        status: "Call initiated".to_string(),
        call_sid: call.sid,
    }))
}
