//! Emergency helpline.

use std::sync::Arc;

use axum::extract::State;
use axum::Form;
use chrono::Local;

use ivr_core::{
    Department, EmergencyKind, IntakeDetails, NewEmergencyReport, CONTACT_NOT_PROVIDED, UNKNOWN,
};

use super::CallbackForm;
use crate::flow::Dialog;
use crate::notify;
use crate::state::AppState;
use crate::twiml::VoiceScript;

/// Callback receiving the spoken emergency.
pub const PROCESS_EMERGENCY: &str = "/emergency/process_emergency";

/// Ask the caller to describe the emergency.
pub async fn ask_emergency(State(state): State<Arc<AppState>>) -> VoiceScript {
    state
        .script()
        .say("You have reached the Indian Railways emergency helpline.")
        .pause(1)
        .say(
            "Please describe your emergency clearly after the beep. Include details such as \
             your train number, station name, or type of emergency.",
        )
        .record(6, 25, state.config.callback_url(PROCESS_EMERGENCY))
}

/// File the emergency and alert the operations desk.
pub async fn process_emergency(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CallbackForm>,
) -> VoiceScript {
    let dialog = Dialog::new(&state, Department::Emergency, &form);

    let Some(transcript) = form.transcript() else {
        return dialog.restart(dialog.script().say(
            "Sorry, I could not understand your message. Please describe your emergency again.",
        ));
    };
    tracing::info!(
        transcript = %transcript,
        recording_url = ?form.recording_url(),
        "emergency transcript received"
    );

    let details = IntakeDetails::from_transcript(transcript);
    let report = NewEmergencyReport {
        kind: EmergencyKind::classify(&details.description),
        passenger_name: details.passenger_name,
        contact: form.caller().unwrap_or(CONTACT_NOT_PROVIDED).to_string(),
        description: details.description,
        train_number: details.train_number.unwrap_or_else(|| UNKNOWN.to_string()),
        coach: UNKNOWN.to_string(),
        seat: UNKNOWN.to_string(),
        location: UNKNOWN.to_string(),
        reported_at: Local::now().naive_local(),
        recording_url: form.recording_url().map(str::to_string),
    };

    let report = match state.store.file_emergency(report) {
        Ok(report) => report,
        Err(e) => {
            return dialog.technical_failure(
                &e,
                "Sorry, we encountered an issue while recording your emergency. \
                 Please call again immediately.",
            )
        }
    };

    tracing::warn!(
        report_id = %report.id,
        kind = report.kind.label(),
        train_number = %report.train_number,
        "emergency reported"
    );

    notify::dispatch(
        Arc::clone(&state.notifier),
        state.config.ops_alert_number.clone(),
        report.alert_text(),
    );

    dialog
        .script()
        .say(format!(
            "Your emergency has been reported with reference number {}. \
             Help is being notified immediately.",
            report.id
        ))
        .pause(1)
        .say("Please remain calm. Railway authorities are taking necessary action. Goodbye.")
        .hangup()
}
