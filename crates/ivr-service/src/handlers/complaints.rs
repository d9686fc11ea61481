//! Complaints department: intake and status lookup.

use std::sync::Arc;

use axum::extract::State;
use axum::Form;
use chrono::Local;

use ivr_core::complaint::{CONTACT_NOT_PROVIDED, DEFAULT_COMPLAINT_CATEGORY};
use ivr_core::{Complaint, Department, IntakeDetails, NewComplaint, ReservationCode};

use super::CallbackForm;
use crate::flow::Dialog;
use crate::state::AppState;
use crate::twiml::VoiceScript;

/// Callback receiving the spoken complaint.
pub const RECORD_COMPLETE: &str = "/complaints/record_complete";

/// First step of the status lookup.
pub const STATUS: &str = "/complaints/status";

/// Callback receiving the reservation code for a status lookup.
pub const GET_STATUS: &str = "/complaints/get_status";

/// Spoken when a complaint carries no remarks yet.
const NO_REMARKS: &str = "Pending review.";

/// Ask the caller to describe the complaint.
pub async fn ask_complaint(State(state): State<Arc<AppState>>) -> VoiceScript {
    state
        .script()
        .say("You are now connected to the Indian Railways Complaints Department.")
        .pause(1)
        .say(
            "Please state your name, P N R number, and describe your complaint clearly after the beep.",
        )
        .record(5, 30, state.config.callback_url(RECORD_COMPLETE))
}

/// Register the spoken complaint.
pub async fn record_complete(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CallbackForm>,
) -> VoiceScript {
    let dialog = Dialog::new(&state, Department::Complaints, &form);

    let Some(transcript) = form.transcript() else {
        return dialog.restart(
            dialog
                .script()
                .say("Sorry, I could not hear your complaint properly. Please try again."),
        );
    };
    tracing::info!(
        transcript = %transcript,
        recording_url = ?form.recording_url(),
        "complaint transcript received"
    );

    let details = IntakeDetails::from_transcript(transcript);
    let complaint = NewComplaint {
        reservation_code: details.reservation_code_or_unknown(),
        passenger_name: details.passenger_name,
        contact: form.caller().unwrap_or(CONTACT_NOT_PROVIDED).to_string(),
        category: DEFAULT_COMPLAINT_CATEGORY.to_string(),
        description: details.description,
        date: Local::now().date_naive(),
    };

    match state.store.register_complaint(complaint) {
        Ok(complaint) => {
            tracing::info!(
                complaint_id = %complaint.id,
                reservation_code = %complaint.reservation_code,
                "complaint registered"
            );
            dialog
                .script()
                .say(format!(
                    "Thank you {}. Your complaint has been registered successfully. \
                     Your complaint ID is {}. We will review it soon.",
                    complaint.passenger_name, complaint.id
                ))
                .hangup()
        }
        Err(e) => dialog.technical_failure(
            &e,
            "Sorry, there was a problem registering your complaint. Please try again later.",
        ),
    }
}

/// Ask for the reservation code whose complaints should be read back.
pub async fn ask_status(State(state): State<Arc<AppState>>) -> VoiceScript {
    state
        .script()
        .say("You are now connected to the Indian Railways Complaints Department.")
        .pause(1)
        .say("Please say your ten digit P N R number after the beep to hear the status of your complaints.")
        .record(6, 15, state.config.callback_url(GET_STATUS))
}

/// Read back every complaint filed against the spoken reservation code.
pub async fn get_status(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CallbackForm>,
) -> VoiceScript {
    let dialog = Dialog::new(&state, Department::Complaints, &form).starting_at(STATUS);

    let Some(transcript) = form.transcript() else {
        return dialog.restart(
            dialog
                .script()
                .say("Sorry, I could not capture your P N R number. Let's try again."),
        );
    };

    let Ok(code) = ReservationCode::from_transcript(transcript) else {
        return dialog.reject_reservation_code(transcript);
    };

    let complaints = match state.store.complaints_by_reservation(code.as_str()) {
        Ok(complaints) => complaints,
        Err(e) => {
            return dialog.technical_failure(
                &e,
                "We are facing some technical issues fetching your complaint details. \
                 Please try again later.",
            )
        }
    };

    if complaints.is_empty() {
        return dialog
            .script()
            .say(format!("No complaints found for P N R number {code}."))
            .hangup();
    }

    let plural = if complaints.len() == 1 { "" } else { "s" };
    let mut script = dialog
        .script()
        .say(format!("You have {} complaint record{plural}.", complaints.len()));
    for complaint in &complaints {
        script = script.say(status_sentence(complaint)).pause(1);
    }
    script
        .say("Thank you for contacting the Indian Railways complaints department.")
        .hangup()
}

fn status_sentence(complaint: &Complaint) -> String {
    let remarks = complaint.remarks.as_deref().unwrap_or(NO_REMARKS);
    format!(
        "Complaint ID {} on {} is currently {}. {remarks}",
        complaint.id,
        complaint.date,
        complaint.status.label()
    )
}
