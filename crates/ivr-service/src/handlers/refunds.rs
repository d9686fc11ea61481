//! Refund and cancellation department.

use std::sync::Arc;

use axum::extract::State;
use axum::Form;

use ivr_core::{Department, Refund, ReservationCode};

use super::CallbackForm;
use crate::flow::Dialog;
use crate::state::AppState;
use crate::twiml::VoiceScript;

/// Callback receiving the spoken reservation code.
pub const PROCESS_REFUND_STATUS: &str = "/refunds/process_refund_status";

/// Ask for the reservation code.
pub async fn ask_reservation_code(State(state): State<Arc<AppState>>) -> VoiceScript {
    state
        .script()
        .say("Welcome to the Indian Railways refund and cancellation department.")
        .pause(1)
        .say("Please say your P N R number clearly after the beep to check your refund status.")
        .record(6, 15, state.config.callback_url(PROCESS_REFUND_STATUS))
}

/// Read back the refund issued against the spoken reservation code.
pub async fn process_refund_status(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CallbackForm>,
) -> VoiceScript {
    let dialog = Dialog::new(&state, Department::Refunds, &form);

    let Some(transcript) = form.transcript() else {
        return dialog.restart(
            dialog
                .script()
                .say("Sorry, I could not understand your P N R number. Let's try again."),
        );
    };
    tracing::info!(transcript = %transcript, "refund transcript received");

    let Ok(code) = ReservationCode::from_transcript(transcript) else {
        return dialog.reject_reservation_code(transcript);
    };

    match state.store.refund_by_reservation(&code) {
        Ok(Some(refund)) => read_refund(dialog.script(), &refund),
        Ok(None) => dialog.restart(
            dialog
                .script()
                .say(format!(
                    "Sorry, no refund record was found for P N R number {code}."
                ))
                .pause(1)
                .say("Please check your P N R number and try again."),
        ),
        Err(e) => dialog.technical_failure(
            &e,
            "We are unable to fetch your refund details at the moment. Please try again later.",
        ),
    }
}

fn read_refund(script: VoiceScript, refund: &Refund) -> VoiceScript {
    let mut script = script
        .say(format!(
            "Refund details found for P N R number {}.",
            refund.reservation_code
        ))
        .pause(1)
        .say(format!(
            "Passenger name {}. Refund amount of {} rupees, paid via {}, is currently {} as of {}.",
            refund.passenger_name,
            refund.amount_rupees(),
            refund.payment_mode,
            refund.status.label(),
            refund.date
        ));
    if let Some(remarks) = &refund.remarks {
        script = script.say(remarks.clone());
    }
    script
        .pause(1)
        .say("Thank you for calling the refund department. Goodbye.")
        .hangup()
}
