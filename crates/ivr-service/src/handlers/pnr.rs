//! PNR status department.

use std::sync::Arc;

use axum::extract::State;
use axum::Form;

use ivr_core::{BookingStatus, Department, JourneyRecord, ReservationCode};

use super::CallbackForm;
use crate::flow::Dialog;
use crate::state::AppState;
use crate::twiml::VoiceScript;

/// Callback receiving the spoken reservation code.
pub const PROCESS_PNR: &str = "/pnr_status/process_pnr";

/// Ask for the reservation code.
pub async fn ask_reservation_code(State(state): State<Arc<AppState>>) -> VoiceScript {
    state
        .script()
        .say("Welcome to the Indian Railways P N R status department.")
        .pause(1)
        .say("Please say your ten digit P N R number clearly after the beep.")
        .record(6, 15, state.config.callback_url(PROCESS_PNR))
}

/// Look up the spoken reservation code and read the journey back.
pub async fn process_pnr(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CallbackForm>,
) -> VoiceScript {
    let dialog = Dialog::new(&state, Department::PnrStatus, &form);

    let Some(transcript) = form.transcript() else {
        return dialog.restart(
            dialog
                .script()
                .say("Sorry, I could not capture your P N R number. Let's try again."),
        );
    };
    tracing::info!(transcript = %transcript, "PNR transcript received");

    let Ok(code) = ReservationCode::from_transcript(transcript) else {
        return dialog.reject_reservation_code(transcript);
    };

    match state.store.get_journey(&code) {
        Ok(Some(journey)) => read_journey(dialog.script(), &journey),
        Ok(None) => dialog.restart(
            dialog
                .script()
                .say(format!("Sorry, no details found for P N R number {code}."))
                .pause(1)
                .say("Please verify your number and try again."),
        ),
        Err(e) => dialog.technical_failure(
            &e,
            "We are facing some technical issues fetching your P N R details. Please try again later.",
        ),
    }
}

fn read_journey(script: VoiceScript, journey: &JourneyRecord) -> VoiceScript {
    script
        .say(format!(
            "P N R number {} belongs to passenger {}.",
            journey.reservation_code, journey.passenger_name
        ))
        .pause(1)
        .say(format!(
            "You are booked on train {}, {}, seat number {} in coach {}, on {}.",
            journey.train_number, journey.train_name, journey.seat, journey.coach, journey.date
        ))
        .pause(1)
        .say(status_line(&journey.status))
        .pause(1)
        .say("Thank you for using Indian Railways P N R status service.")
        .hangup()
}

/// Closing sentence for a booking status.
#[must_use]
pub fn status_line(status: &BookingStatus) -> String {
    match status {
        BookingStatus::Confirmed => {
            "Your booking status is confirmed. Have a pleasant journey.".to_string()
        }
        BookingStatus::Waiting(_) => "Your booking is currently on the waiting list. \
                                   Please check again closer to your journey date."
            .to_string(),
        BookingStatus::Rac(_) => "Your booking is under R A C status. \
                               You will be allotted a seat upon chart preparation."
            .to_string(),
        BookingStatus::Other(label) => format!("Your booking status is {label}."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_lines_differ_per_status() {
        assert!(status_line(&BookingStatus::Confirmed).contains("confirmed"));
        assert!(status_line(&BookingStatus::from("Waiting")).contains("waiting list"));
        assert!(status_line(&BookingStatus::from("RAC 4")).contains("R A C"));
        assert_eq!(
            status_line(&BookingStatus::Other("Cancelled".into())),
            "Your booking status is Cancelled."
        );
    }
}
