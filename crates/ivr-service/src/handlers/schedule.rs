//! Train schedule department.

use std::sync::Arc;

use axum::extract::State;
use axum::Form;

use ivr_core::{Department, TrainNumber, TrainSchedule};

use super::CallbackForm;
use crate::flow::Dialog;
use crate::state::AppState;
use crate::twiml::VoiceScript;

/// Callback receiving the spoken train number.
pub const PROCESS_TRAIN_NUMBER: &str = "/train_schedule/process_train_number";

const TIME_FORMAT: &str = "%H:%M";

/// Ask for the train number.
pub async fn ask_train_number(State(state): State<Arc<AppState>>) -> VoiceScript {
    state
        .script()
        .say("Welcome to the Indian Railways train schedule department.")
        .pause(1)
        .say(
            "Please say your train number clearly after the beep, for example, \
             say one two six two seven for Karnataka Express.",
        )
        .record(6, 10, state.config.callback_url(PROCESS_TRAIN_NUMBER))
}

/// Read the timetable of the spoken train.
pub async fn process_train_number(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CallbackForm>,
) -> VoiceScript {
    let dialog = Dialog::new(&state, Department::TrainSchedule, &form);

    let Some(transcript) = form.transcript() else {
        return dialog.restart(
            dialog
                .script()
                .say("Sorry, I could not understand your train number. Let's try again."),
        );
    };

    let train = TrainNumber::from_transcript(transcript);
    tracing::info!(transcript = %transcript, train_number = %train, "schedule lookup");

    match state.store.get_schedule(&train) {
        Ok(Some(schedule)) => read_schedule(dialog.script(), &schedule),
        Ok(None) => dialog.restart(
            dialog
                .script()
                .say(format!(
                    "Sorry, I could not find any schedule for train number {train}."
                ))
                .pause(1)
                .say("Please check your train number and try again."),
        ),
        Err(e) => dialog.technical_failure(
            &e,
            "We are facing technical issues fetching the train schedule. Please try again later.",
        ),
    }
}

fn read_schedule(script: VoiceScript, schedule: &TrainSchedule) -> VoiceScript {
    script
        .say(format!(
            "Train number {}, {}, runs from {} to {}.",
            schedule.train_number, schedule.name, schedule.origin, schedule.destination
        ))
        .pause(1)
        .say(format!(
            "It departs from {} at {}, and arrives at {} at {}.",
            schedule.origin,
            schedule.departure.format(TIME_FORMAT),
            schedule.destination,
            schedule.arrival.format(TIME_FORMAT)
        ))
        .pause(1)
        .say(format!(
            "Total travel time is {}. This train operates on {}.",
            schedule.duration, schedule.days_of_operation
        ))
        .pause(1)
        .say("Thank you for calling the train schedule department. Have a pleasant journey.")
        .hangup()
}
