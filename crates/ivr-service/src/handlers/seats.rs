//! Seat availability department.
//!
//! The lookup key is spoken in three parts, one recording each: train number,
//! journey date, then class. The first two are kept in the call context until
//! the class arrives.

use std::sync::Arc;

use axum::extract::State;
use axum::Form;

use ivr_core::seats::{normalize_class, normalize_spoken_date, parse_journey_date};
use ivr_core::{Department, SeatAvailability, SeatKey, TrainNumber};

use super::CallbackForm;
use crate::flow::Dialog;
use crate::state::AppState;
use crate::twiml::VoiceScript;

/// Callback receiving the train number.
pub const GET_DATE: &str = "/seat_availability/get_date";

/// Callback receiving the journey date.
pub const GET_CLASS: &str = "/seat_availability/get_class";

/// Callback receiving the travel class.
pub const CHECK_AVAILABILITY: &str = "/seat_availability/check_availability";

const LOST_TRACK: &str = "Sorry, I lost track of your journey details. Let's start again.";

/// Ask for the train number.
pub async fn ask_train_number(State(state): State<Arc<AppState>>) -> VoiceScript {
    state
        .script()
        .say("Welcome to the Indian Railways seat availability department.")
        .pause(1)
        .say(
            "Please say your train number clearly after the beep. For example, \
             say one two six two seven for Karnataka Express.",
        )
        .record(6, 10, state.config.callback_url(GET_DATE))
}

/// Remember the train number and ask for the journey date.
pub async fn get_date(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CallbackForm>,
) -> VoiceScript {
    let dialog = Dialog::new(&state, Department::SeatAvailability, &form);

    let Some(transcript) = form.transcript() else {
        return dialog.restart(
            dialog
                .script()
                .say("Sorry, I could not understand your train number. Let's try again."),
        );
    };

    let train = TrainNumber::from_transcript(transcript);
    tracing::info!(transcript = %transcript, train_number = %train, "seat query train");

    if let Some(call) = dialog.call() {
        state.contexts.set_seat_train(call, train.clone());
    }

    dialog
        .script()
        .say(format!("Got it. Your train number is {train}."))
        .pause(1)
        .say(
            "Now, please say the date of journey in year month date format, for example, \
             say two zero two five dash one one dash zero five.",
        )
        .record(6, 10, dialog.url(GET_CLASS))
}

/// Remember the journey date and ask for the class.
pub async fn get_class(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CallbackForm>,
) -> VoiceScript {
    let dialog = Dialog::new(&state, Department::SeatAvailability, &form);

    let Some(transcript) = form.transcript() else {
        return dialog.restart(
            dialog
                .script()
                .say("Sorry, I could not capture your journey date. Let's try again."),
        );
    };

    let Some(call) = dialog
        .call()
        .filter(|call| seat_train(&state, call).is_some())
    else {
        return dialog.restart(dialog.script().say(LOST_TRACK));
    };

    let date = normalize_spoken_date(transcript);
    tracing::info!(transcript = %transcript, date = %date, "seat query date");
    state.contexts.set_seat_date(call, date.clone());

    dialog
        .script()
        .say(format!("Okay. You are checking for date {date}."))
        .pause(1)
        .say("Please say the class type, like Sleeper, 3A, 2A, or Chair Car.")
        .record(6, 10, dialog.url(CHECK_AVAILABILITY))
}

/// Look up the assembled key and read the availability back.
pub async fn check_availability(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CallbackForm>,
) -> VoiceScript {
    let dialog = Dialog::new(&state, Department::SeatAvailability, &form);

    let Some(transcript) = form.transcript() else {
        return dialog.restart(
            dialog
                .script()
                .say("Sorry, I could not understand the class type. Let's try again."),
        );
    };

    let context = dialog.call().and_then(|call| state.contexts.get(call));
    let Some((train, date)) = context.and_then(|c| c.seat_train.zip(c.seat_date)) else {
        return dialog.restart(dialog.script().say(LOST_TRACK));
    };

    let class = normalize_class(transcript);
    tracing::info!(
        train_number = %train,
        date = %date,
        class = %class,
        "seat availability lookup"
    );

    let found = match parse_journey_date(&date) {
        Some(parsed) => state.store.get_seat_availability(&SeatKey {
            train_number: train.clone(),
            date: parsed,
            class: class.clone(),
        }),
        None => Ok(None),
    };

    match found {
        Ok(Some(seats)) => read_availability(dialog.script(), &seats),
        Ok(None) => dialog.restart(
            dialog
                .script()
                .say(format!(
                    "Sorry, no seat availability found for train number {train} on {date} in class {class}."
                ))
                .pause(1)
                .say("Please verify your details and try again."),
        ),
        Err(e) => dialog.technical_failure(
            &e,
            "We are facing some technical issues fetching seat availability. Please try again later.",
        ),
    }
}

fn seat_train(state: &AppState, call: &ivr_core::CallSid) -> Option<TrainNumber> {
    state.contexts.get(call).and_then(|c| c.seat_train)
}

fn read_availability(script: VoiceScript, seats: &SeatAvailability) -> VoiceScript {
    script
        .say(format!(
            "Train {}, {}, class {}, on {}.",
            seats.train_number, seats.train_name, seats.class, seats.date
        ))
        .pause(1)
        .say(format!(
            "There are {} seats available out of {} total seats.",
            seats.available_seats, seats.total_seats
        ))
        .pause(1)
        .say("Thank you for using Indian Railways seat availability service.")
        .hangup()
}
