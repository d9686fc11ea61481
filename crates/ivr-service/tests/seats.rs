//! Seat availability flow integration tests.

mod common;

use common::{call_sid, failing_server, hangs_up, record_action, redirect_target, spoken, TestHarness};

async fn walk(harness: &TestHarness, sid: &str, train: &str, date: &str, class: &str) -> String {
    harness
        .callback("/seat_availability/get_date", Some(sid), Some(train))
        .await;
    harness
        .callback("/seat_availability/get_class", Some(sid), Some(date))
        .await;
    harness
        .callback("/seat_availability/check_availability", Some(sid), Some(class))
        .await
}

#[tokio::test]
async fn entry_asks_for_train_number() {
    let harness = TestHarness::new();

    let xml = harness.server.post("/seat_availability").await.text();

    assert_eq!(
        spoken(&xml)[0],
        "Welcome to the Indian Railways seat availability department."
    );
    assert_eq!(record_action(&xml), Some("/seat_availability/get_date"));
}

#[tokio::test]
async fn each_step_echoes_and_asks_for_the_next_part() {
    let harness = TestHarness::new();
    let sid = call_sid();

    let xml = harness
        .callback("/seat_availability/get_date", Some(&sid), Some("1 2 6 2 7"))
        .await;
    assert_eq!(spoken(&xml)[0], "Got it. Your train number is 12627.");
    assert_eq!(record_action(&xml), Some("/seat_availability/get_class"));

    let xml = harness
        .callback("/seat_availability/get_class", Some(&sid), Some("2025 - 11 - 05."))
        .await;
    assert_eq!(spoken(&xml)[0], "Okay. You are checking for date 2025-11-05.");
    assert_eq!(
        record_action(&xml),
        Some("/seat_availability/check_availability")
    );
}

#[tokio::test]
async fn control_characters_in_transcript_are_not_echoed() {
    let harness = TestHarness::new();
    let sid = call_sid();

    harness
        .callback("/seat_availability/get_date", Some(&sid), Some("12627"))
        .await;
    let xml = harness
        .callback("/seat_availability/get_class", Some(&sid), Some("2025\u{1}-11-05"))
        .await;

    assert!(!xml.contains('\u{1}'));
    assert_eq!(spoken(&xml)[0], "Okay. You are checking for date 2025-11-05.");
}

#[tokio::test]
async fn availability_is_read_back() {
    let harness = TestHarness::new();

    let xml = walk(&harness, &call_sid(), "12627", "2025-11-05", "sleeper.").await;

    assert_eq!(
        spoken(&xml),
        vec![
            "Train 12627, Karnataka Express, class Sleeper, on 2025-11-05.".to_string(),
            "There are 35 seats available out of 200 total seats.".to_string(),
            "Thank you for using Indian Railways seat availability service.".to_string(),
        ]
    );
    assert!(hangs_up(&xml));
}

#[tokio::test]
async fn spoken_class_is_title_cased() {
    let harness = TestHarness::new();

    let xml = walk(&harness, &call_sid(), "12009", "2025-11-11", "chair car").await;

    assert!(spoken(&xml)[1].contains("18 seats available out of 100"));
}

#[tokio::test]
async fn repeating_the_last_step_repeats_the_answer() {
    let harness = TestHarness::new();
    let sid = call_sid();

    let first = walk(&harness, &sid, "12627", "2025-11-05", "3A").await;
    let second = harness
        .callback("/seat_availability/check_availability", Some(&sid), Some("3A"))
        .await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn concurrent_calls_do_not_share_answers() {
    let harness = TestHarness::new();
    let (a, b) = (call_sid(), call_sid());

    harness
        .callback("/seat_availability/get_date", Some(&a), Some("12627"))
        .await;
    harness
        .callback("/seat_availability/get_date", Some(&b), Some("12841"))
        .await;
    harness
        .callback("/seat_availability/get_class", Some(&b), Some("2025-11-06"))
        .await;
    harness
        .callback("/seat_availability/get_class", Some(&a), Some("2025-11-05"))
        .await;

    let xml_a = harness
        .callback("/seat_availability/check_availability", Some(&a), Some("Sleeper"))
        .await;
    let xml_b = harness
        .callback("/seat_availability/check_availability", Some(&b), Some("2A"))
        .await;

    assert!(spoken(&xml_a)[0].starts_with("Train 12627, Karnataka Express"));
    assert!(spoken(&xml_b)[0].starts_with("Train 12841, Coromandel Express"));
}

#[tokio::test]
async fn unknown_combination_restarts() {
    let harness = TestHarness::new();

    let xml = walk(&harness, &call_sid(), "12627", "2025-11-05", "1A").await;

    assert_eq!(
        spoken(&xml)[0],
        "Sorry, no seat availability found for train number 12627 on 2025-11-05 in class 1A."
    );
    assert_eq!(redirect_target(&xml), Some("/seat_availability"));
}

#[tokio::test]
async fn unparseable_date_is_a_miss() {
    let harness = TestHarness::new();

    let xml = walk(&harness, &call_sid(), "12627", "tomorrow", "Sleeper").await;

    assert!(spoken(&xml)[0].contains("on tomorrow in class Sleeper"));
    assert_eq!(redirect_target(&xml), Some("/seat_availability"));
}

#[tokio::test]
async fn steps_without_call_context_restart() {
    let harness = TestHarness::new();

    let xml = harness
        .callback("/seat_availability/get_class", None, Some("2025-11-05"))
        .await;
    assert_eq!(redirect_target(&xml), Some("/seat_availability"));

    let xml = harness
        .callback(
            "/seat_availability/check_availability",
            Some(&call_sid()),
            Some("Sleeper"),
        )
        .await;
    assert_eq!(redirect_target(&xml), Some("/seat_availability"));
    assert!(!hangs_up(&xml));
}

#[tokio::test]
async fn missing_parts_restart() {
    let harness = TestHarness::new();
    let sid = call_sid();

    let xml = harness
        .callback("/seat_availability/get_date", Some(&sid), None)
        .await;
    assert!(spoken(&xml)[0].contains("could not understand your train number"));

    harness
        .callback("/seat_availability/get_date", Some(&sid), Some("12627"))
        .await;
    let xml = harness
        .callback("/seat_availability/get_class", Some(&sid), None)
        .await;
    assert!(spoken(&xml)[0].contains("could not capture your journey date"));
    assert_eq!(redirect_target(&xml), Some("/seat_availability"));
}

#[tokio::test]
async fn storage_failure_hangs_up() {
    let (server, _) = failing_server();
    let sid = call_sid();

    for (path, text) in [
        ("/seat_availability/get_date", "12627"),
        ("/seat_availability/get_class", "2025-11-05"),
    ] {
        server
            .post(path)
            .form(&common::callback_form(Some(&sid), Some(text)))
            .await
            .assert_status_ok();
    }
    let xml = server
        .post("/seat_availability/check_availability")
        .form(&common::callback_form(Some(&sid), Some("Sleeper")))
        .await
        .text();

    assert!(spoken(&xml)[0].starts_with("We are facing some technical issues fetching seat availability"));
    assert!(hangs_up(&xml));
}
