//! Refund status flow integration tests.

mod common;

use common::{call_sid, failing_server, hangs_up, record_action, redirect_target, spoken, TestHarness};

#[tokio::test]
async fn entry_asks_for_reservation_code() {
    let harness = TestHarness::new();

    let xml = harness.server.post("/refunds").await.text();

    assert_eq!(
        spoken(&xml)[0],
        "Welcome to the Indian Railways refund and cancellation department."
    );
    assert_eq!(record_action(&xml), Some("/refunds/process_refund_status"));
}

#[tokio::test]
async fn refund_is_read_back_with_remarks() {
    let harness = TestHarness::new();

    let xml = harness
        .callback(
            "/refunds/process_refund_status",
            Some(&call_sid()),
            Some("3456789012"),
        )
        .await;

    assert_eq!(
        spoken(&xml),
        vec![
            "Refund details found for P N R number 3456789012.".to_string(),
            "Passenger name Amit Kumar. Refund amount of 980.50 rupees, paid via Net Banking, \
             is currently Processed as of 2025-10-27."
                .to_string(),
            "Refund successful.".to_string(),
            "Thank you for calling the refund department. Goodbye.".to_string(),
        ]
    );
    assert!(hangs_up(&xml));
}

#[tokio::test]
async fn whole_rupee_amounts_have_no_decimals() {
    let harness = TestHarness::new();

    let xml = harness
        .callback(
            "/refunds/process_refund_status",
            Some(&call_sid()),
            Some("1234567890"),
        )
        .await;

    assert!(spoken(&xml)[1].contains("Refund amount of 850 rupees, paid via UPI"));
}

#[tokio::test]
async fn unknown_reservation_restarts() {
    let harness = TestHarness::new();

    let xml = harness
        .callback(
            "/refunds/process_refund_status",
            Some(&call_sid()),
            Some("2020202020"),
        )
        .await;

    assert_eq!(
        spoken(&xml),
        vec![
            "Sorry, no refund record was found for P N R number 2020202020.".to_string(),
            "Please check your P N R number and try again.".to_string(),
        ]
    );
    assert_eq!(redirect_target(&xml), Some("/refunds"));
}

#[tokio::test]
async fn malformed_code_restarts() {
    let harness = TestHarness::new();

    let xml = harness
        .callback(
            "/refunds/process_refund_status",
            Some(&call_sid()),
            Some("my pnr is 123"),
        )
        .await;

    assert!(spoken(&xml)[0].contains("The number 123 you provided"));
    assert_eq!(redirect_target(&xml), Some("/refunds"));
}

#[tokio::test]
async fn storage_failure_hangs_up() {
    let (server, _) = failing_server();

    let xml = server
        .post("/refunds/process_refund_status")
        .form(&common::callback_form(Some(&call_sid()), Some("1234567890")))
        .await
        .text();

    assert!(spoken(&xml)[0].starts_with("We are unable to fetch your refund details"));
    assert!(hangs_up(&xml));
}

#[tokio::test]
async fn wrong_length_code_is_rejected_before_storage() {
    let (server, _) = failing_server();

    let xml = server
        .post("/refunds/process_refund_status")
        .form(&common::callback_form(Some(&call_sid()), Some("12345")))
        .await
        .text();

    let lines = spoken(&xml);
    assert!(lines[0].starts_with("The number 12345 you provided"));
    assert!(lines.iter().all(|l| !l.contains("unable to fetch")));
    assert_eq!(redirect_target(&xml), Some("/refunds"));
}
