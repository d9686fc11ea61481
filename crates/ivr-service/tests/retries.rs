//! Restart cap integration tests.

mod common;

use common::{call_sid, hangs_up, redirect_target, spoken, TestHarness};
use ivr_service::flow::OPERATOR_HANDOFF;
use ivr_service::ServiceConfig;

#[tokio::test]
async fn caller_is_handed_off_after_max_retries() {
    let harness = TestHarness::new();
    let sid = call_sid();

    for _ in 0..3 {
        let xml = harness
            .callback("/pnr_status/process_pnr", Some(&sid), None)
            .await;
        assert_eq!(redirect_target(&xml), Some("/pnr_status"));
    }

    let xml = harness
        .callback("/pnr_status/process_pnr", Some(&sid), None)
        .await;
    assert!(spoken(&xml).contains(&OPERATOR_HANDOFF.to_string()));
    assert!(hangs_up(&xml));
    assert_eq!(redirect_target(&xml), None);
}

#[tokio::test]
async fn lookup_misses_count_towards_the_cap() {
    let harness = TestHarness::with_config(ServiceConfig {
        max_retries: 1,
        ..Default::default()
    });
    let sid = call_sid();

    let first = harness
        .callback("/refunds/process_refund_status", Some(&sid), Some("2020202020"))
        .await;
    assert_eq!(redirect_target(&first), Some("/refunds"));

    let second = harness
        .callback("/refunds/process_refund_status", Some(&sid), Some("123"))
        .await;
    assert!(hangs_up(&second));
}

#[tokio::test]
async fn changing_department_resets_the_count() {
    let harness = TestHarness::with_config(ServiceConfig {
        max_retries: 1,
        ..Default::default()
    });
    let sid = call_sid();

    harness
        .callback("/pnr_status/process_pnr", Some(&sid), None)
        .await;
    harness
        .callback("/voice/recording_complete", Some(&sid), Some("refund"))
        .await;

    let xml = harness
        .callback("/refunds/process_refund_status", Some(&sid), None)
        .await;
    assert_eq!(redirect_target(&xml), Some("/refunds"));
}

#[tokio::test]
async fn calls_are_capped_independently() {
    let harness = TestHarness::with_config(ServiceConfig {
        max_retries: 1,
        ..Default::default()
    });
    let (a, b) = (call_sid(), call_sid());

    harness
        .callback("/train_schedule/process_train_number", Some(&a), Some("99999"))
        .await;

    let xml = harness
        .callback("/train_schedule/process_train_number", Some(&b), Some("99999"))
        .await;
    assert_eq!(redirect_target(&xml), Some("/train_schedule"));
}

#[tokio::test]
async fn handoff_clears_the_call() {
    let harness = TestHarness::with_config(ServiceConfig {
        max_retries: 0,
        ..Default::default()
    });
    let sid = call_sid();

    let xml = harness
        .callback("/emergency/process_emergency", Some(&sid), None)
        .await;
    assert!(hangs_up(&xml));

    let call = ivr_core::CallSid::new(&sid).unwrap();
    assert!(harness.contexts.get(&call).is_none());
}

#[tokio::test]
async fn callbacks_without_call_sid_are_never_capped() {
    let harness = TestHarness::with_config(ServiceConfig {
        max_retries: 0,
        ..Default::default()
    });

    for _ in 0..3 {
        let xml = harness.callback("/pnr_status/process_pnr", None, None).await;
        assert_eq!(redirect_target(&xml), Some("/pnr_status"));
    }
}
