//! Callback signature verification integration tests.

mod common;

use axum::http::StatusCode;
use common::{call_sid, callback_form, spoken, TestHarness};
use ivr_service::crypto::twilio_signature;
use ivr_service::ServiceConfig;

const TOKEN: &str = "test-auth-token";
const BASE: &str = "https://ivr.example.in";

fn verifying_harness() -> TestHarness {
    TestHarness::with_config(ServiceConfig {
        public_base_url: Some(BASE.into()),
        twilio_auth_token: Some(TOKEN.into()),
        verify_twilio_signature: true,
        ..Default::default()
    })
}

#[tokio::test]
async fn signed_callback_is_accepted() {
    let harness = verifying_harness();
    let form = callback_form(Some(&call_sid()), Some("1234567890"));
    let signature = twilio_signature(TOKEN, &format!("{BASE}/pnr_status/process_pnr"), &form);

    let response = harness
        .server
        .post("/pnr_status/process_pnr")
        .add_header("x-twilio-signature", signature)
        .form(&form)
        .await;

    response.assert_status_ok();
    assert!(spoken(&response.text())[0].contains("Rahul Sharma"));
}

#[tokio::test]
async fn unsigned_callback_is_rejected() {
    let harness = verifying_harness();

    let response = harness
        .server
        .post("/pnr_status/process_pnr")
        .form(&callback_form(Some(&call_sid()), Some("1234567890")))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "forbidden");
}

#[tokio::test]
async fn tampered_body_is_rejected() {
    let harness = verifying_harness();
    let signed = callback_form(Some(&call_sid()), Some("1234567890"));
    let signature = twilio_signature(TOKEN, &format!("{BASE}/pnr_status/process_pnr"), &signed);

    let response = harness
        .server
        .post("/pnr_status/process_pnr")
        .add_header("x-twilio-signature", signature)
        .form(&callback_form(Some(&call_sid()), Some("2345678901")))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn signature_for_another_path_is_rejected() {
    let harness = verifying_harness();
    let form = callback_form(Some(&call_sid()), Some("1234567890"));
    let signature = twilio_signature(TOKEN, &format!("{BASE}/refunds/process_refund_status"), &form);

    let response = harness
        .server
        .post("/pnr_status/process_pnr")
        .add_header("x-twilio-signature", signature)
        .form(&form)
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn public_endpoints_skip_verification() {
    let harness = verifying_harness();

    harness.server.get("/health").await.assert_status_ok();
    harness.server.get("/").await.assert_status_ok();
}

#[tokio::test]
async fn verification_is_off_by_default() {
    let harness = TestHarness::new();

    harness
        .post_callback("/pnr_status/process_pnr", Some(&call_sid()), Some("1234567890"))
        .await
        .assert_status_ok();
}
