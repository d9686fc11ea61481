//! Outbound call integration tests against a mocked Twilio API.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use ivr_service::{ServiceConfig, TwilioClient};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ACCOUNT_SID: &str = "AC0123456789";

fn harness_for(mock: &MockServer) -> TestHarness {
    let client =
        TwilioClient::with_base_url(mock.uri(), ACCOUNT_SID, "auth-token", "+15005550006")
            .expect("client builds");
    TestHarness::with_twilio(ServiceConfig::default(), client)
}

#[tokio::test]
async fn call_is_placed_with_greeting() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/Accounts/{ACCOUNT_SID}/Calls.json")))
        .and(header_exists("authorization"))
        .and(body_string_contains("To=%2B919812345678"))
        .and(body_string_contains("Twiml="))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "sid": "CA42",
            "status": "queued",
            "to": "+919812345678"
        })))
        .expect(1)
        .mount(&mock)
        .await;
    let harness = harness_for(&mock);

    let response = harness
        .server
        .post("/voice/make_call")
        .form(&[("to_number", "+919812345678")])
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "Call initiated");
    assert_eq!(body["call_sid"], "CA42");
}

#[tokio::test]
async fn missing_number_is_bad_request() {
    let mock = MockServer::start().await;
    let harness = harness_for(&mock);

    let response = harness
        .server
        .post("/voice/make_call")
        .form(&[("to_number", " ")])
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(mock.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn provider_error_is_bad_gateway() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": 21211,
            "message": "The 'To' number is not a valid phone number.",
            "more_info": "https://www.twilio.com/docs/errors/21211"
        })))
        .mount(&mock)
        .await;
    let harness = harness_for(&mock);

    let response = harness
        .server
        .post("/voice/make_call")
        .form(&[("to_number", "12")])
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "external_service_error");
}

#[tokio::test]
async fn unconfigured_provider_is_bad_gateway() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/voice/make_call")
        .form(&[("to_number", "+919812345678")])
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
}
