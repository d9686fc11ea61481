//! Common test utilities for IVR integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum_test::{TestResponse, TestServer};
use parking_lot::Mutex;

use ivr_core::{
    Complaint, ComplaintId, ComplaintStatus, EmergencyReport, EmergencyReportId, JourneyRecord,
    NewComplaint, NewEmergencyReport, Refund, ReservationCode, SeatAvailability, SeatKey,
    TrainNumber, TrainSchedule,
};
use ivr_service::notify::{Notifier, NotifyError};
use ivr_service::{create_router, AppState, CallContexts, ServiceConfig, TwilioClient};
use ivr_store::{MemoryStore, Store, StoreError};

/// Notifier that remembers every alert instead of sending it.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    /// Alerts sent so far as (recipient, body).
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().clone()
    }

    /// Wait for the detached alert task to run.
    pub async fn wait_for(&self, count: usize) -> Vec<(String, String)> {
        for _ in 0..100 {
            if self.sent.lock().len() >= count {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.sent()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_sms(&self, to: &str, body: &str) -> Result<(), NotifyError> {
        self.sent.lock().push((to.to_string(), body.to_string()));
        Ok(())
    }
}

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// The seeded store behind the server.
    pub store: Arc<MemoryStore>,
    /// Alerts captured from the emergency flow.
    pub notifier: Arc<RecordingNotifier>,
    /// Call contexts shared with the server.
    pub contexts: Arc<CallContexts>,
}

impl TestHarness {
    /// Create a harness with default configuration and the sample data.
    pub fn new() -> Self {
        Self::with_config(ServiceConfig::default())
    }

    /// Create a harness with the given configuration and the sample data.
    pub fn with_config(config: ServiceConfig) -> Self {
        Self::build(config, None)
    }

    /// Create a harness whose outbound calls go through `twilio`.
    pub fn with_twilio(config: ServiceConfig, twilio: TwilioClient) -> Self {
        Self::build(config, Some(Arc::new(twilio)))
    }

    fn build(config: ServiceConfig, twilio: Option<Arc<TwilioClient>>) -> Self {
        let store = Arc::new(MemoryStore::new());
        ivr_store::seed::load(store.as_ref()).expect("Failed to seed store");

        let notifier = Arc::new(RecordingNotifier::default());
        let state = AppState::with_parts(
            Arc::clone(&store) as Arc<dyn Store>,
            config,
            Arc::clone(&notifier) as Arc<dyn Notifier>,
            twilio,
        );
        let contexts = Arc::clone(&state.contexts);

        let router: Router = create_router(state);
        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            store,
            notifier,
            contexts,
        }
    }

    /// Post a provider callback and return the rendered script.
    pub async fn callback(
        &self,
        path: &str,
        call_sid: Option<&str>,
        transcript: Option<&str>,
    ) -> String {
        let response = self.post_callback(path, call_sid, transcript).await;
        response.assert_status_ok();
        response.text()
    }

    /// Post a provider callback without asserting on the response.
    pub async fn post_callback(
        &self,
        path: &str,
        call_sid: Option<&str>,
        transcript: Option<&str>,
    ) -> TestResponse {
        self.server
            .post(path)
            .form(&callback_form(call_sid, transcript))
            .await
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Form pairs for a recording callback.
pub fn callback_form(call_sid: Option<&str>, transcript: Option<&str>) -> Vec<(String, String)> {
    let mut form = vec![(
        "RecordingUrl".to_string(),
        "https://api.twilio.com/recordings/RE123".to_string(),
    )];
    if let Some(sid) = call_sid {
        form.push(("CallSid".to_string(), sid.to_string()));
    }
    if let Some(text) = transcript {
        form.push(("TranscriptionText".to_string(), text.to_string()));
    }
    form
}

/// A fresh provider call id.
pub fn call_sid() -> String {
    format!("CA{}", uuid::Uuid::new_v4().simple())
}

/// Spoken lines of a rendered script, unescaped enough for assertions.
pub fn spoken(xml: &str) -> Vec<String> {
    xml.split("<Say ")
        .skip(1)
        .filter_map(|chunk| {
            let start = chunk.find('>')? + 1;
            let end = chunk.find("</Say>")?;
            Some(chunk[start..end].replace("&apos;", "'").replace("&amp;", "&"))
        })
        .collect()
}

/// Whether a rendered script ends the call.
pub fn hangs_up(xml: &str) -> bool {
    xml.contains("<Hangup/>")
}

/// The redirect target of a rendered script, if any.
pub fn redirect_target(xml: &str) -> Option<&str> {
    let start = xml.find("<Redirect>")? + "<Redirect>".len();
    let end = xml.find("</Redirect>")?;
    Some(&xml[start..end])
}

/// The action of the recording a script ends with, if any.
pub fn record_action(xml: &str) -> Option<&str> {
    let record = &xml[xml.find("<Record ")?..];
    let start = record.find("action=\"")? + "action=\"".len();
    let end = start + record[start..].find('"')?;
    Some(&record[start..end])
}

/// Store whose every operation fails.
pub struct FailingStore;

fn unavailable<T>() -> ivr_store::Result<T> {
    Err(StoreError::Unavailable("disk on fire".into()))
}

impl Store for FailingStore {
    fn put_journey(&self, _: &JourneyRecord) -> ivr_store::Result<()> {
        unavailable()
    }
    fn get_journey(&self, _: &ReservationCode) -> ivr_store::Result<Option<JourneyRecord>> {
        unavailable()
    }
    fn journey_count(&self) -> ivr_store::Result<usize> {
        unavailable()
    }
    fn register_complaint(&self, _: NewComplaint) -> ivr_store::Result<Complaint> {
        unavailable()
    }
    fn put_complaint(&self, _: &Complaint) -> ivr_store::Result<()> {
        unavailable()
    }
    fn complaints_by_reservation(&self, _: &str) -> ivr_store::Result<Vec<Complaint>> {
        unavailable()
    }
    fn update_complaint_status(
        &self,
        _: ComplaintId,
        _: ComplaintStatus,
        _: Option<String>,
    ) -> ivr_store::Result<Complaint> {
        unavailable()
    }
    fn file_emergency(&self, _: NewEmergencyReport) -> ivr_store::Result<EmergencyReport> {
        unavailable()
    }
    fn put_emergency(&self, _: &EmergencyReport) -> ivr_store::Result<()> {
        unavailable()
    }
    fn get_emergency(&self, _: &EmergencyReportId) -> ivr_store::Result<Option<EmergencyReport>> {
        unavailable()
    }
    fn put_refund(&self, _: &Refund) -> ivr_store::Result<()> {
        unavailable()
    }
    fn refund_by_reservation(&self, _: &ReservationCode) -> ivr_store::Result<Option<Refund>> {
        unavailable()
    }
    fn put_schedule(&self, _: &TrainSchedule) -> ivr_store::Result<()> {
        unavailable()
    }
    fn get_schedule(&self, _: &TrainNumber) -> ivr_store::Result<Option<TrainSchedule>> {
        unavailable()
    }
    fn put_seat_availability(&self, _: &SeatAvailability) -> ivr_store::Result<()> {
        unavailable()
    }
    fn get_seat_availability(&self, _: &SeatKey) -> ivr_store::Result<Option<SeatAvailability>> {
        unavailable()
    }
}

/// A server backed by [`FailingStore`].
pub fn failing_server() -> (TestServer, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let state = AppState::with_parts(
        Arc::new(FailingStore),
        ServiceConfig::default(),
        Arc::clone(&notifier) as Arc<dyn Notifier>,
        None,
    );
    let server = TestServer::new(create_router(state)).expect("Failed to create test server");
    (server, notifier)
}
