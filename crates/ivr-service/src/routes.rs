//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::handlers::{complaints, emergency, health, pnr, refunds, schedule, seats, voice};
use crate::state::AppState;

/// Maximum concurrent provider callbacks.
const VOICE_MAX_CONCURRENT_REQUESTS: usize = 200;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /` - Banner
/// - `GET /health` - Health check
/// - `POST /voice/make_call` - Place an outbound call
///
/// ## Provider callbacks (signature verified when enabled)
/// - `/voice/incoming`, `/voice/recording_complete`
/// - `/pnr_status`, `/pnr_status/process_pnr`
/// - `/complaints`, `/complaints/record_complete`
/// - `/complaints/status`, `/complaints/get_status`
/// - `/emergency`, `/emergency/process_emergency`
/// - `/train_schedule`, `/train_schedule/process_train_number`
/// - `/seat_availability`, `/seat_availability/get_date`,
///   `/seat_availability/get_class`, `/seat_availability/check_availability`
/// - `/refunds`, `/refunds/process_refund_status`
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.cors_origins);
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let state = Arc::new(state);

    // Entry steps are reached by redirect, which the provider may issue as GET.
    let callbacks = Router::new()
        .route("/voice/incoming", get(voice::incoming).post(voice::incoming))
        .route(voice::RECORDING_COMPLETE, post(voice::recording_complete))
        .route(
            "/pnr_status",
            get(pnr::ask_reservation_code).post(pnr::ask_reservation_code),
        )
        .route(pnr::PROCESS_PNR, post(pnr::process_pnr))
        .route(
            "/complaints",
            get(complaints::ask_complaint).post(complaints::ask_complaint),
        )
        .route(complaints::RECORD_COMPLETE, post(complaints::record_complete))
        .route(
            complaints::STATUS,
            get(complaints::ask_status).post(complaints::ask_status),
        )
        .route(complaints::GET_STATUS, post(complaints::get_status))
        .route(
            "/emergency",
            get(emergency::ask_emergency).post(emergency::ask_emergency),
        )
        .route(
            emergency::PROCESS_EMERGENCY,
            post(emergency::process_emergency),
        )
        .route(
            "/train_schedule",
            get(schedule::ask_train_number).post(schedule::ask_train_number),
        )
        .route(
            schedule::PROCESS_TRAIN_NUMBER,
            post(schedule::process_train_number),
        )
        .route(
            "/seat_availability",
            get(seats::ask_train_number).post(seats::ask_train_number),
        )
        .route(seats::GET_DATE, post(seats::get_date))
        .route(seats::GET_CLASS, post(seats::get_class))
        .route(seats::CHECK_AVAILABILITY, post(seats::check_availability))
        .route(
            "/refunds",
            get(refunds::ask_reservation_code).post(refunds::ask_reservation_code),
        )
        .route(
            refunds::PROCESS_REFUND_STATUS,
            post(refunds::process_refund_status),
        )
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            auth::verify_twilio_signature,
        ))
        .layer(ConcurrencyLimitLayer::new(VOICE_MAX_CONCURRENT_REQUESTS));

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/voice/make_call", post(voice::make_call))
        .merge(callbacks)
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
