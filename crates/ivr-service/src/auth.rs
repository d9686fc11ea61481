//! Provider webhook authentication.
//!
//! When signature verification is enabled, every voice callback must carry an
//! `X-Twilio-Signature` computed over the public URL of the request and its
//! form body. Requests that fail the check never reach a voice handler.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{FromRequest, Request, State};
use axum::http::{header, Method};
use axum::middleware::Next;
use axum::response::Response;
use axum::Form;

use crate::crypto::{constant_time_eq, twilio_signature};
use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the provider signature.
pub const SIGNATURE_HEADER: &str = "x-twilio-signature";

/// Middleware rejecting voice callbacks whose signature does not verify.
///
/// Verification needs both the auth token and the public base URL; without
/// either the check is skipped (a startup warning is logged instead).
pub async fn verify_twilio_signature(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let config = &state.config;
    let (true, Some(token), Some(base)) = (
        config.verify_twilio_signature,
        config.twilio_auth_token.as_deref(),
        config.public_base_url.as_deref(),
    ) else {
        return Ok(next.run(request).await);
    };

    let signature = request
        .headers()
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .ok_or_else(|| ApiError::Forbidden("missing X-Twilio-Signature".into()))?;

    let url = format!(
        "{base}{}",
        request
            .uri()
            .path_and_query()
            .map_or("/", axum::http::uri::PathAndQuery::as_str)
    );

    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, config.max_body_bytes)
        .await
        .map_err(|e| ApiError::BadRequest(format!("unreadable body: {e}")))?;

    let params = form_pairs(bytes.clone()).await?;
    let expected = twilio_signature(token, &url, &params);

    if !constant_time_eq(&expected, &signature) {
        tracing::warn!(url = %url, "rejected callback with invalid signature");
        return Err(ApiError::Forbidden("invalid X-Twilio-Signature".into()));
    }

    Ok(next
        .run(Request::from_parts(parts, Body::from(bytes)))
        .await)
}

/// Decode a urlencoded body into ordered name/value pairs.
async fn form_pairs(bytes: axum::body::Bytes) -> Result<Vec<(String, String)>, ApiError> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }

    let request = Request::builder()
        .method(Method::POST)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(bytes))
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let Form(pairs) = Form::<Vec<(String, String)>>::from_request(request, &())
        .await
        .map_err(|e| ApiError::BadRequest(format!("malformed form body: {e}")))?;
    Ok(pairs)
}
