//! Service configuration.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8000").
    pub listen_addr: String,

    /// Path to the `RocksDB` data directory. Only read with the
    /// `rocksdb-backend` feature; otherwise records live in memory.
    pub data_dir: String,

    /// Absolute URL prefix the provider uses to reach this service
    /// (e.g. `https://ivr.example.in`). Callback URLs are relative when unset.
    pub public_base_url: Option<String>,

    /// Voice used for every spoken line (default: "man").
    pub voice: String,

    /// Language of spoken lines (default: "en-IN").
    pub voice_language: String,

    /// Restarts allowed per department before handing off to an operator.
    pub max_retries: u32,

    /// How long a call context survives without activity, in seconds.
    pub call_context_ttl_seconds: u64,

    /// Number that receives emergency SMS alerts.
    pub ops_alert_number: String,

    /// Twilio account SID (optional).
    pub twilio_account_sid: Option<String>,

    /// Twilio auth token (optional).
    pub twilio_auth_token: Option<String>,

    /// Caller id for outbound calls and SMS (optional).
    pub twilio_phone_number: Option<String>,

    /// Reject voice callbacks without a valid `X-Twilio-Signature`.
    pub verify_twilio_signature: bool,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

/// Twilio secrets file structure.
#[derive(Debug, Deserialize)]
struct TwilioSecrets {
    account_sid: String,
    auth_token: String,
    #[serde(default)]
    phone_number: Option<String>,
}

impl ServiceConfig {
    /// Load configuration from environment variables and secrets files.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let (twilio_account_sid, twilio_auth_token, twilio_phone_number) = load_twilio_secrets();

        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            data_dir: std::env::var("DATA_DIR").unwrap_or(defaults.data_dir),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .ok()
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
            voice: std::env::var("VOICE").unwrap_or(defaults.voice),
            voice_language: std::env::var("VOICE_LANGUAGE").unwrap_or(defaults.voice_language),
            max_retries: parse_env("MAX_RETRIES").unwrap_or(defaults.max_retries),
            call_context_ttl_seconds: parse_env("CALL_CONTEXT_TTL_SECONDS")
                .unwrap_or(defaults.call_context_ttl_seconds),
            ops_alert_number: std::env::var("OPS_ALERT_NUMBER")
                .unwrap_or(defaults.ops_alert_number),
            twilio_account_sid,
            twilio_auth_token,
            twilio_phone_number,
            verify_twilio_signature: std::env::var("VERIFY_TWILIO_SIGNATURE")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.verify_twilio_signature),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            max_body_bytes: parse_env("MAX_BODY_BYTES").unwrap_or(defaults.max_body_bytes),
            request_timeout_seconds: parse_env("REQUEST_TIMEOUT_SECONDS")
                .unwrap_or(defaults.request_timeout_seconds),
        }
    }

    /// Call context lifetime.
    #[must_use]
    pub fn call_context_ttl(&self) -> Duration {
        Duration::from_secs(self.call_context_ttl_seconds)
    }

    /// Resolve a service path against the public base URL, if one is set.
    #[must_use]
    pub fn callback_url(&self, path: &str) -> String {
        match &self.public_base_url {
            Some(base) => format!("{base}{path}"),
            None => path.to_string(),
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.trim().parse().ok())
}

/// Load Twilio secrets from file or environment.
fn load_twilio_secrets() -> (Option<String>, Option<String>, Option<String>) {
    let secret_paths = [
        ".secrets/twilio.json",
        "ivr/.secrets/twilio.json",
        "../.secrets/twilio.json",
    ];

    for path in &secret_paths {
        if let Ok(secrets) = load_secrets_file::<TwilioSecrets>(path) {
            tracing::info!(path = %path, "Loaded Twilio secrets from file");
            return (
                Some(secrets.account_sid),
                Some(secrets.auth_token),
                secrets
                    .phone_number
                    .or_else(|| std::env::var("TWILIO_PHONE_NUMBER").ok()),
            );
        }
    }

    tracing::debug!("Twilio secrets file not found, using environment variables");
    (
        std::env::var("TWILIO_ACCOUNT_SID").ok(),
        std::env::var("TWILIO_AUTH_TOKEN").ok(),
        std::env::var("TWILIO_PHONE_NUMBER").ok(),
    )
}

/// Load secrets from a JSON file.
fn load_secrets_file<T: serde::de::DeserializeOwned>(
    path: impl AsRef<Path>,
) -> Result<T, std::io::Error> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Secrets file not found",
        ));
    }
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".into(),
            data_dir: "data/ivr".into(),
            public_base_url: None,
            voice: "man".into(),
            voice_language: "en-IN".into(),
            max_retries: 3,
            call_context_ttl_seconds: 900,
            ops_alert_number: "+911234567890".into(),
            twilio_account_sid: None,
            twilio_auth_token: None,
            twilio_phone_number: None,
            verify_twilio_signature: false,
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_url_is_relative_without_base() {
        let config = ServiceConfig::default();
        assert_eq!(config.callback_url("/pnr_status"), "/pnr_status");
    }

    #[test]
    fn callback_url_uses_public_base() {
        let config = ServiceConfig {
            public_base_url: Some("https://ivr.example.in".into()),
            ..ServiceConfig::default()
        };
        assert_eq!(
            config.callback_url("/pnr_status/process_pnr"),
            "https://ivr.example.in/pnr_status/process_pnr"
        );
    }

    #[test]
    fn secrets_file_is_parsed() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("twilio.json");
        std::fs::write(
            &path,
            r#"{"account_sid":"AC123","auth_token":"secret","phone_number":"+15005550006"}"#,
        )
        .unwrap();

        let secrets: TwilioSecrets = load_secrets_file(&path).unwrap();
        assert_eq!(secrets.account_sid, "AC123");
        assert_eq!(secrets.phone_number.as_deref(), Some("+15005550006"));
    }

    #[test]
    fn missing_secrets_file_is_not_found() {
        let err = load_secrets_file::<TwilioSecrets>("/nonexistent/twilio.json").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
