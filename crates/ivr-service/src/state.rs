//! Application state.

use std::sync::Arc;

use ivr_store::Store;

use crate::config::ServiceConfig;
use crate::context::CallContexts;
use crate::notify::{LogNotifier, Notifier, TwilioNotifier};
use crate::twiml::{Voice, VoiceScript};
use crate::twilio::TwilioClient;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The storage backend.
    pub store: Arc<dyn Store>,

    /// Service configuration.
    pub config: ServiceConfig,

    /// Per-call dialog contexts.
    pub contexts: Arc<CallContexts>,

    /// Alert sender for the operations desk.
    pub notifier: Arc<dyn Notifier>,

    /// Twilio client for outbound calls (optional).
    pub twilio: Option<Arc<TwilioClient>>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Builds the Twilio client from the configured credentials when they are
    /// complete, and falls back to a logging notifier otherwise.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, config: ServiceConfig) -> Self {
        let twilio = match (
            config.twilio_account_sid.as_ref(),
            config.twilio_auth_token.as_ref(),
            config.twilio_phone_number.as_ref(),
        ) {
            (Some(sid), Some(token), Some(from)) => match TwilioClient::new(sid, token, from) {
                Ok(client) => {
                    tracing::info!(from = %from, "Twilio integration enabled");
                    Some(Arc::new(client))
                }
                Err(e) => {
                    tracing::error!(error = %e, "Twilio client could not be built");
                    None
                }
            },
            _ => None,
        };

        if twilio.is_none() {
            tracing::warn!("Twilio not configured - outbound calls disabled, alerts logged only");
        }

        let notifier: Arc<dyn Notifier> = match &twilio {
            Some(client) => Arc::new(TwilioNotifier::new(Arc::clone(client))),
            None => Arc::new(LogNotifier),
        };

        Self::with_parts(store, config, notifier, twilio)
    }

    /// Assemble state from explicit collaborators.
    #[must_use]
    pub fn with_parts(
        store: Arc<dyn Store>,
        config: ServiceConfig,
        notifier: Arc<dyn Notifier>,
        twilio: Option<Arc<TwilioClient>>,
    ) -> Self {
        let contexts = Arc::new(CallContexts::new(config.call_context_ttl()));
        Self {
            store,
            config,
            contexts,
            notifier,
            twilio,
        }
    }

    /// Voice parameters for spoken lines.
    #[must_use]
    pub fn voice(&self) -> Voice {
        Voice {
            name: self.config.voice.clone(),
            language: self.config.voice_language.clone(),
        }
    }

    /// An empty voice script in the configured voice.
    #[must_use]
    pub fn script(&self) -> VoiceScript {
        VoiceScript::new(self.voice())
    }
}
