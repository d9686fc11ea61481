//! Shared dialog-step behaviour.
//!
//! Every department step ends the same few ways: move on to the next
//! recording, finish with a hangup, go back to the department's first step,
//! or give up after a storage failure. [`Dialog`] applies those endings
//! consistently, including the per-call restart cap.

use ivr_core::extract::digits_only;
use ivr_core::{CallSid, Department};
use ivr_store::StoreError;

use crate::handlers::CallbackForm;
use crate::state::AppState;
use crate::twiml::VoiceScript;

/// Spoken when a caller has been sent back to the start too many times.
pub const OPERATOR_HANDOFF: &str = "We are unable to complete your request over this automated \
     line. Please call one three nine to speak with a customer service representative. Goodbye.";

/// One step of a department flow, bound to the current callback.
pub struct Dialog<'a> {
    state: &'a AppState,
    department: Department,
    entry: &'static str,
    call: Option<CallSid>,
}

impl<'a> Dialog<'a> {
    /// Bind a step of `department` to the callback that triggered it.
    #[must_use]
    pub fn new(state: &'a AppState, department: Department, form: &CallbackForm) -> Self {
        Self {
            state,
            department,
            entry: department.entry_path(),
            call: form.call_sid(),
        }
    }

    /// Restart at `path` instead of the department's usual first step.
    #[must_use]
    pub fn starting_at(mut self, path: &'static str) -> Self {
        self.entry = path;
        self
    }

    /// The provider call id, when the callback carried one.
    #[must_use]
    pub fn call(&self) -> Option<&CallSid> {
        self.call.as_ref()
    }

    /// An empty script in the configured voice.
    #[must_use]
    pub fn script(&self) -> VoiceScript {
        self.state.script()
    }

    /// Absolute or relative URL for a service path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        self.state.config.callback_url(path)
    }

    /// Send the caller back to the first step of the flow.
    ///
    /// Counts the restart against the call; once the count passes the
    /// configured maximum the caller hears the operator handoff instead and
    /// the call ends.
    #[must_use]
    pub fn restart(&self, script: VoiceScript) -> VoiceScript {
        let entry = self.url(self.entry);

        let Some(call) = &self.call else {
            tracing::warn!(
                department = %self.department,
                "restarting without CallSid, retry cap not applied"
            );
            return script.redirect(entry);
        };

        let failures = self.state.contexts.record_failure(call, self.department);
        if failures > self.state.config.max_retries {
            tracing::info!(
                call_sid = %call,
                department = %self.department,
                failures,
                "retry limit reached, handing off to operator"
            );
            self.state.contexts.clear(call);
            return script.say(OPERATOR_HANDOFF).hangup();
        }

        tracing::debug!(
            call_sid = %call,
            department = %self.department,
            failures,
            "restarting flow"
        );
        script.redirect(entry)
    }

    /// Reject a transcript that does not normalize to a reservation code,
    /// citing what was heard, and restart.
    #[must_use]
    pub fn reject_reservation_code(&self, transcript: &str) -> VoiceScript {
        let digits = digits_only(transcript);
        tracing::info!(
            department = %self.department,
            digits = %digits,
            "rejected malformed reservation code"
        );
        self.restart(
            self.script()
                .say(format!(
                    "The number {digits} you provided does not seem to be a valid ten digit P N R number."
                ))
                .say("Please try again."),
        )
    }

    /// Speak `apology` for a storage failure and end the call.
    #[must_use]
    pub fn technical_failure(&self, err: &StoreError, apology: &str) -> VoiceScript {
        tracing::error!(
            error = %err,
            department = %self.department,
            call_sid = ?self.call,
            "storage failure during lookup"
        );
        self.script().say(apology).hangup()
    }
}
