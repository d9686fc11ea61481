//! Voice-script documents (TwiML).
//!
//! Every voice endpoint answers with a [`VoiceScript`]: an ordered list of
//! verbs the provider executes top to bottom. Scripts render to
//! `<Response>` XML and are served as `application/xml`.

use axum::http::header;
use axum::response::{IntoResponse, Response};

/// Voice parameters applied to every `<Say>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    /// Voice name (e.g. `man`).
    pub name: String,
    /// Language tag (e.g. `en-IN`).
    pub language: String,
}

/// Recording instruction: record the caller, transcribe, then call back.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Record {
    /// Seconds of silence that end the recording.
    timeout: u32,
    /// Maximum recording length in seconds.
    max_length: u32,
    /// Callback URL for the finished recording.
    action: String,
}

/// A single voice-script verb.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Verb {
    /// Speak text.
    Say(String),
    /// Stay silent for some seconds.
    Pause(u32),
    /// Record and call back.
    Record(Record),
    /// Continue the call at another URL.
    Redirect(String),
    /// End the call.
    Hangup,
}

/// An ordered voice-script document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceScript {
    voice: Voice,
    verbs: Vec<Verb>,
}

impl VoiceScript {
    /// Start an empty script spoken with `voice`.
    #[must_use]
    pub fn new(voice: Voice) -> Self {
        Self {
            voice,
            verbs: Vec::new(),
        }
    }

    /// Speak a line.
    #[must_use]
    pub fn say(mut self, text: impl Into<String>) -> Self {
        self.verbs.push(Verb::Say(text.into()));
        self
    }

    /// Pause for `seconds`.
    #[must_use]
    pub fn pause(mut self, seconds: u32) -> Self {
        self.verbs.push(Verb::Pause(seconds));
        self
    }

    /// Record the caller and call back `action` when done.
    #[must_use]
    pub fn record(mut self, timeout: u32, max_length: u32, action: impl Into<String>) -> Self {
        self.verbs.push(Verb::Record(Record {
            timeout,
            max_length,
            action: action.into(),
        }));
        self
    }

    /// Continue at `url`.
    #[must_use]
    pub fn redirect(mut self, url: impl Into<String>) -> Self {
        self.verbs.push(Verb::Redirect(url.into()));
        self
    }

    /// End the call.
    #[must_use]
    pub fn hangup(mut self) -> Self {
        self.verbs.push(Verb::Hangup);
        self
    }

    /// Render the script as a TwiML document.
    #[must_use]
    pub fn render(&self) -> String {
        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?><Response>"#);
        let voice = escape(&self.voice.name);
        let language = escape(&self.voice.language);

        for verb in &self.verbs {
            match verb {
                Verb::Say(text) => xml.push_str(&format!(
                    r#"<Say voice="{voice}" language="{language}">{}</Say>"#,
                    escape(text)
                )),
                Verb::Pause(seconds) => xml.push_str(&format!(r#"<Pause length="{seconds}"/>"#)),
                Verb::Record(record) => xml.push_str(&format!(
                    r#"<Record timeout="{}" maxLength="{}" transcribe="true" playBeep="true" action="{}"/>"#,
                    record.timeout,
                    record.max_length,
                    escape(&record.action)
                )),
                Verb::Redirect(url) => {
                    xml.push_str(&format!("<Redirect>{}</Redirect>", escape(url)));
                }
                Verb::Hangup => xml.push_str("<Hangup/>"),
            }
        }

        xml.push_str("</Response>");
        xml
    }
}

impl IntoResponse for VoiceScript {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, "application/xml")], self.render()).into_response()
    }
}

/// Escape text for XML content and attribute values.
///
/// Characters XML 1.0 cannot carry at all (control characters other than
/// tab, newline and carriage return, and U+FFFE/U+FFFF) are dropped.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\t' | '\n' | '\r' => out.push(c),
            '\u{0}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => {}
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
