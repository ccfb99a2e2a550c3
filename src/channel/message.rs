//! Host message shapes.
//!
//! Inbound lines are JSON. A line is either a bare payload or an envelope
//! `{"origin": "...", "data": {...}}`. The only payload the widget acts on
//! is an object with a string `audioSrc` field; everything else is ignored.

use serde::Serialize;
use serde_json::Value;

/// Field carrying a replacement audio source.
pub const AUDIO_SOURCE_FIELD: &str = "audioSrc";

/// Ready signal sent to the host once after mount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadyMessage {
    pub status: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl Default for ReadyMessage {
    fn default() -> Self {
        Self {
            status: "ready",
            kind: "audioPlayer",
        }
    }
}

/// A decoded inbound line.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundMessage {
    /// Sender origin, when the line was an envelope
    pub origin: Option<String>,
    pub payload: Value,
}

impl InboundMessage {
    /// Decode one line. Returns `None` for anything that is not JSON.
    pub fn parse(line: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(line.trim()).ok()?;
        Some(Self::from_value(value))
    }

    fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut envelope)
                if !envelope.contains_key(AUDIO_SOURCE_FIELD)
                    && envelope.get("data").is_some_and(Value::is_object) =>
            {
                let origin = envelope
                    .get("origin")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                let payload = envelope.remove("data").unwrap_or(Value::Null);
                Self { origin, payload }
            }
            payload => Self {
                origin: None,
                payload,
            },
        }
    }

    /// The replacement source this message asks for, if any.
    pub fn audio_source(&self) -> Option<&str> {
        self.payload
            .as_object()?
            .get(AUDIO_SOURCE_FIELD)?
            .as_str()
    }
}
