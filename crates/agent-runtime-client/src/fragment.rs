use serde_json::{Map, Value};

/// One unit of a streamed response, classified once at the transport
/// boundary.
///
/// The runtime delivers fragments in loose shapes; downstream code dispatches
/// on this closed union instead of re-inspecting JSON at every step.
#[derive(Clone, Debug, PartialEq)]
pub enum RawFragment {
    /// Plain text, including payloads that are not valid JSON.
    Text(String),
    /// A JSON mapping.
    Record(Map<String, Value>),
    /// Any other JSON value (array, number, boolean, null).
    Other(Value),
}

impl RawFragment {
    /// Classifies one raw transport payload.
    ///
    /// JSON objects become `Record` and JSON strings collapse to their inner
    /// text; everything unparseable stays `Text` untouched.
    pub fn classify(payload: &str) -> Self {
        match serde_json::from_str::<Value>(payload) {
            Ok(Value::Object(map)) => Self::Record(map),
            Ok(Value::String(text)) => Self::Text(text),
            Ok(value) => Self::Other(value),
            Err(_) => Self::Text(payload.to_string()),
        }
    }
}

/// Decoded fragment carrying a `type` discriminator.
///
/// Anything else (unknown tag, missing tag, wrong payload type) is not a
/// structured record and falls back to passthrough text.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StructuredRecord {
    /// Incremental content payload. An empty payload is a no-op.
    Content {
        #[serde(default)]
        chunk: String,
    },
    /// Terminal completion marker for the stream content. The fragment
    /// sequence itself ends when the transport is exhausted.
    End,
    /// Failure reported by the remote agent inside the stream.
    Error {
        #[serde(default)]
        error: String,
    },
}

impl StructuredRecord {
    /// Attempts to decode serialized record notation.
    pub fn decode(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }

    /// Attempts to interpret an already-parsed mapping as a record.
    pub fn from_map(map: Map<String, Value>) -> Option<Self> {
        serde_json::from_value(Value::Object(map)).ok()
    }
}
