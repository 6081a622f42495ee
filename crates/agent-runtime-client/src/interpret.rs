use std::time::{Duration, Instant};

use serde_json::Value;

use crate::fragment::{RawFragment, StructuredRecord};

/// Printable outcome of interpreting one fragment.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Write text verbatim, no trailing newline, flushed immediately.
    Text(String),
    /// Write the fixed completion banner.
    Summary(StreamSummary),
    /// Write the fixed error banner.
    Error(String),
    /// Nothing observable.
    Noop,
}

/// Counters for the completion banner.
#[derive(Clone, Debug, PartialEq)]
pub struct StreamSummary {
    /// Every fragment seen, whatever its shape.
    pub total_fragments: u64,
    /// Fragments whose effect emitted text (structured content or
    /// passthrough).
    pub content_fragments: u64,
    /// Time since the drain loop started.
    pub elapsed: Duration,
}

/// Per-invocation stream state, owned by the drain loop.
///
/// The interpreter itself is stateless; the loop records each fragment before
/// interpreting it and each effect after, then hands a reference in so an
/// `end` record can be summarized.
#[derive(Clone, Debug)]
pub struct StreamStats {
    total_fragments: u64,
    content_fragments: u64,
    first_fragment: Option<Duration>,
    started: Instant,
}

impl StreamStats {
    /// Starts counting from now.
    pub fn new() -> Self {
        Self {
            total_fragments: 0,
            content_fragments: 0,
            first_fragment: None,
            started: Instant::now(),
        }
    }

    /// Records one arrived fragment.
    pub fn record_fragment(&mut self) {
        if self.total_fragments == 0 {
            self.first_fragment = Some(self.started.elapsed());
        }
        self.total_fragments += 1;
    }

    /// Records the effect the fragment produced.
    pub fn record_effect(&mut self, effect: &Effect) {
        if matches!(effect, Effect::Text(_)) {
            self.content_fragments += 1;
        }
    }

    pub fn total_fragments(&self) -> u64 {
        self.total_fragments
    }

    pub fn content_fragments(&self) -> u64 {
        self.content_fragments
    }

    /// Latency from loop start to the first fragment, once one has arrived.
    pub fn time_to_first_fragment(&self) -> Option<Duration> {
        self.first_fragment
    }

    /// Snapshot used for the completion banner.
    pub fn summary(&self) -> StreamSummary {
        StreamSummary {
            total_fragments: self.total_fragments,
            content_fragments: self.content_fragments,
            elapsed: self.started.elapsed(),
        }
    }
}

impl Default for StreamStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps one fragment to exactly one effect. Total: every input has a defined
/// effect and decode failures are the passthrough path, never an error.
pub fn interpret(fragment: RawFragment, stats: &StreamStats) -> Effect {
    match fragment {
        RawFragment::Text(text) => match StructuredRecord::decode(&text) {
            Some(record) => dispatch(record, stats),
            None => Effect::Text(text),
        },
        RawFragment::Record(map) => {
            if let Some(inner) = map.get("chunk").and_then(Value::as_str) {
                // Wrapper shape: the payload is one decoding level deeper.
                match StructuredRecord::decode(inner) {
                    Some(record) => dispatch(record, stats),
                    None => text_effect(inner.to_string()),
                }
            } else {
                match StructuredRecord::from_map(map.clone()) {
                    Some(record) => dispatch(record, stats),
                    None => Effect::Text(Value::Object(map).to_string()),
                }
            }
        }
        RawFragment::Other(value) => Effect::Text(value.to_string()),
    }
}

fn dispatch(record: StructuredRecord, stats: &StreamStats) -> Effect {
    match record {
        StructuredRecord::Content { chunk } => text_effect(chunk),
        StructuredRecord::End => Effect::Summary(stats.summary()),
        StructuredRecord::Error { error } => Effect::Error(error),
    }
}

fn text_effect(text: String) -> Effect {
    if text.is_empty() {
        Effect::Noop
    } else {
        Effect::Text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, json};

    fn record(value: serde_json::Value) -> RawFragment {
        match value {
            serde_json::Value::Object(map) => RawFragment::Record(map),
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn undecodable_text_passes_through_unchanged() {
        let stats = StreamStats::new();
        for input in ["hello", "", "{broken", "[1,2]", "{\"foo\":1}"] {
            let effect = interpret(RawFragment::Text(input.into()), &stats);
            assert_eq!(effect, Effect::Text(input.into()), "input: {input:?}");
        }
    }

    #[test]
    fn text_that_decodes_as_record_is_dispatched() {
        let stats = StreamStats::new();
        let effect = interpret(
            RawFragment::Text(r#"{"type":"content","chunk":"hi"}"#.into()),
            &stats,
        );
        assert_eq!(effect, Effect::Text("hi".into()));
    }

    #[test]
    fn empty_content_is_silent() {
        let stats = StreamStats::new();
        assert_eq!(
            interpret(record(json!({"type":"content","chunk":""})), &stats),
            Effect::Noop
        );
        assert_eq!(
            interpret(record(json!({"type":"content","chunk":"hi"})), &stats),
            Effect::Text("hi".into())
        );
    }

    #[test]
    fn wrapper_is_unwrapped_one_level_then_dispatched() {
        let stats = StreamStats::new();
        let effect = interpret(
            record(json!({"chunk":"{\"type\":\"content\",\"chunk\":\"x\"}"})),
            &stats,
        );
        assert_eq!(effect, Effect::Text("x".into()));
    }

    #[test]
    fn wrapper_with_undecodable_payload_passes_inner_text_through() {
        let stats = StreamStats::new();
        let effect = interpret(record(json!({"chunk":"raw words"})), &stats);
        assert_eq!(effect, Effect::Text("raw words".into()));
    }

    #[test]
    fn wrapped_end_record_summarizes() {
        let mut stats = StreamStats::new();
        stats.record_fragment();
        let effect = interpret(record(json!({"chunk":"{\"type\":\"end\"}"})), &stats);
        assert!(matches!(effect, Effect::Summary(_)));
    }

    #[test]
    fn unknown_type_falls_back_to_stringification() {
        let stats = StreamStats::new();
        let effect = interpret(record(json!({"type":"unknown_kind","foo":1})), &stats);
        match effect {
            Effect::Text(text) => assert!(text.contains("unknown_kind")),
            other => panic!("expected text fallback, got {other:?}"),
        }
    }

    #[test]
    fn error_record_surfaces_message() {
        let stats = StreamStats::new();
        let effect = interpret(record(json!({"type":"error","error":"boom"})), &stats);
        assert_eq!(effect, Effect::Error("boom".into()));
    }

    #[test]
    fn end_record_reports_counters_accumulated_so_far() {
        let mut stats = StreamStats::new();
        for effect in [
            Effect::Text("hello".into()),
            Effect::Text(" world".into()),
            Effect::Noop,
        ] {
            stats.record_fragment();
            stats.record_effect(&effect);
        }
        stats.record_fragment();
        let effect = interpret(record(json!({"type":"end"})), &stats);
        match effect {
            Effect::Summary(summary) => {
                assert_eq!(summary.total_fragments, 4);
                assert_eq!(summary.content_fragments, 2);
            }
            other => panic!("expected summary, got {other:?}"),
        }
    }

    #[test]
    fn malformed_shapes_never_fail() {
        let stats = StreamStats::new();
        let inputs = vec![
            RawFragment::Other(json!(null)),
            RawFragment::Other(json!(42)),
            RawFragment::Other(json!([{"type":"content"}])),
            record(json!({"type":"content","chunk":5})),
            record(json!({"type":17})),
            record(json!({"chunk":42})),
            record(json!({})),
        ];
        for input in inputs {
            // Every shape maps to a defined effect.
            let _ = interpret(input, &stats);
        }
    }

    #[test]
    fn non_mapping_values_stringify() {
        let stats = StreamStats::new();
        assert_eq!(
            interpret(RawFragment::Other(json!(42)), &stats),
            Effect::Text("42".into())
        );
        assert_eq!(
            interpret(RawFragment::Other(json!([1, 2])), &stats),
            Effect::Text("[1,2]".into())
        );
    }

    #[test]
    fn empty_record_stringifies_rather_than_drops() {
        let stats = StreamStats::new();
        assert_eq!(
            interpret(RawFragment::Record(Map::new()), &stats),
            Effect::Text("{}".into())
        );
    }
}
