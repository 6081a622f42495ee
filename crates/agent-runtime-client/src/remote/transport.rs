use crate::fragment::RawFragment;

/// Incremental decoder for the runtime's event-stream framing.
///
/// Transport chunks can split a frame anywhere, so undelivered bytes carry
/// over between calls. Each completed frame's data payload is classified
/// once into a `RawFragment`; comment lines and frames without data are
/// dropped.
#[derive(Default)]
pub(crate) struct FrameDecoder {
    buf: Vec<u8>,
}

impl FrameDecoder {
    /// Feeds one transport chunk and returns every fragment it completed.
    pub fn push_chunk(&mut self, chunk: &[u8]) -> Vec<RawFragment> {
        self.buf.extend_from_slice(chunk);
        let mut fragments = Vec::new();
        while let Some((idx, delim_len)) = find_frame_boundary(&self.buf) {
            let frame = self.buf[..idx].to_vec();
            self.buf.drain(..idx + delim_len);
            if let Some(payload) = frame_payload(&frame) {
                fragments.push(RawFragment::classify(&payload));
            }
        }
        fragments
    }

    /// Flushes a trailing frame the transport ended without delimiting.
    pub fn finish(&mut self) -> Option<RawFragment> {
        let frame = std::mem::take(&mut self.buf);
        frame_payload(&frame).map(|payload| RawFragment::classify(&payload))
    }
}

fn find_frame_boundary(buf: &[u8]) -> Option<(usize, usize)> {
    for i in 0..buf.len() {
        let rest = &buf[i..];
        if rest.starts_with(b"\r\n\r\n") {
            return Some((i, 4));
        }
        if rest.starts_with(b"\n\n") {
            return Some((i, 2));
        }
    }
    None
}

/// Joins a frame's `data:` lines. The runtime does not use event names, so
/// only data lines are significant.
fn frame_payload(frame: &[u8]) -> Option<String> {
    if frame.is_empty() {
        return None;
    }
    let text = String::from_utf8_lossy(frame);
    let mut data_lines: Vec<&str> = Vec::new();
    for raw_line in text.split('\n') {
        let line = raw_line.trim_end_matches('\r');
        if line.is_empty() || line.starts_with(':') {
            continue;
        }
        if let Some(rest) = line.strip_prefix("data:") {
            data_lines.push(rest.strip_prefix(' ').unwrap_or(rest));
        }
    }
    if data_lines.is_empty() {
        None
    } else {
        Some(data_lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn frame_split_across_chunks_is_reassembled() {
        let mut decoder = FrameDecoder::default();
        let first = decoder.push_chunk(b"data: {\"type\":\"content\",\"chunk\":\"hel");
        assert!(first.is_empty());
        let second = decoder.push_chunk(b"lo\"}\n\n");
        assert_eq!(second.len(), 1);
        match &second[0] {
            RawFragment::Record(map) => {
                assert_eq!(map.get("chunk"), Some(&json!("hello")));
            }
            other => panic!("expected record, got {other:?}"),
        }
    }

    #[test]
    fn one_chunk_can_complete_several_frames() {
        let mut decoder = FrameDecoder::default();
        let fragments =
            decoder.push_chunk(b"data: {\"type\":\"content\",\"chunk\":\"a\"}\n\ndata: plain\n\n");
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[1], RawFragment::Text("plain".into()));
    }

    #[test]
    fn crlf_delimited_frames_decode() {
        let mut decoder = FrameDecoder::default();
        let fragments = decoder.push_chunk(b"data: {\"type\":\"end\"}\r\n\r\n");
        assert_eq!(fragments.len(), 1);
        assert!(matches!(fragments[0], RawFragment::Record(_)));
    }

    #[test]
    fn comments_and_empty_frames_are_dropped() {
        let mut decoder = FrameDecoder::default();
        let fragments = decoder.push_chunk(b": keepalive\n\n\n\ndata: x\n\n");
        assert_eq!(fragments, vec![RawFragment::Text("x".into())]);
    }

    #[test]
    fn multiple_data_lines_join_with_newline() {
        let mut decoder = FrameDecoder::default();
        let fragments = decoder.push_chunk(b"data: first\ndata: second\n\n");
        assert_eq!(fragments, vec![RawFragment::Text("first\nsecond".into())]);
    }

    #[test]
    fn finish_flushes_an_undelimited_tail() {
        let mut decoder = FrameDecoder::default();
        assert!(decoder.push_chunk(b"data: tail").is_empty());
        assert_eq!(decoder.finish(), Some(RawFragment::Text("tail".into())));
        assert_eq!(decoder.finish(), None);
    }
}
