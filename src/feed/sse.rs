use super::FeedError;

/// Largest event (pending line plus buffered data) the decoder will hold.
pub const MAX_EVENT_BYTES: usize = 16 * 1024 * 1024;

/// Incremental decoder for a `text/event-stream` body.
///
/// Feed it raw chunks as they arrive; it hands back the `data` payload of
/// every event completed by a blank line. Multi-line data is joined with
/// `\n`. Comments and the `event`/`id`/`retry` fields are ignored.
#[derive(Debug)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    data: Vec<String>,
    data_len: usize,
    limit: usize,
}

impl Default for SseDecoder {
    fn default() -> Self {
        Self::with_limit(MAX_EVENT_BYTES)
    }
}

impl SseDecoder {
    pub fn with_limit(limit: usize) -> Self {
        SseDecoder { buffer: Vec::new(), data: Vec::new(), data_len: 0, limit }
    }

    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);
        let mut events = Vec::new();
        while let Some(newline_index) = self.buffer.iter().position(|byte| *byte == b'\n') {
            let mut line = self.buffer.drain(..=newline_index).collect::<Vec<_>>();
            line.pop();
            if matches!(line.last(), Some(b'\r')) {
                line.pop();
            }
            if let Some(event) = self.process_line(&line) {
                events.push(event);
            }
        }
        events
    }

    /// Fails when the unfinished event (partial line plus buffered data) has
    /// outgrown the limit. Call after every [`push`](Self::push); the stream
    /// should be dropped on error.
    pub fn check_limit(&self) -> Result<(), FeedError> {
        let pending = self.buffer.len() + self.data_len;
        if pending > self.limit {
            return Err(FeedError::Transport(format!(
                "event stream sent {pending} bytes without finishing an event (limit {})",
                self.limit
            )));
        }
        Ok(())
    }

    /// Flush whatever is left once the stream ends.
    pub fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.buffer);
        if !rest.is_empty() {
            let rest = rest.strip_suffix(b"\r").unwrap_or(&rest);
            if let Some(event) = self.process_line(rest) {
                return Some(event);
            }
        }
        self.dispatch()
    }

    fn process_line(&mut self, line: &[u8]) -> Option<String> {
        if line.is_empty() {
            return self.dispatch();
        }
        let line = String::from_utf8_lossy(line);
        if line.starts_with(':') {
            return None;
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line.as_ref(), ""),
        };
        if field == "data" {
            self.data_len += value.len() + 1;
            self.data.push(value.to_string());
        }
        None
    }

    fn dispatch(&mut self) -> Option<String> {
        if self.data.is_empty() {
            return None;
        }
        let event = self.data.join("\n");
        self.data.clear();
        self.data_len = 0;
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_event() {
        let mut decoder = SseDecoder::default();
        assert_eq!(decoder.push(b"data: {\"a\":1}\n\n"), vec!["{\"a\":1}".to_string()]);
    }

    #[test]
    fn event_split_across_chunks() {
        let mut decoder = SseDecoder::default();
        assert!(decoder.push(b"da").is_empty());
        assert!(decoder.push(b"ta: hel").is_empty());
        assert!(decoder.push(b"lo\r\n").is_empty());
        assert_eq!(decoder.push(b"\r\n"), vec!["hello".to_string()]);
    }

    #[test]
    fn multi_line_data_is_joined() {
        let mut decoder = SseDecoder::default();
        let events = decoder.push(b"data: first\ndata: second\n\ndata: third\n\n");
        assert_eq!(events, vec!["first\nsecond".to_string(), "third".to_string()]);
    }

    #[test]
    fn comments_and_other_fields_are_ignored() {
        let mut decoder = SseDecoder::default();
        let events = decoder.push(b": keep-alive\n\nevent: update\nid: 7\ndata:x\n\n");
        assert_eq!(events, vec!["x".to_string()]);
    }

    #[test]
    fn finish_flushes_unterminated_event() {
        let mut decoder = SseDecoder::default();
        assert!(decoder.push(b"data: tail").is_empty());
        assert_eq!(decoder.finish(), Some("tail".to_string()));
        assert_eq!(decoder.finish(), None);
    }

    #[test]
    fn endless_line_breaks_the_limit() {
        let mut decoder = SseDecoder::with_limit(16);
        assert!(decoder.push(b"data: 0123456").is_empty());
        assert!(decoder.check_limit().is_ok());
        assert!(decoder.push(b"789abcdef").is_empty());
        let err = decoder.check_limit().unwrap_err();
        assert!(matches!(err, FeedError::Transport(_)), "got {err:?}");
    }

    #[test]
    fn buffered_multi_line_data_counts_towards_the_limit() {
        let mut decoder = SseDecoder::with_limit(16);
        decoder.push(b"data: 0123\ndata: 4567\n");
        assert!(decoder.check_limit().is_ok());
        decoder.push(b"data: 89ab\ndata: cdef\n");
        assert!(decoder.check_limit().is_err());
    }

    #[test]
    fn limit_applies_per_event() {
        let mut decoder = SseDecoder::with_limit(16);
        let events = decoder.push(b"data: 0123456789\n\ndata: abcdefghij\n\n");
        assert_eq!(events, vec!["0123456789".to_string(), "abcdefghij".to_string()]);
        assert!(decoder.check_limit().is_ok());
    }

    #[test]
    fn events_before_an_oversized_tail_are_kept() {
        let mut decoder = SseDecoder::with_limit(16);
        let events = decoder.push(b"data: ok\n\ndata: 0123456789abcdef");
        assert_eq!(events, vec!["ok".to_string()]);
        assert!(decoder.check_limit().is_err());
    }
}
