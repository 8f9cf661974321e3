//! Incremental Server-Sent Events parser.
//!
//! Network reads split events at arbitrary byte offsets, so bytes are
//! buffered until a full line is available. Only `data:` fields are kept;
//! `event:`, `id:`, `retry:` and comment lines are ignored. A blank line
//! dispatches the accumulated data.

#[derive(Debug, Default)]
pub(crate) struct SseParser {
    buf: Vec<u8>,
    data: Option<String>,
}

impl SseParser {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Feed raw bytes and return every event payload completed by them.
    pub(crate) fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(bytes);
        let mut out = Vec::new();

        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.buf.drain(..=pos).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            self.line(&String::from_utf8_lossy(&line), &mut out);
        }

        out
    }

    /// Flush an event left open when the body ended without a blank line.
    pub(crate) fn finish(&mut self) -> Option<String> {
        if !self.buf.is_empty() {
            let rest = std::mem::take(&mut self.buf);
            let mut out = Vec::new();
            self.line(&String::from_utf8_lossy(&rest), &mut out);
            if let Some(data) = out.pop() {
                return Some(data);
            }
        }
        self.data.take()
    }

    fn line(&mut self, line: &str, out: &mut Vec<String>) {
        if line.is_empty() {
            if let Some(data) = self.data.take() {
                out.push(data);
            }
            return;
        }
        if let Some(rest) = line.strip_prefix("data:") {
            let rest = rest.strip_prefix(' ').unwrap_or(rest);
            match &mut self.data {
                Some(data) => {
                    data.push('\n');
                    data.push_str(rest);
                }
                None => self.data = Some(rest.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_event() {
        let mut parser = SseParser::new();
        assert_eq!(parser.push(b"data: {\"a\":1}\n\n"), vec!["{\"a\":1}"]);
    }

    #[test]
    fn test_event_split_across_reads() {
        let mut parser = SseParser::new();
        assert!(parser.push(b"data: {\"a\"").is_empty());
        assert!(parser.push(b":1}\n").is_empty());
        assert_eq!(parser.push(b"\ndata: [DONE]\n\n"), vec!["{\"a\":1}", "[DONE]"]);
    }

    #[test]
    fn test_crlf_and_ignored_fields() {
        let mut parser = SseParser::new();
        let events = parser.push(b": keep-alive\r\nevent: chunk\r\nid: 7\r\ndata: x\r\n\r\n");
        assert_eq!(events, vec!["x"]);
    }

    #[test]
    fn test_multi_line_data_joined_with_newline() {
        let mut parser = SseParser::new();
        assert_eq!(parser.push(b"data: one\ndata:two\n\n"), vec!["one\ntwo"]);
    }

    #[test]
    fn test_blank_lines_without_data_dispatch_nothing() {
        let mut parser = SseParser::new();
        assert!(parser.push(b"\n\n: ping\n\n").is_empty());
    }

    #[test]
    fn test_finish_flushes_unterminated_event() {
        let mut parser = SseParser::new();
        assert!(parser.push(b"data: tail").is_empty());
        assert_eq!(parser.finish().as_deref(), Some("tail"));
        assert_eq!(parser.finish(), None);
    }
}
