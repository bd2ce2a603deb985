//! Agent event stream parsing
//!
//! The upstream answers with newline-delimited chunks, each usually
//! carrying a `data:` prefix and a JSON event object.

use serde::Deserialize;

const DATA_PREFIX: &str = "data:";

/// Event kind whose answer fragments make up the final answer
pub const AGENT_MESSAGE: &str = "agent_message";

/// One parsed event from the agent stream
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StreamEvent {
    #[serde(rename = "event")]
    pub kind: String,
    #[serde(default)]
    pub answer: Option<String>,
}

impl StreamEvent {
    /// Answer text this event contributes to the aggregate
    pub fn answer_fragment(&self) -> Option<&str> {
        if self.kind == AGENT_MESSAGE {
            Some(self.answer.as_deref().unwrap_or_default())
        } else {
            None
        }
    }
}

/// Outcome of examining one stream line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamLine {
    Parsed(StreamEvent),
    Skipped,
}

/// Parse one line of the stream.
///
/// Blank lines, lines without the `data:` prefix (keep-alives, comments)
/// and payloads that are not a valid event are all [`StreamLine::Skipped`].
pub fn parse_line(line: &str) -> StreamLine {
    let Some(payload) = line.trim_end_matches('\r').strip_prefix(DATA_PREFIX) else {
        return StreamLine::Skipped;
    };

    match serde_json::from_str::<StreamEvent>(payload.trim_start()) {
        Ok(event) => StreamLine::Parsed(event),
        Err(_) => StreamLine::Skipped,
    }
}

/// Aggregation step: append the line's answer fragment, if any.
pub fn fold_answer(mut answer: String, line: StreamLine) -> String {
    if let StreamLine::Parsed(event) = line {
        if let Some(fragment) = event.answer_fragment() {
            answer.push_str(fragment);
        }
    }
    answer
}

/// Splits a byte stream into text lines.
///
/// Works on raw bytes so a multi-byte character cut by a chunk boundary
/// is decoded only once both halves have arrived.
#[derive(Debug, Default)]
pub struct LineDecoder {
    buffer: Vec<u8>,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk, returning every line it completes
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(newline_pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline_pos).collect();
            lines.push(String::from_utf8_lossy(&line[..newline_pos]).into_owned());
        }
        lines
    }

    /// Remaining unterminated line at end of stream
    pub fn finish(self) -> Option<String> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(&self.buffer).into_owned())
        }
    }
}
