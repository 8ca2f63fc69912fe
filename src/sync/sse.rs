//! Incremental decoder for `text/event-stream` bodies.
//!
//! Bytes arrive in arbitrary chunks; complete lines are processed as they
//! appear and an event is emitted on each blank line. Lines end in `\n`,
//! `\r\n` or a lone `\r`. Only unnamed events and
//! events named `message` are emitted, which is what a browser `onmessage`
//! handler would see.

#[derive(Debug, Default)]
pub struct SseDecoder {
    buf: Vec<u8>,
    data: String,
    has_data: bool,
    event: String,
    /// Last line ended in `\r`; a `\n` arriving next belongs to it.
    after_cr: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and return the data of every event it completed.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(chunk);
        let mut out = Vec::new();
        loop {
            if self.after_cr && !self.buf.is_empty() {
                if self.buf[0] == b'\n' {
                    self.buf.remove(0);
                }
                self.after_cr = false;
            }
            let Some(pos) = self.buf.iter().position(|&b| b == b'\n' || b == b'\r') else {
                break;
            };
            let mut line: Vec<u8> = self.buf.drain(..=pos).collect();
            self.after_cr = line.pop() == Some(b'\r');
            let line = String::from_utf8_lossy(&line);
            if let Some(payload) = self.process_line(&line) {
                out.push(payload);
            }
        }
        out
    }

    fn process_line(&mut self, line: &str) -> Option<String> {
        if line.is_empty() {
            return self.dispatch();
        }
        let line = line.strip_prefix('\u{feff}').unwrap_or(line);
        if line.starts_with(':') {
            return None;
        }
        let (field, value) = match line.split_once(':') {
            Some((f, v)) => (f, v.strip_prefix(' ').unwrap_or(v)),
            None => (line, ""),
        };
        match field {
            "data" => {
                if self.has_data {
                    self.data.push('\n');
                }
                self.data.push_str(value);
                self.has_data = true;
            }
            "event" => self.event = value.to_string(),
            // id and retry only matter to a browser's own reconnect logic.
            _ => {}
        }
        None
    }

    fn dispatch(&mut self) -> Option<String> {
        let event = std::mem::take(&mut self.event);
        let data = std::mem::take(&mut self.data);
        let had_data = std::mem::replace(&mut self.has_data, false);
        if !had_data || !(event.is_empty() || event == "message") {
            return None;
        }
        Some(data)
    }
}
