use super::SystemContext;
use std::io::Write;

pub struct StdioContext;

impl SystemContext for StdioContext {
    fn write(&mut self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        // Write failures are ignored.
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }
}

#[derive(Debug, Default)]
pub struct BufferedContext {
    buffer: String,
}

impl BufferedContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_data(self) -> String {
        self.buffer
    }
}

impl SystemContext for BufferedContext {
    fn write(&mut self, text: &str) {
        self.buffer.push_str(text);
    }
}
