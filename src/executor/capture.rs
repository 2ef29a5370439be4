use crate::interpreter::OutputSink;

/// Output accumulator owned by a single run.
#[derive(Debug, Default)]
pub struct CaptureBuffer {
    text: String,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything captured, trailing whitespace removed.
    pub fn into_trimmed(self) -> String {
        self.text.trim_end().to_string()
    }
}

impl OutputSink for CaptureBuffer {
    fn write_chunk(&mut self, chunk: &str) {
        self.text.extend(chunk.chars().filter(|&c| c != '\r'));
    }
}
