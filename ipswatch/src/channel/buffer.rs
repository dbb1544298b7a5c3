//! Capture buffer with a byte-budget read.
//!
//! Devices give no end-of-output marker, so reads are "wait, then take what
//! is there". The buffer accumulates everything that arrives and hands back
//! at most `budget` bytes per read. Anything past the budget stays queued
//! for the next read.

use bytes::BytesMut;
use memchr::memchr_iter;

/// Buffer for accumulating raw shell output.
#[derive(Debug)]
pub struct CaptureBuffer {
    /// The accumulated output buffer.
    buffer: BytesMut,

    /// Whether ANSI escape codes are stripped on the way in.
    strip_ansi: bool,
}

impl CaptureBuffer {
    /// Create a new capture buffer.
    pub fn new(strip_ansi: bool) -> Self {
        Self {
            buffer: BytesMut::with_capacity(16 * 1024),
            strip_ansi,
        }
    }

    /// Extend the buffer with new data.
    pub fn extend(&mut self, data: &[u8]) {
        if self.strip_ansi {
            let cleaned = strip_ansi_escapes::strip(data);
            self.buffer.extend_from_slice(&cleaned);
        } else {
            self.buffer.extend_from_slice(data);
        }
    }

    /// Take at most `budget` bytes from the front of the buffer.
    pub fn take_up_to(&mut self, budget: usize) -> Vec<u8> {
        let n = budget.min(self.buffer.len());
        self.buffer.split_to(n).to_vec()
    }

    /// Get a reference to the buffer contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Get the current buffer length.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

}

impl Default for CaptureBuffer {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Split decoded output on `'\n'`.
///
/// Every separator yields a boundary, so trailing newlines produce a final
/// empty line and `'\r'` is left in place for the parser to ignore.
pub fn split_lines(text: &str) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    for pos in memchr_iter(b'\n', bytes) {
        lines.push(text[start..pos].to_string());
        start = pos + 1;
    }
    lines.push(text[start..].to_string());
    lines
}
