// SPDX-License-Identifier: MIT
//
// Frame output buffering.
//
// Every primitive the drivers expose (cursor moves, color changes, text)
// appends to an `OutputBuffer`. A frame ends with one `flush_to` call, so
// the terminal sees a single write per redraw instead of dozens of small
// ones that can tear mid-paint.

use std::io::{self, Write};

/// Accumulates the bytes of one frame.
pub struct OutputBuffer {
    buf: Vec<u8>,
}

/// A menu frame rarely exceeds a few KB even with per-character gradients.
const DEFAULT_CAPACITY: usize = 8_192;

impl OutputBuffer {
    /// An empty buffer with room for a typical frame.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    /// Bytes waiting for the next flush.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// `true` when there is nothing to flush.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The accumulated bytes (for testing and debugging).
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Append UTF-8 text as-is, escape sequences included.
    #[inline]
    pub fn push_str(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }

    /// Clear the buffer for reuse (keeps allocated capacity).
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Write accumulated output to `w` and clear the buffer.
    ///
    /// The buffer is cleared even when the write fails; a half-sent frame
    /// is never retried.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let result = w.write_all(&self.buf).and_then(|()| w.flush());
        self.buf.clear();
        result
    }
}

impl Write for OutputBuffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // No-op: the real flush is flush_to().
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn new_is_empty() {
        let out = OutputBuffer::new();
        assert!(out.is_empty());
        assert_eq!(out.len(), 0);
    }

    #[test]
    fn push_and_write_accumulate() {
        let mut out = OutputBuffer::new();
        out.push_str("ab");
        out.write_all(b"cd").unwrap();
        assert_eq!(out.as_bytes(), b"abcd");
    }

    #[test]
    fn flush_to_moves_everything_and_clears() {
        let mut out = OutputBuffer::new();
        out.push_str("frame");
        let mut sink = Vec::new();
        out.flush_to(&mut sink).unwrap();
        assert_eq!(sink, b"frame");
        assert!(out.is_empty());
    }

    #[test]
    fn flush_empty_writes_nothing() {
        let mut out = OutputBuffer::new();
        let mut sink = Vec::new();
        out.flush_to(&mut sink).unwrap();
        assert!(sink.is_empty());
    }

    #[test]
    fn failed_flush_still_clears() {
        let mut out = OutputBuffer::new();
        out.push_str("lost");
        assert!(out.flush_to(&mut FailingWriter).is_err());
        assert!(out.is_empty());
    }
}
