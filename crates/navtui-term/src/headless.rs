// SPDX-License-Identifier: MIT
//
// A terminal with no terminal behind it.
//
// Input is a scripted byte queue, output is captured, the size is whatever
// the caller says. Used by the test suites of every crate in the workspace,
// and by embedders that want to drive the engine without a tty.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crate::output::OutputBuffer;
use crate::terminal::{Size, TerminalDriver};

/// In-memory [`TerminalDriver`]: scripted input, captured output, fixed
/// size. Raw mode is only bookkeeping, and either transition can be made to
/// fail.
#[derive(Default)]
pub struct HeadlessTerminal {
    size: Size,
    input: VecDeque<u8>,
    out: OutputBuffer,
    written: Vec<u8>,
    frames: usize,
    raw: bool,
    fail_raw: bool,
    fail_restore: bool,
    enters: usize,
    leaves: usize,
}

impl HeadlessTerminal {
    /// A terminal of `size` with no input queued.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Builder-style: queue `bytes` as pending input.
    #[must_use]
    pub fn with_input(mut self, bytes: &[u8]) -> Self {
        self.push_input(bytes);
        self
    }

    /// Queue more input behind whatever is pending.
    pub fn push_input(&mut self, bytes: &[u8]) {
        self.input.extend(bytes);
    }

    /// Change the reported size; the next loop iteration sees it.
    pub const fn resize(&mut self, size: Size) {
        self.size = size;
    }

    /// Make the next `enter_raw_mode` calls fail (or succeed again).
    pub const fn fail_raw_mode(&mut self, fail: bool) {
        self.fail_raw = fail;
    }

    /// Make `leave_raw_mode` fail, leaving the terminal raw.
    pub const fn fail_restore(&mut self, fail: bool) {
        self.fail_restore = fail;
    }

    /// Bytes not yet consumed.
    #[must_use]
    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    /// Everything flushed so far.
    #[must_use]
    pub fn output(&self) -> &[u8] {
        &self.written
    }

    /// Everything flushed so far, lossily decoded.
    #[must_use]
    pub fn output_string(&self) -> String {
        String::from_utf8_lossy(&self.written).into_owned()
    }

    /// Drop captured output, keeping everything else.
    pub fn clear_output(&mut self) {
        self.written.clear();
    }

    /// Number of non-empty flushes.
    #[must_use]
    pub const fn frames(&self) -> usize {
        self.frames
    }

    /// `(entered, left)` counts of actual raw-mode transitions.
    #[must_use]
    pub const fn raw_transitions(&self) -> (usize, usize) {
        (self.enters, self.leaves)
    }
}

impl TerminalDriver for HeadlessTerminal {
    fn enter_raw_mode(&mut self) -> io::Result<()> {
        if self.raw {
            return Ok(());
        }
        if self.fail_raw {
            return Err(io::Error::new(io::ErrorKind::Unsupported, "headless terminal refused raw mode"));
        }
        self.raw = true;
        self.enters += 1;
        self.hide_cursor();
        self.flush();
        Ok(())
    }

    fn leave_raw_mode(&mut self) -> io::Result<()> {
        if !self.raw {
            return Ok(());
        }
        if self.fail_restore {
            return Err(io::Error::other("headless terminal refused to restore"));
        }
        self.reset_formatting();
        self.show_cursor();
        self.flush();
        self.raw = false;
        self.leaves += 1;
        Ok(())
    }

    fn is_raw(&self) -> bool {
        self.raw
    }

    fn terminal_size(&self) -> Size {
        self.size
    }

    fn byte_available(&mut self, _timeout: Duration) -> bool {
        !self.input.is_empty()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.input.pop_front()
    }

    fn at_eof(&self) -> bool {
        self.input.is_empty()
    }

    fn out(&mut self) -> &mut OutputBuffer {
        &mut self.out
    }

    fn flush(&mut self) {
        if !self.out.is_empty() {
            self.frames += 1;
        }
        let _ = self.out.flush_to(&mut self.written);
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
