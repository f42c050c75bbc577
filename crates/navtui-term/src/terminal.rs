// SPDX-License-Identifier: MIT
//
// Terminal control: the driver trait, raw-mode RAII, and panic recovery.
//
// Everything the menu does to a terminal goes through `TerminalDriver`.
// A driver knows how to toggle raw mode, report its size, and move bytes
// in and out; every drawing primitive is a provided method that appends
// an escape sequence to the driver's frame buffer. Platform drivers
// (`PosixTerminal`, `ConsoleTerminal`) and the scripted `HeadlessTerminal`
// therefore render byte-identical frames.
//
// `platform_terminal()` picks the implementation once, at startup. Code
// above this layer never branches on the OS.
//
// The panic hook writes a restore sequence straight to the output handle
// and puts the saved input mode back before the original hook prints, so
// a panic mid-frame still leaves a usable shell.

use std::io;
use std::ops::{Deref, DerefMut};
use std::sync::Once;
use std::time::Duration;

use crate::ansi;
use crate::color::{AccentColor, Rgb};
use crate::output::OutputBuffer;

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Width in columns.
    pub cols: u16,
    /// Height in rows.
    pub rows: u16,
}

impl Size {
    /// Reported when the OS cannot tell us the real size.
    pub const FALLBACK: Self = Self { cols: 80, rows: 25 };

    /// `cols` wide, `rows` tall.
    #[inline]
    #[must_use]
    pub const fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::FALLBACK
    }
}

// ─── Driver Trait ───────────────────────────────────────────────────────────

/// A terminal the navigation engine can draw on and read keys from.
///
/// Required methods cover the platform-specific parts. The drawing
/// primitives are provided: they append to [`out`](Self::out) and are
/// sent by [`flush`](Self::flush). All drawing is best-effort; write
/// failures are swallowed at `flush`.
pub trait TerminalDriver {
    /// Disable line buffering and echo, deliver input a byte at a time,
    /// and hide the cursor. Calling it while already raw is a no-op.
    ///
    /// # Errors
    ///
    /// Fails when the input is not a terminal or the mode cannot be set.
    fn enter_raw_mode(&mut self) -> io::Result<()>;

    /// Restore the mode saved by [`enter_raw_mode`](Self::enter_raw_mode)
    /// and show the cursor. A no-op when not raw.
    ///
    /// # Errors
    ///
    /// Fails when the saved mode cannot be reapplied.
    fn leave_raw_mode(&mut self) -> io::Result<()>;

    /// Whether raw mode is currently active.
    fn is_raw(&self) -> bool;

    /// Current size in cells. Never fails: falls back to [`Size::FALLBACK`].
    fn terminal_size(&self) -> Size;

    /// Wait up to `timeout` for an input byte. `true` means the next
    /// [`read_byte`](Self::read_byte) will not block.
    fn byte_available(&mut self, timeout: Duration) -> bool;

    /// Read one input byte, blocking. `None` on end of input or error.
    fn read_byte(&mut self) -> Option<u8>;

    /// Whether the input side has closed. Nothing more will ever arrive.
    fn at_eof(&self) -> bool {
        false
    }

    /// The pending frame.
    fn out(&mut self) -> &mut OutputBuffer;

    /// Send the pending frame to the terminal.
    fn flush(&mut self);

    // ── Drawing primitives ──────────────────────────────────────────

    /// Move the cursor. `row` and `col` are 1-based.
    fn move_cursor(&mut self, row: u16, col: u16) {
        let _ = ansi::cursor_to(self.out(), row, col);
    }

    fn set_fg_ansi(&mut self, code: u8) {
        let _ = ansi::fg_code(self.out(), code);
    }

    fn set_fg_accent(&mut self, color: AccentColor) {
        let _ = ansi::fg_accent(self.out(), color);
    }

    fn set_fg_rgb(&mut self, color: Rgb) {
        let _ = ansi::fg_rgb(self.out(), color);
    }

    fn reset_formatting(&mut self) {
        let _ = ansi::reset(self.out());
    }

    /// Clear the screen and home the cursor.
    fn clear_screen(&mut self) {
        let _ = ansi::clear_screen(self.out());
    }

    fn hide_cursor(&mut self) {
        let _ = ansi::cursor_hide(self.out());
    }

    fn show_cursor(&mut self) {
        let _ = ansi::cursor_show(self.out());
    }

    fn write_str(&mut self, s: &str) {
        self.out().push_str(s);
    }

    /// Move then write.
    fn write_at(&mut self, row: u16, col: u16, s: &str) {
        self.move_cursor(row, col);
        self.write_str(s);
    }
}

impl<D: TerminalDriver + ?Sized> TerminalDriver for Box<D> {
    fn enter_raw_mode(&mut self) -> io::Result<()> {
        (**self).enter_raw_mode()
    }
    fn leave_raw_mode(&mut self) -> io::Result<()> {
        (**self).leave_raw_mode()
    }
    fn is_raw(&self) -> bool {
        (**self).is_raw()
    }
    fn terminal_size(&self) -> Size {
        (**self).terminal_size()
    }
    fn byte_available(&mut self, timeout: Duration) -> bool {
        (**self).byte_available(timeout)
    }
    fn read_byte(&mut self) -> Option<u8> {
        (**self).read_byte()
    }
    fn at_eof(&self) -> bool {
        (**self).at_eof()
    }
    fn out(&mut self) -> &mut OutputBuffer {
        (**self).out()
    }
    fn flush(&mut self) {
        (**self).flush();
    }
}

// ─── Raw Mode Guard ─────────────────────────────────────────────────────────

/// Scoped raw mode. Restores the terminal when dropped, or earlier through
/// [`release`](Self::release) when the caller wants to see the failure.
///
/// Derefs to the driver, so everything inside the scope draws and reads
/// through the guard.
///
/// ```no_run
/// use navtui_term::terminal::{platform_terminal, RawMode, TerminalDriver};
///
/// let mut term = platform_terminal();
/// {
///     let mut raw = RawMode::acquire(&mut term)?;
///     raw.clear_screen();
///     raw.write_at(1, 1, "hello");
///     raw.flush();
/// } // restored here
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct RawMode<'a, D: TerminalDriver + ?Sized> {
    driver: &'a mut D,
    held: bool,
}

impl<'a, D: TerminalDriver + ?Sized> RawMode<'a, D> {
    /// Enter raw mode on `driver`.
    ///
    /// # Errors
    ///
    /// Propagates the driver's [`enter_raw_mode`](TerminalDriver::enter_raw_mode)
    /// failure. Nothing is left to restore in that case.
    pub fn acquire(driver: &'a mut D) -> io::Result<Self> {
        install_panic_hook();
        driver.enter_raw_mode()?;
        tracing::debug!("raw mode acquired");
        Ok(Self { driver, held: true })
    }

    /// Leave raw mode now.
    ///
    /// # Errors
    ///
    /// The driver's [`leave_raw_mode`](TerminalDriver::leave_raw_mode)
    /// failure. The guard does not retry on drop.
    pub fn release(mut self) -> io::Result<()> {
        self.held = false;
        self.driver.leave_raw_mode()?;
        tracing::debug!("raw mode released");
        Ok(())
    }
}

impl<D: TerminalDriver + ?Sized> Deref for RawMode<'_, D> {
    type Target = D;

    fn deref(&self) -> &D {
        self.driver
    }
}

impl<D: TerminalDriver + ?Sized> DerefMut for RawMode<'_, D> {
    fn deref_mut(&mut self) -> &mut D {
        self.driver
    }
}

impl<D: TerminalDriver + ?Sized> Drop for RawMode<'_, D> {
    fn drop(&mut self) {
        if !self.held {
            return;
        }
        if let Err(e) = self.driver.leave_raw_mode() {
            tracing::warn!(error = %e, "failed to restore terminal mode");
        } else {
            tracing::debug!("raw mode released");
        }
    }
}

// ─── Panic-Safe Restore ─────────────────────────────────────────────────────

/// Reset colors and show the cursor.
pub(crate) const EMERGENCY_RESTORE: &[u8] = b"\x1b[0m\x1b[?25h\r\n";

static PANIC_HOOK_INSTALLED: Once = Once::new();

/// Install (once per process) a panic hook that restores the terminal
/// before delegating to the previous hook.
pub fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            #[cfg(unix)]
            crate::posix::emergency_restore();
            #[cfg(windows)]
            crate::console::emergency_restore();
            original(info);
        }));
    });
}

// ─── Platform Selection ─────────────────────────────────────────────────────

/// The driver for the platform this binary was built for.
#[cfg(unix)]
#[must_use]
pub fn platform_terminal() -> Box<dyn TerminalDriver> {
    Box::new(crate::posix::PosixTerminal::new())
}

/// The driver for the platform this binary was built for.
#[cfg(windows)]
#[must_use]
pub fn platform_terminal() -> Box<dyn TerminalDriver> {
    Box::new(crate::console::ConsoleTerminal::new())
}

/// No native driver here: a headless terminal that never yields input.
#[cfg(not(any(unix, windows)))]
#[must_use]
pub fn platform_terminal() -> Box<dyn TerminalDriver> {
    Box::new(crate::headless::HeadlessTerminal::new(Size::FALLBACK))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
