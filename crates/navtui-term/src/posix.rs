// SPDX-License-Identifier: MIT
//
// POSIX driver: termios raw mode, TIOCGWINSZ size, poll()-based input.
//
// Safety: termios (tcgetattr, tcsetattr), ioctl, isatty, poll, read and
// the raw fd write in the panic path are plain libc calls with no safe
// std equivalent. Each unsafe block is a single call on a valid pointer.
#![allow(unsafe_code)]

use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Duration;

use crate::output::OutputBuffer;
use crate::terminal::{EMERGENCY_RESTORE, Size, TerminalDriver};

/// Saved termios for the panic hook, which cannot reach the driver.
static TERMIOS_BACKUP: Mutex<Option<libc::termios>> = Mutex::new(None);

/// Query the size via `ioctl(TIOCGWINSZ)` on stdout.
#[must_use]
pub fn query_size() -> Option<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };
    (result == 0 && ws.ws_col > 0 && ws.ws_row > 0).then(|| Size::new(ws.ws_col, ws.ws_row))
}

/// Whether stdin is attached to a terminal at all.
#[must_use]
pub fn stdin_is_tty() -> bool {
    unsafe { libc::isatty(libc::STDIN_FILENO) != 0 }
}

/// `original` with canonical mode and echo off and CR left untranslated.
/// Signal keys stay live: Ctrl-C interrupts the process.
fn raw_termios(original: libc::termios) -> libc::termios {
    let mut termios = original;
    termios.c_lflag &= !(libc::ECHO | libc::ICANON);
    termios.c_iflag &= !libc::ICRNL;
    termios.c_cc[libc::VMIN] = 1;
    termios.c_cc[libc::VTIME] = 0;
    termios
}

/// Best-effort restore from the panic hook. Writes straight to fd 1 so a
/// panic while the stdout lock is held cannot deadlock.
pub(crate) fn emergency_restore() {
    unsafe {
        let _ = libc::write(
            libc::STDOUT_FILENO,
            EMERGENCY_RESTORE.as_ptr().cast::<libc::c_void>(),
            EMERGENCY_RESTORE.len(),
        );
    }
    if let Ok(guard) = TERMIOS_BACKUP.lock() {
        if let Some(ref original) = *guard {
            unsafe {
                let _ = libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, original);
            }
        }
    }
}

/// Terminal on a POSIX tty (stdin for input, stdout for output).
pub struct PosixTerminal {
    original: Option<libc::termios>,
    out: OutputBuffer,
    eof: bool,
}

impl PosixTerminal {
    /// A driver on stdin/stdout, not yet raw.
    #[must_use]
    pub fn new() -> Self {
        Self {
            original: None,
            out: OutputBuffer::new(),
            eof: false,
        }
    }
}

impl Default for PosixTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalDriver for PosixTerminal {
    fn enter_raw_mode(&mut self) -> io::Result<()> {
        if self.original.is_some() {
            return Ok(());
        }
        if !stdin_is_tty() {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "stdin is not a terminal",
            ));
        }

        let fd = libc::STDIN_FILENO;
        unsafe {
            let mut termios: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(fd, &raw mut termios) != 0 {
                return Err(io::Error::last_os_error());
            }
            let original = termios;
            let termios = raw_termios(original);

            if libc::tcsetattr(fd, libc::TCSAFLUSH, &raw const termios) != 0 {
                return Err(io::Error::last_os_error());
            }

            self.original = Some(original);
            if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
                *guard = Some(original);
            }
        }

        self.hide_cursor();
        self.flush();
        Ok(())
    }

    fn leave_raw_mode(&mut self) -> io::Result<()> {
        let Some(original) = self.original.take() else {
            return Ok(());
        };

        self.reset_formatting();
        self.show_cursor();
        self.flush();

        unsafe {
            if libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, &raw const original) != 0 {
                return Err(io::Error::last_os_error());
            }
        }
        if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
            *guard = None;
        }
        Ok(())
    }

    fn is_raw(&self) -> bool {
        self.original.is_some()
    }

    fn terminal_size(&self) -> Size {
        query_size().unwrap_or(Size::FALLBACK)
    }

    fn byte_available(&mut self, timeout: Duration) -> bool {
        if self.eof {
            return false;
        }
        let mut pfd = libc::pollfd {
            fd: libc::STDIN_FILENO,
            events: libc::POLLIN,
            revents: 0,
        };
        let ms = i32::try_from(timeout.as_millis()).unwrap_or(i32::MAX);
        let ready = unsafe { libc::poll(&raw mut pfd, 1, ms) };
        ready > 0 && (pfd.revents & (libc::POLLIN | libc::POLLHUP)) != 0
    }

    fn read_byte(&mut self) -> Option<u8> {
        if self.eof {
            return None;
        }
        let mut byte = 0u8;
        let n = unsafe { libc::read(libc::STDIN_FILENO, (&raw mut byte).cast::<libc::c_void>(), 1) };
        match n {
            1 => Some(byte),
            0 => {
                tracing::debug!("stdin closed");
                self.eof = true;
                None
            }
            _ => None,
        }
    }

    fn at_eof(&self) -> bool {
        self.eof
    }

    fn out(&mut self) -> &mut OutputBuffer {
        &mut self.out
    }

    fn flush(&mut self) {
        let mut stdout = io::stdout().lock();
        let _ = self.out.flush_to(&mut stdout);
        let _ = stdout.flush();
    }
}

impl Drop for PosixTerminal {
    fn drop(&mut self) {
        let _ = self.leave_raw_mode();
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
