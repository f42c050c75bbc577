// SPDX-License-Identifier: MIT
//
// Windows console driver.
//
// Raw mode here means: no line input, no echo (Ctrl-C still interrupts), and
// virtual-terminal processing on both handles. With VT input enabled the
// console delivers the same byte sequences a POSIX tty would (arrows as
// `ESC [ A`, and so on), so the shared decoder and the ANSI emitters work
// unchanged.
//
// Safety: console handles and modes are only reachable through the Win32
// API. Each unsafe block is a single call with valid out-pointers.
#![allow(unsafe_code)]

use std::io::{self, Write};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use windows_sys::Win32::Foundation::{HANDLE, INVALID_HANDLE_VALUE};
use windows_sys::Win32::Storage::FileSystem::ReadFile;
use windows_sys::Win32::System::Console::{
    CONSOLE_SCREEN_BUFFER_INFO, ENABLE_ECHO_INPUT, ENABLE_LINE_INPUT, ENABLE_PROCESSED_INPUT,
    ENABLE_PROCESSED_OUTPUT, ENABLE_VIRTUAL_TERMINAL_INPUT, ENABLE_VIRTUAL_TERMINAL_PROCESSING,
    GetConsoleMode, GetConsoleScreenBufferInfo, GetStdHandle, INPUT_RECORD, PeekConsoleInputW,
    ReadConsoleInputW, STD_INPUT_HANDLE, STD_OUTPUT_HANDLE, SetConsoleCP, SetConsoleMode,
    SetConsoleOutputCP,
};
use windows_sys::Win32::System::Threading::WaitForSingleObject;

use crate::output::OutputBuffer;
use crate::terminal::{EMERGENCY_RESTORE, Size, TerminalDriver};

const CP_UTF8: u32 = 65001;
const WAIT_OBJECT_0: u32 = 0;
const KEY_EVENT: u16 = 0x0001;

/// Saved `(input handle, input mode, output handle, output mode)` for the
/// panic hook.
static CONSOLE_BACKUP: Mutex<Option<(HANDLE, u32, HANDLE, u32)>> = Mutex::new(None);

pub(crate) fn emergency_restore() {
    let mut stdout = io::stdout();
    let _ = stdout.write_all(EMERGENCY_RESTORE);
    let _ = stdout.flush();
    if let Ok(guard) = CONSOLE_BACKUP.lock() {
        if let Some((input, in_mode, output, out_mode)) = *guard {
            unsafe {
                SetConsoleMode(input, in_mode);
                SetConsoleMode(output, out_mode);
            }
        }
    }
}

fn valid(handle: HANDLE) -> bool {
    handle != 0 && handle != INVALID_HANDLE_VALUE
}

/// Terminal on a Windows console.
pub struct ConsoleTerminal {
    input: HANDLE,
    output: HANDLE,
    /// Modes saved by `enter_raw_mode`: `(input, output)`.
    saved: Option<(u32, u32)>,
    out: OutputBuffer,
}

impl ConsoleTerminal {
    /// A driver on the process's standard handles, not yet raw.
    #[must_use]
    pub fn new() -> Self {
        let (input, output) = unsafe { (GetStdHandle(STD_INPUT_HANDLE), GetStdHandle(STD_OUTPUT_HANDLE)) };
        Self {
            input,
            output,
            saved: None,
            out: OutputBuffer::new(),
        }
    }

    /// Whether the head of the input queue holds a key press that will
    /// produce bytes. Other records (focus, mouse, resize, key releases)
    /// are consumed so they do not wake the wait forever.
    fn key_pending(&self) -> bool {
        loop {
            let mut record: INPUT_RECORD = unsafe { std::mem::zeroed() };
            let mut count = 0u32;
            if unsafe { PeekConsoleInputW(self.input, &mut record, 1, &mut count) } == 0 || count == 0 {
                return false;
            }
            if record.EventType == KEY_EVENT {
                let key = unsafe { record.Event.KeyEvent };
                if key.bKeyDown != 0 && unsafe { key.uChar.UnicodeChar } != 0 {
                    return true;
                }
            }
            unsafe {
                ReadConsoleInputW(self.input, &mut record, 1, &mut count);
            }
        }
    }
}

impl Default for ConsoleTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalDriver for ConsoleTerminal {
    fn enter_raw_mode(&mut self) -> io::Result<()> {
        if self.saved.is_some() {
            return Ok(());
        }
        if !valid(self.input) || !valid(self.output) {
            return Err(io::Error::new(io::ErrorKind::Unsupported, "no console attached"));
        }

        let mut in_mode = 0u32;
        let mut out_mode = 0u32;
        unsafe {
            if GetConsoleMode(self.input, &mut in_mode) == 0
                || GetConsoleMode(self.output, &mut out_mode) == 0
            {
                return Err(io::Error::last_os_error());
            }

            // Processed input stays on so Ctrl-C still interrupts.
            let raw_in = (in_mode & !(ENABLE_LINE_INPUT | ENABLE_ECHO_INPUT))
                | ENABLE_PROCESSED_INPUT
                | ENABLE_VIRTUAL_TERMINAL_INPUT;
            let raw_out = out_mode | ENABLE_PROCESSED_OUTPUT | ENABLE_VIRTUAL_TERMINAL_PROCESSING;

            if SetConsoleMode(self.input, raw_in) == 0 {
                return Err(io::Error::last_os_error());
            }
            if SetConsoleMode(self.output, raw_out) == 0 {
                let err = io::Error::last_os_error();
                SetConsoleMode(self.input, in_mode);
                return Err(err);
            }
            SetConsoleOutputCP(CP_UTF8);
            SetConsoleCP(CP_UTF8);
        }

        self.saved = Some((in_mode, out_mode));
        if let Ok(mut guard) = CONSOLE_BACKUP.lock() {
            *guard = Some((self.input, in_mode, self.output, out_mode));
        }

        self.hide_cursor();
        self.flush();
        Ok(())
    }

    fn leave_raw_mode(&mut self) -> io::Result<()> {
        let Some((in_mode, out_mode)) = self.saved.take() else {
            return Ok(());
        };

        self.reset_formatting();
        self.show_cursor();
        self.flush();

        let ok = unsafe { SetConsoleMode(self.input, in_mode) != 0 && SetConsoleMode(self.output, out_mode) != 0 };
        if let Ok(mut guard) = CONSOLE_BACKUP.lock() {
            *guard = None;
        }
        if ok { Ok(()) } else { Err(io::Error::last_os_error()) }
    }

    fn is_raw(&self) -> bool {
        self.saved.is_some()
    }

    fn terminal_size(&self) -> Size {
        let mut info: CONSOLE_SCREEN_BUFFER_INFO = unsafe { std::mem::zeroed() };
        if !valid(self.output) || unsafe { GetConsoleScreenBufferInfo(self.output, &mut info) } == 0 {
            return Size::FALLBACK;
        }
        let cols = i32::from(info.srWindow.Right) - i32::from(info.srWindow.Left) + 1;
        let rows = i32::from(info.srWindow.Bottom) - i32::from(info.srWindow.Top) + 1;
        match (u16::try_from(cols), u16::try_from(rows)) {
            (Ok(c), Ok(r)) if c > 0 && r > 0 => Size::new(c, r),
            _ => Size::FALLBACK,
        }
    }

    fn byte_available(&mut self, timeout: Duration) -> bool {
        if !valid(self.input) {
            return false;
        }
        let deadline = Instant::now() + timeout;
        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            let ms = u32::try_from(left.as_millis()).unwrap_or(u32::MAX);
            if unsafe { WaitForSingleObject(self.input, ms) } != WAIT_OBJECT_0 {
                return false;
            }
            if self.key_pending() {
                return true;
            }
            if left.is_zero() {
                return false;
            }
        }
    }

    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = 0u8;
        let mut read = 0u32;
        let ok = unsafe { ReadFile(self.input, &mut byte, 1, &mut read, std::ptr::null_mut()) };
        (ok != 0 && read == 1).then_some(byte)
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

impl Drop for ConsoleTerminal {
    fn drop(&mut self) {
        let _ = self.leave_raw_mode();
    }
}
