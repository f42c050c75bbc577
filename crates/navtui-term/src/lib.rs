// SPDX-License-Identifier: MIT
//
// navtui-term — terminal layer for navtui.
//
// Owns every byte that crosses the terminal boundary: raw-mode entry and
// exit (termios on POSIX, the console API on Windows), cursor and color
// escape sequences, frame buffering, and decoding of keypresses from the
// raw input stream.
//
// Like the rest of the workspace it talks to the terminal directly with
// ANSI sequences instead of going through a TUI framework. The menu needs
// a handful of primitives, and owning them keeps POSIX and Windows output
// byte-identical.

pub mod ansi;
pub mod color;
pub mod headless;
pub mod input;
pub mod output;
pub mod terminal;

#[cfg(unix)]
pub mod posix;

#[cfg(windows)]
pub mod console;

pub use color::{AccentColor, Rgb};
pub use headless::HeadlessTerminal;
pub use input::{Decoder, Key, KeyEvent};
pub use terminal::{RawMode, Size, TerminalDriver, platform_terminal};
