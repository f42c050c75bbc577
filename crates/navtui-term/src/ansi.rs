// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. The
// drivers call these into their frame buffer; nothing here decides when
// to emit.
//
// Coordinates are 1-based here, matching the terminal's own CUP
// convention. Row first, column second.
use std::io::{self, Write};

use crate::color::{AccentColor, Rgb};

/// Control Sequence Introducer.
pub const CSI: &str = "\x1b[";

/// The SGR reset sequence, also used to recognise where a color ends.
pub const RESET: &str = "\x1b[0m";

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor to `(row, col)`. Both are 1-based; zero is bumped to one.
#[inline]
pub fn cursor_to(w: &mut impl Write, row: u16, col: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", row.max(1), col.max(1))
}

/// Hide the cursor (DECTCEM reset).
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// Show the cursor (DECTCEM set).
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// Clear the entire screen and home the cursor.
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J\x1b[H")
}

/// Reset all SGR attributes.
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(RESET.as_bytes())
}

// ─── Foreground Color ────────────────────────────────────────────────────────

/// Set the foreground from a raw SGR parameter (30–37, 90–97, or 0).
#[inline]
pub fn fg_code(w: &mut impl Write, code: u8) -> io::Result<()> {
    write!(w, "\x1b[{code}m")
}

/// Set the foreground to one of the classic colors.
#[inline]
pub fn fg_accent(w: &mut impl Write, color: AccentColor) -> io::Result<()> {
    fg_code(w, color.code())
}

/// Set the foreground to a 24-bit color.
#[inline]
pub fn fg_rgb(w: &mut impl Write, color: Rgb) -> io::Result<()> {
    write!(w, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b)
}

/// The 24-bit foreground sequence as an owned string, for callers that
/// splice colors into text before it reaches a writer.
#[must_use]
pub fn fg_rgb_string(color: Rgb) -> String {
    format!("\x1b[38;2;{};{};{}m", color.r, color.g, color.b)
}

// ─── Escape Scanning ─────────────────────────────────────────────────────────

/// Byte length of the escape sequence starting at `s[0]`, if any.
///
/// A CSI sequence (`ESC [`) runs through its final byte (`@`..=`~`), so
/// SGR sequences end at their `m` and cursor moves at their `H`. Any other
/// `ESC x` pair is two bytes. An unterminated sequence extends to the end
/// of the string. Returns `None` when `s` does not start with `ESC`.
#[must_use]
pub fn escape_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.first() != Some(&0x1b) {
        return None;
    }
    if bytes.get(1) != Some(&b'[') {
        return Some(s.chars().take(2).map(char::len_utf8).sum());
    }
    let end = bytes[2..]
        .iter()
        .position(|b| (0x40..=0x7e).contains(b))
        .map_or(s.len(), |i| i + 3);
    Some(end)
}

/// `s` with every escape sequence removed.
#[must_use]
pub fn strip_escapes(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find('\x1b') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let skip = escape_len(tail).unwrap_or(tail.len());
        rest = &tail[skip..];
    }
    out.push_str(rest);
    out
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn emit(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    // ── Cursor ────────────────────────────────────────────────────────

    #[test]
    fn cursor_to_is_row_then_col() {
        assert_eq!(emit(|w| cursor_to(w, 5, 12)), "\x1b[5;12H");
    }

    #[test]
    fn cursor_to_clamps_zero() {
        assert_eq!(emit(|w| cursor_to(w, 0, 0)), "\x1b[1;1H");
    }

    #[test]
    fn cursor_visibility() {
        assert_eq!(emit(|w| cursor_hide(w)), "\x1b[?25l");
        assert_eq!(emit(|w| cursor_show(w)), "\x1b[?25h");
    }

    // ── Screen & color ────────────────────────────────────────────────

    #[test]
    fn clear_homes_cursor() {
        assert_eq!(emit(|w| clear_screen(w)), "\x1b[2J\x1b[H");
    }

    #[test]
    fn reset_sequence() {
        assert_eq!(emit(|w| reset(w)), "\x1b[0m");
    }

    #[test]
    fn accent_foreground() {
        assert_eq!(emit(|w| fg_accent(w, AccentColor::Cyan)), "\x1b[36m");
        assert_eq!(emit(|w| fg_accent(w, AccentColor::BrightRed)), "\x1b[91m");
    }

    #[test]
    fn rgb_foreground() {
        assert_eq!(emit(|w| fg_rgb(w, Rgb::new(255, 10, 0))), "\x1b[38;2;255;10;0m");
        assert_eq!(fg_rgb_string(Rgb::new(1, 2, 3)), "\x1b[38;2;1;2;3m");
    }

    // ── Escape scanning ───────────────────────────────────────────────

    #[test]
    fn escape_len_finds_terminator() {
        assert_eq!(escape_len("\x1b[36mabc"), Some(5));
        assert_eq!(escape_len("\x1b[38;2;1;2;3mX"), Some(13));
        assert_eq!(escape_len("abc"), None);
    }

    #[test]
    fn escape_len_unterminated_runs_to_end() {
        assert_eq!(escape_len("\x1b[36"), Some(4));
    }

    #[test]
    fn escape_len_covers_cursor_controls() {
        assert_eq!(escape_len("\x1b[5;12Hmore"), Some(7));
        assert_eq!(escape_len("\x1b[?25lx"), Some(6));
        assert_eq!(escape_len("\x1b7x"), Some(2));
        assert_eq!(escape_len("\x1b"), Some(1));
    }

    #[test]
    fn strip_removes_all_sequences() {
        assert_eq!(strip_escapes("\x1b[36mhi\x1b[0m there\x1b[1m"), "hi there");
        assert_eq!(strip_escapes("\x1b[2J\x1b[H\x1b[3;4Hmenu"), "menu");
        assert_eq!(strip_escapes("plain"), "plain");
    }
}
