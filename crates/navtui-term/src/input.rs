// SPDX-License-Identifier: MIT
//
// Key decoder.
//
// Turns the raw byte stream from a `TerminalDriver` into `KeyEvent`s. The
// menu only needs the legacy encodings: single control bytes, printable
// ASCII, and the short CSI / SS3 sequences terminals send for arrows,
// Home/End and the `~`-terminated editing keys.
//
// # Design
//
// A four-state machine fed one byte at a time:
//
//   Idle ──ESC──▶ SawEscape ──'[' | 'O'──▶ SawCsiPrefix ──'5' | '6' | '3'──▶ AwaitTrailer
//
// `feed` returns `Some` as soon as a key is complete. A lone ESC is
// ambiguous (Escape key, or the start of a sequence), so the caller waits
// `ESCAPE_TIMEOUT` for a continuation byte and calls `timeout` if none
// arrives. `next_key` packages that dance over a driver.

use std::time::Duration;

use crate::terminal::TerminalDriver;

/// How long to wait for the byte after an ESC before calling it a keypress.
pub const ESCAPE_TIMEOUT: Duration = Duration::from_millis(10);

const ESC: u8 = 0x1b;
const ETX: u8 = 0x03;

// ─── Event Types ────────────────────────────────────────────────────────────

/// Identity of a decoded key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    // ── Navigation ──────────────────────────────────────────────
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    // ── Named keys ──────────────────────────────────────────────
    Delete,
    Enter,
    Space,
    Tab,
    Backspace,
    Escape,
    /// A printable character; see [`KeyEvent::character`].
    Normal,
    /// Anything the decoder does not recognise.
    Unknown,
}

/// A decoded keypress.
///
/// `character` is set only for [`Key::Normal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// Which key was pressed.
    pub key: Key,
    /// The character typed, for [`Key::Normal`] only.
    pub character: Option<char>,
}

impl KeyEvent {
    /// A non-character key.
    #[inline]
    #[must_use]
    pub const fn new(key: Key) -> Self {
        Self { key, character: None }
    }

    /// A printable character.
    #[inline]
    #[must_use]
    pub const fn char(c: char) -> Self {
        Self {
            key: Key::Normal,
            character: Some(c),
        }
    }

    /// `true` if this is the printable character `c`.
    #[inline]
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        self.key == Key::Normal && self.character == Some(c)
    }

    /// The digit value for `'0'..='9'`.
    #[must_use]
    pub fn digit(&self) -> Option<u32> {
        self.character.filter(|_| self.key == Key::Normal)?.to_digit(10)
    }
}

// ─── Decoder ────────────────────────────────────────────────────────────────

/// Where the decoder is inside a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecoderState {
    /// Between keys.
    #[default]
    Idle,
    /// Saw ESC, waiting to see whether a sequence follows.
    SawEscape,
    /// Saw `ESC [` or `ESC O`.
    SawCsiPrefix,
    /// Saw `ESC [ 5`, `6` or `3`; one trailing byte (normally `~`) remains.
    AwaitTrailer(Key),
}

/// Byte-at-a-time key decoder.
#[derive(Debug, Default)]
pub struct Decoder {
    state: DecoderState,
}

impl Decoder {
    /// A decoder with nothing pending.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: DecoderState::Idle,
        }
    }

    /// Current position inside a sequence; [`DecoderState::Idle`] between
    /// keys.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> DecoderState {
        self.state
    }

    /// Whether a sequence is partially decoded.
    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state != DecoderState::Idle
    }

    /// Feed one byte. Returns the key it completes, if any.
    pub fn feed(&mut self, byte: u8) -> Option<KeyEvent> {
        match self.state {
            DecoderState::Idle => {
                if byte == ESC {
                    self.state = DecoderState::SawEscape;
                    None
                } else {
                    Some(decode_single(byte))
                }
            }
            DecoderState::SawEscape => {
                if byte == b'[' || byte == b'O' {
                    self.state = DecoderState::SawCsiPrefix;
                    None
                } else {
                    self.state = DecoderState::Idle;
                    Some(KeyEvent::new(Key::Unknown))
                }
            }
            DecoderState::SawCsiPrefix => {
                let key = match byte {
                    b'A' => Key::ArrowUp,
                    b'B' => Key::ArrowDown,
                    b'C' => Key::ArrowRight,
                    b'D' => Key::ArrowLeft,
                    b'H' => Key::Home,
                    b'F' => Key::End,
                    b'5' | b'6' | b'3' => {
                        let pending = match byte {
                            b'5' => Key::PageUp,
                            b'6' => Key::PageDown,
                            _ => Key::Delete,
                        };
                        self.state = DecoderState::AwaitTrailer(pending);
                        return None;
                    }
                    _ => Key::Unknown,
                };
                self.state = DecoderState::Idle;
                Some(KeyEvent::new(key))
            }
            DecoderState::AwaitTrailer(key) => {
                self.state = DecoderState::Idle;
                Some(KeyEvent::new(key))
            }
        }
    }

    /// No continuation byte arrived in time: resolve whatever is pending.
    ///
    /// A lone ESC becomes [`Key::Escape`]; a `~` key missing only its
    /// trailer is reported anyway; a truncated CSI is [`Key::Unknown`].
    pub fn timeout(&mut self) -> Option<KeyEvent> {
        let key = match std::mem::take(&mut self.state) {
            DecoderState::Idle => return None,
            DecoderState::SawEscape => Key::Escape,
            DecoderState::SawCsiPrefix => Key::Unknown,
            DecoderState::AwaitTrailer(key) => key,
        };
        Some(KeyEvent::new(key))
    }

    /// Read the next key from `driver`.
    ///
    /// Waits up to `wait` for the first byte; continuation bytes get
    /// [`ESCAPE_TIMEOUT`] each. Returns `None` if nothing arrived.
    pub fn next_key<D: TerminalDriver + ?Sized>(
        &mut self,
        driver: &mut D,
        wait: Duration,
    ) -> Option<KeyEvent> {
        if !self.is_pending() && !driver.byte_available(wait) {
            return None;
        }
        loop {
            let Some(byte) = driver.read_byte() else {
                return self.timeout();
            };
            if let Some(event) = self.feed(byte) {
                return Some(event);
            }
            if !driver.byte_available(ESCAPE_TIMEOUT) {
                return self.timeout();
            }
        }
    }
}

/// Decode a whole byte slice, resolving any trailing partial sequence as
/// if the escape timeout had expired.
#[must_use]
pub fn decode_all(bytes: &[u8]) -> Vec<KeyEvent> {
    let mut decoder = Decoder::new();
    let mut keys: Vec<KeyEvent> = bytes.iter().filter_map(|&b| decoder.feed(b)).collect();
    keys.extend(decoder.timeout());
    keys
}

fn decode_single(byte: u8) -> KeyEvent {
    match byte {
        b'\n' | b'\r' => KeyEvent::new(Key::Enter),
        b' ' => KeyEvent::new(Key::Space),
        b'\t' => KeyEvent::new(Key::Tab),
        8 | 127 => KeyEvent::new(Key::Backspace),
        ETX => KeyEvent::new(Key::Escape),
        0x21..=0x7e => KeyEvent::char(char::from(byte)),
        _ => KeyEvent::new(Key::Unknown),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
