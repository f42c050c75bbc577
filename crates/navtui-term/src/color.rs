// SPDX-License-Identifier: MIT
//
// Colors the menu can put on screen.
//
// Two kinds only: the sixteen classic SGR foreground colors (used for the
// accent) and 24-bit RGB (used for gradients). Anything fancier lives in
// the theme crate, which reduces its work to one of these two before it
// reaches the driver.

use std::fmt;

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// A 24-bit sRGB color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// `#ffffff`, the fallback when there is nothing to interpolate.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// `#000000`.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// A color from its three channels.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`.
    ///
    /// Returns `None` for anything else (short forms are not accepted).
    #[must_use]
    pub fn hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Debug for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rgb(#{:02x}{:02x}{:02x})", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

// ─── AccentColor ─────────────────────────────────────────────────────────────

/// One of the sixteen classic terminal foreground colors.
///
/// The discriminant is the SGR parameter, so `ESC[{code}m` selects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum AccentColor {
    Reset = 0,
    Black = 30,
    Red = 31,
    Green = 32,
    Yellow = 33,
    Blue = 34,
    Magenta = 35,
    #[default]
    Cyan = 36,
    White = 37,
    BrightBlack = 90,
    BrightRed = 91,
    BrightGreen = 92,
    BrightYellow = 93,
    BrightBlue = 94,
    BrightMagenta = 95,
    BrightCyan = 96,
    BrightWhite = 97,
}

impl AccentColor {
    /// All variants in SGR order.
    pub const ALL: [Self; 17] = [
        Self::Reset,
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
        Self::BrightBlack,
        Self::BrightRed,
        Self::BrightGreen,
        Self::BrightYellow,
        Self::BrightBlue,
        Self::BrightMagenta,
        Self::BrightCyan,
        Self::BrightWhite,
    ];

    /// The SGR parameter for this color.
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Lowercase name, with `bright-` prefix for the high-intensity half.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::BrightBlack => "bright-black",
            Self::BrightRed => "bright-red",
            Self::BrightGreen => "bright-green",
            Self::BrightYellow => "bright-yellow",
            Self::BrightBlue => "bright-blue",
            Self::BrightMagenta => "bright-magenta",
            Self::BrightCyan => "bright-cyan",
            Self::BrightWhite => "bright-white",
        }
    }

    /// Inverse of [`name`](Self::name). Underscores are accepted in place of
    /// the dash and matching ignores ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL.into_iter().find(|c| c.name() == wanted)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Rgb ───────────────────────────────────────────────────────────

    #[test]
    fn hex_with_and_without_hash() {
        assert_eq!(Rgb::hex("#ff8000"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(Rgb::hex("00ffcc"), Some(Rgb::new(0, 255, 204)));
    }

    #[test]
    fn hex_rejects_bad_input() {
        assert_eq!(Rgb::hex("#fff"), None);
        assert_eq!(Rgb::hex("#gg0000"), None);
        assert_eq!(Rgb::hex("#ff00ééé"), None);
        assert_eq!(Rgb::hex(""), None);
    }

    #[test]
    fn debug_is_hex() {
        assert_eq!(format!("{:?}", Rgb::new(1, 2, 255)), "Rgb(#0102ff)");
    }

    #[test]
    fn from_tuple() {
        assert_eq!(Rgb::from((10, 20, 30)), Rgb::new(10, 20, 30));
    }

    // ── AccentColor ───────────────────────────────────────────────────

    #[test]
    fn sgr_codes() {
        assert_eq!(AccentColor::Reset.code(), 0);
        assert_eq!(AccentColor::Black.code(), 30);
        assert_eq!(AccentColor::Cyan.code(), 36);
        assert_eq!(AccentColor::White.code(), 37);
        assert_eq!(AccentColor::BrightBlack.code(), 90);
        assert_eq!(AccentColor::BrightWhite.code(), 97);
    }

    #[test]
    fn default_is_cyan() {
        assert_eq!(AccentColor::default(), AccentColor::Cyan);
    }

    #[test]
    fn names_round_trip() {
        for c in AccentColor::ALL {
            assert_eq!(AccentColor::from_name(c.name()), Some(c));
        }
    }

    #[test]
    fn from_name_is_lenient() {
        assert_eq!(AccentColor::from_name("Bright_Blue"), Some(AccentColor::BrightBlue));
        assert_eq!(AccentColor::from_name(" RED "), Some(AccentColor::Red));
        assert_eq!(AccentColor::from_name("purple"), None);
    }
}
