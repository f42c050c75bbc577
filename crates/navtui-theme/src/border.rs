//! Box-drawing glyph sets for the frame around the menu.

/// Which glyphs draw the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderStyle {
    #[default]
    Rounded,
    Double,
    Sharp,
    Ascii,
}

/// The six glyphs of a rectangular frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderGlyphs {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
}

impl BorderGlyphs {
    const fn new(corners: [char; 4], horizontal: char, vertical: char) -> Self {
        Self {
            top_left: corners[0],
            top_right: corners[1],
            bottom_left: corners[2],
            bottom_right: corners[3],
            horizontal,
            vertical,
        }
    }
}

impl BorderStyle {
    /// Every style, in option-string order.
    pub const ALL: [Self; 4] = [Self::Rounded, Self::Double, Self::Sharp, Self::Ascii];

    /// The glyph set drawn for this style.
    #[must_use]
    pub const fn glyphs(self) -> BorderGlyphs {
        match self {
            Self::Rounded => BorderGlyphs::new(['╭', '╮', '╰', '╯'], '─', '│'),
            Self::Double => BorderGlyphs::new(['╔', '╗', '╚', '╝'], '═', '║'),
            Self::Sharp => BorderGlyphs::new(['┌', '┐', '└', '┘'], '─', '│'),
            Self::Ascii => BorderGlyphs::new(['+', '+', '+', '+'], '-', '|'),
        }
    }

    /// The style actually drawn: anything but ASCII needs unicode output.
    #[must_use]
    pub const fn effective(self, use_unicode: bool) -> Self {
        if use_unicode { self } else { Self::Ascii }
    }

    /// Lowercase name used by option strings.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rounded => "rounded",
            Self::Double => "double",
            Self::Sharp => "sharp",
            Self::Ascii => "ascii",
        }
    }

    /// Case-insensitive inverse of [`name`](Self::name).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|s| s.name() == wanted)
    }

    /// One row of a frame `width` cells wide (corners included).
    ///
    /// `row` is 0 for the top edge, `height - 1` for the bottom, anything
    /// else for a side row (`│` + spaces + `│`). Widths under 2 yield an
    /// empty string.
    #[must_use]
    pub fn row(self, row: usize, width: usize, height: usize) -> String {
        if width < 2 {
            return String::new();
        }
        let g = self.glyphs();
        let inner = width - 2;
        let (left, fill, right) = if row == 0 {
            (g.top_left, g.horizontal, g.top_right)
        } else if row + 1 == height {
            (g.bottom_left, g.horizontal, g.bottom_right)
        } else {
            (g.vertical, ' ', g.vertical)
        };
        let mut s = String::with_capacity(width * 3);
        s.push(left);
        s.extend(std::iter::repeat_n(fill, inner));
        s.push(right);
        s
    }
}
