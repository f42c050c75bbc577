//! Visual theme: indicators, prefixes, colors, border and gradient.
//!
//! A [`Theme`] is a plain value. The renderer reads it once per frame and
//! asks it to style text through [`Theme::highlight`] and
//! [`Theme::accent`], which return strings with the escape sequences
//! already spliced in.

use navtui_term::AccentColor;
use navtui_term::ansi;

use crate::border::BorderStyle;
use crate::gradient::{self, GradientPreset, Rng};

/// Everything that decides how the menu looks, as opposed to where things go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Shown before selected items when unicode is off.
    pub selected_indicator: char,
    pub unselected_indicator: char,
    /// Shown before selected items when unicode is on.
    pub selected_prefix: String,
    pub unselected_prefix: String,
    /// Marks the row under the cursor. Other rows get blanks of equal width.
    pub highlighted_prefix: String,
    /// Unicode markers and border glyphs; ASCII otherwise.
    pub use_unicode: bool,
    /// Accent and gradient escapes; plain text otherwise.
    pub use_colors: bool,
    /// Paint the highlighted row with [`gradient`](Self::gradient).
    pub gradient_enabled: bool,
    /// Shuffle the gradient steps on every repaint.
    pub gradient_randomize: bool,
    pub border_style: BorderStyle,
    pub accent_color: AccentColor,
    pub gradient: GradientPreset,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            selected_indicator: '*',
            unselected_indicator: ' ',
            selected_prefix: "✓ ".into(),
            unselected_prefix: "  ".into(),
            highlighted_prefix: "> ".into(),
            use_unicode: true,
            use_colors: true,
            gradient_enabled: false,
            gradient_randomize: false,
            border_style: BorderStyle::Rounded,
            accent_color: AccentColor::Cyan,
            gradient: GradientPreset::None,
        }
    }
}

impl Theme {
    /// Whether highlighted rows are painted with a gradient.
    #[must_use]
    pub const fn paints_gradient(&self) -> bool {
        self.gradient_enabled && !self.gradient.is_none()
    }

    /// Style the row under the cursor.
    ///
    /// Gradient when enabled and a preset is set (shuffled with `rng` when
    /// randomizing), else the accent color when colors are on, else `text`
    /// unchanged.
    #[must_use]
    pub fn highlight(&self, text: &str, rng: Option<&mut Rng>) -> String {
        if self.paints_gradient() {
            let rng = if self.gradient_randomize { rng } else { None };
            gradient::paint(text, &self.gradient, rng)
        } else {
            self.accent(text)
        }
    }

    /// `text` in the accent color, or unchanged when colors are off.
    #[must_use]
    pub fn accent(&self, text: &str) -> String {
        if self.use_colors {
            format!("\x1b[{}m{text}{}", self.accent_color.code(), ansi::RESET)
        } else {
            text.to_owned()
        }
    }

    /// The border actually drawn once `use_unicode` is taken into account.
    #[must_use]
    pub const fn effective_border(&self) -> BorderStyle {
        self.border_style.effective(self.use_unicode)
    }

    /// Selection marker for an item row: the prefix form with unicode,
    /// `"{indicator} "` without.
    #[must_use]
    pub fn selection_marker(&self, selected: bool) -> String {
        match (self.use_unicode, selected) {
            (true, true) => self.selected_prefix.clone(),
            (true, false) => self.unselected_prefix.clone(),
            (false, true) => format!("{} ", self.selected_indicator),
            (false, false) => format!("{} ", self.unselected_indicator),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navtui_term::Rgb;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let t = Theme::default();
        assert_eq!(t.selected_indicator, '*');
        assert_eq!(t.selected_prefix, "✓ ");
        assert_eq!(t.highlighted_prefix, "> ");
        assert_eq!(t.border_style, BorderStyle::Rounded);
        assert_eq!(t.accent_color, AccentColor::Cyan);
        assert!(t.use_unicode && t.use_colors);
        assert!(!t.gradient_enabled && !t.gradient_randomize);
        assert_eq!(t.gradient, GradientPreset::None);
    }

    #[test]
    fn highlight_uses_accent_by_default() {
        assert_eq!(Theme::default().highlight("x", None), "\x1b[36mx\x1b[0m");
    }

    #[test]
    fn highlight_plain_without_colors() {
        let t = Theme {
            use_colors: false,
            ..Theme::default()
        };
        assert_eq!(t.highlight("x", None), "x");
    }

    #[test]
    fn gradient_enabled_but_none_falls_back_to_accent() {
        let t = Theme {
            gradient_enabled: true,
            ..Theme::default()
        };
        assert!(!t.paints_gradient());
        assert_eq!(t.highlight("x", None), "\x1b[36mx\x1b[0m");
    }

    #[test]
    fn gradient_highlight() {
        let t = Theme {
            gradient_enabled: true,
            gradient: GradientPreset::Custom(vec![Rgb::new(9, 9, 9)]),
            ..Theme::default()
        };
        assert_eq!(t.highlight("ok", None), "\x1b[38;2;9;9;9mo\x1b[38;2;9;9;9mk\x1b[0m");
    }

    #[test]
    fn randomize_ignored_without_flag() {
        let t = Theme {
            gradient_enabled: true,
            gradient: GradientPreset::Rainbow,
            ..Theme::default()
        };
        let mut rng = Rng::new(3);
        assert_eq!(t.highlight("abcdef", Some(&mut rng)), t.highlight("abcdef", None));
    }

    #[test]
    fn ascii_border_without_unicode() {
        let t = Theme {
            use_unicode: false,
            border_style: BorderStyle::Double,
            ..Theme::default()
        };
        assert_eq!(t.effective_border(), BorderStyle::Ascii);
    }

    #[test]
    fn selection_markers() {
        let mut t = Theme::default();
        assert_eq!(t.selection_marker(true), "✓ ");
        assert_eq!(t.selection_marker(false), "  ");
        t.use_unicode = false;
        assert_eq!(t.selection_marker(true), "* ");
        assert_eq!(t.selection_marker(false), "  ");
    }
}
