//! Named preset themes.
//!
//! Each preset starts from [`Theme::default`] and changes the markers,
//! border and colors to give the menu a distinct look.

use navtui_term::AccentColor;

use crate::border::BorderStyle;
use crate::theme::Theme;

/// Look up a builtin theme by name.
///
/// Returns `None` if the name is not recognized.
#[must_use]
pub fn builtin_theme(name: &str) -> Option<Theme> {
    let base = Theme::default();
    Some(match name {
        "default" => base,
        // Plain ASCII everywhere, no color.
        "minimal" => Theme {
            use_unicode: false,
            use_colors: false,
            selected_prefix: "* ".into(),
            unselected_prefix: "  ".into(),
            border_style: BorderStyle::Ascii,
            ..base
        },
        "fancy" => Theme {
            use_unicode: true,
            use_colors: true,
            selected_prefix: "✓ ".into(),
            unselected_prefix: "○ ".into(),
            border_style: BorderStyle::Rounded,
            ..base
        },
        "retro" => Theme {
            use_unicode: false,
            use_colors: false,
            selected_indicator: 'X',
            selected_prefix: "[X] ".into(),
            unselected_prefix: "[ ] ".into(),
            border_style: BorderStyle::Double,
            ..base
        },
        "modern" => Theme {
            use_unicode: true,
            use_colors: true,
            selected_prefix: "● ".into(),
            unselected_prefix: "○ ".into(),
            border_style: BorderStyle::Rounded,
            accent_color: AccentColor::Blue,
            ..base
        },
        _ => return None,
    })
}

/// List all available builtin theme names.
#[must_use]
pub const fn builtin_names() -> &'static [&'static str] {
    &["default", "minimal", "fancy", "retro", "modern"]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
