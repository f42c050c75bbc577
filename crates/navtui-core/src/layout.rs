//! Screen geometry and text fitting.
//!
//! Pure functions of the terminal size, the [`Layout`] settings and the
//! number of rows on the current page. Nothing here draws; the renderer
//! turns a [`Frame`] into escape sequences.
//!
//! All rows and columns are 1-based terminal coordinates.
//!
//! ```text
//!  border.top ─▶ ╭──────────────────────╮
//!                │                      │ ┐ vertical_padding
//!  title_row ──▶ │     Select Section   │
//!                │     ==============   │
//!                │                      │ ┐ vertical_padding
//!  body_row ───▶ │  > 1. Fruits (1/3)   │
//!                │    2. Vegetables     │
//!                ╰──────────────────────╯
//! ```

use navtui_term::Size;
use navtui_term::ansi;
use unicode_width::UnicodeWidthChar;

use crate::config::Layout;

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// `max(1, ceil(count / page_size))`. A zero page size counts as one.
#[must_use]
pub const fn total_pages(count: usize, page_size: usize) -> usize {
    let size = if page_size == 0 { 1 } else { page_size };
    let pages = count.div_ceil(size);
    if pages == 0 { 1 } else { pages }
}

/// Half-open index range of `page`: `[page * size, min(start + size, count))`.
/// Pages past the end are empty ranges at `count`.
#[must_use]
pub fn page_bounds(page: usize, page_size: usize, count: usize) -> (usize, usize) {
    let size = page_size.max(1);
    let start = page.saturating_mul(size).min(count);
    (start, (start + size).min(count))
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// A rectangle in terminal cells, `top`/`left` 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub top: u16,
    pub left: u16,
    pub width: u16,
    pub height: u16,
}

/// Where each part of a frame goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// The box to draw, when borders are on.
    pub border: Option<Rect>,
    /// First column of the content area.
    pub left: u16,
    /// Width of the content area.
    pub width: u16,
    /// Row of the title; its underline is the row below.
    pub title_row: u16,
    /// Row of the first list entry (or of the empty-section message).
    pub body_row: u16,
}

/// Width available to content, before border adjustment.
///
/// `cols - 4`, two less again with borders, then kept within
/// `[min_width, max_width]` when auto-resizing (or fixed at `max_width`).
#[must_use]
pub fn content_width(cols: u16, layout: &Layout) -> u16 {
    let mut width = cols.saturating_sub(4);
    if layout.show_borders {
        width = width.saturating_sub(2);
    }
    if layout.auto_resize {
        width.max(layout.min_width).min(layout.max_width)
    } else {
        layout.max_width
    }
}

/// Rows a frame with `visible_rows` list entries occupies, border included.
#[must_use]
pub fn content_height(visible_rows: usize, layout: &Layout) -> u16 {
    let rows = u16::try_from(visible_rows).unwrap_or(u16::MAX);
    let mut height = 3u16
        .saturating_add(rows)
        .saturating_add(2)
        .saturating_add(layout.vertical_padding.saturating_mul(2));
    if layout.show_borders {
        height = height.saturating_add(2);
    }
    height
}

/// Lay out a frame for a terminal of `size` showing `visible_rows` entries.
#[must_use]
pub fn frame(size: Size, layout: &Layout, visible_rows: usize) -> Frame {
    let mut width = content_width(size.cols, layout);
    let height = content_height(visible_rows, layout);

    let mut left = if layout.center_horizontally {
        (size.cols.saturating_sub(width) / 2).max(1)
    } else {
        1
    };
    let mut top = if layout.center_vertically {
        (size.rows.saturating_sub(height) / 2).max(1)
    } else {
        1
    };

    let border = if layout.show_borders {
        width = width.saturating_sub(2).max(10);
        left = left.saturating_sub(1).max(1);
        top = top.saturating_sub(1).max(1);
        let rect = Rect {
            top,
            left,
            width: width.saturating_add(2),
            height,
        };
        left += 1;
        top += 1;
        Some(rect)
    } else {
        None
    };

    let title_row = top.saturating_add(layout.vertical_padding);
    Frame {
        border,
        left,
        width,
        title_row,
        body_row: title_row
            .saturating_add(2)
            .saturating_add(layout.vertical_padding),
    }
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// Display width in cells, ignoring escape sequences.
#[must_use]
pub fn visible_width(s: &str) -> usize {
    let mut width = 0;
    let mut rest = s;
    while let Some(c) = rest.chars().next() {
        if let Some(len) = ansi::escape_len(rest) {
            rest = &rest[len..];
            continue;
        }
        width += c.width().unwrap_or(0);
        rest = &rest[c.len_utf8()..];
    }
    width
}

/// Longest prefix of plain text `s` that fits in `width` cells.
#[must_use]
pub fn truncate_to_width(s: &str, width: usize) -> &str {
    let mut used = 0;
    for (idx, c) in s.char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            return &s[..idx];
        }
        used += w;
    }
    s
}

/// Break plain text into lines no wider than `width`.
///
/// Explicit newlines always break. A line that reaches the limit breaks
/// at its last space (the space is dropped) or, with no space to break
/// at, is cut hard at the limit.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut rest = paragraph;
        loop {
            if visible_width(rest) <= width {
                lines.push(rest.to_string());
                break;
            }
            let fit = truncate_to_width(rest, width);
            let (line, next) = match fit.rfind(' ') {
                Some(pos) if pos > 0 => (&rest[..pos], &rest[pos + 1..]),
                _ if fit.is_empty() => {
                    // A single character wider than the line.
                    let c = rest.chars().next().map_or(0, char::len_utf8);
                    (&rest[..c], &rest[c..])
                }
                _ => (fit, &rest[fit.len()..]),
            };
            lines.push(line.to_string());
            rest = next;
        }
    }
    lines
}

/// Left padding that centers something `content` cells wide in `width`.
#[must_use]
pub const fn center_offset(content: usize, width: usize) -> usize {
    width.saturating_sub(content) / 2
}

/// `line` preceded by the spaces that center it in `width`.
#[must_use]
pub fn center_line(line: &str, width: usize) -> String {
    let pad = center_offset(visible_width(line), width);
    format!("{}{line}", " ".repeat(pad))
}

/// Wrap `text` to `width` and center each line independently.
#[must_use]
pub fn center_text(text: &str, width: usize) -> Vec<String> {
    wrap(text, width).iter().map(|l| center_line(l, width)).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── Pagination ────────────────────────────────────────────────────

    #[test]
    fn total_pages_formula() {
        assert_eq!(total_pages(0, 8), 1);
        assert_eq!(total_pages(1, 8), 1);
        assert_eq!(total_pages(8, 8), 1);
        assert_eq!(total_pages(9, 8), 2);
        assert_eq!(total_pages(12, 8), 2);
        assert_eq!(total_pages(17, 8), 3);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn total_pages_matches_ceiling_everywhere() {
        for count in 0..60_usize {
            for size in 1..12 {
                let expected = count.div_ceil(size).max(1);
                assert_eq!(total_pages(count, size), expected, "{count}/{size}");
            }
        }
    }

    #[test]
    fn bounds() {
        assert_eq!(page_bounds(0, 8, 12), (0, 8));
        assert_eq!(page_bounds(1, 8, 12), (8, 12));
        assert_eq!(page_bounds(2, 8, 12), (12, 12));
        assert_eq!(page_bounds(0, 8, 0), (0, 0));
    }

    // ── Geometry ──────────────────────────────────────────────────────

    #[test]
    fn width_clamped_between_bounds() {
        let l = Layout::default();
        assert_eq!(content_width(200, &l), 80);
        assert_eq!(content_width(70, &l), 64);
        assert_eq!(content_width(20, &l), 40);
    }

    #[test]
    fn width_fixed_without_auto_resize() {
        let l = Layout {
            auto_resize: false,
            max_width: 50,
            ..Layout::default()
        };
        assert_eq!(content_width(200, &l), 50);
        assert_eq!(content_width(10, &l), 50);
    }

    #[test]
    fn width_survives_inverted_bounds() {
        let l = Layout {
            min_width: 90,
            max_width: 60,
            ..Layout::default()
        };
        assert_eq!(content_width(200, &l), 60);
    }

    #[test]
    fn height_formula() {
        let l = Layout::default();
        // 3 + 4 + 2 + 2*2 + 2
        assert_eq!(content_height(4, &l), 15);
        let bare = Layout {
            show_borders: false,
            vertical_padding: 0,
            ..Layout::default()
        };
        assert_eq!(content_height(4, &bare), 9);
    }

    #[test]
    fn bordered_centered_frame() {
        let f = frame(Size::new(100, 40), &Layout::default(), 4);
        // width 80 → 78 after border; left (100-80)/2=10 → 9; top (40-15)/2=12 → 11
        assert_eq!(
            f.border,
            Some(Rect {
                top: 11,
                left: 9,
                width: 80,
                height: 15
            })
        );
        assert_eq!(f.left, 10);
        assert_eq!(f.width, 78);
        assert_eq!(f.title_row, 14);
        assert_eq!(f.body_row, 18);
    }

    #[test]
    fn plain_uncentered_frame() {
        let l = Layout {
            show_borders: false,
            center_horizontally: false,
            center_vertically: false,
            vertical_padding: 1,
            ..Layout::default()
        };
        let f = frame(Size::new(100, 40), &l, 3);
        assert_eq!(f.border, None);
        assert_eq!((f.left, f.width), (1, 80));
        assert_eq!((f.title_row, f.body_row), (2, 5));
    }

    #[test]
    fn tiny_terminal_stays_on_screen() {
        let f = frame(Size::new(5, 3), &Layout::default(), 20);
        let b = f.border.unwrap();
        assert!(b.top >= 1 && b.left >= 1);
        assert!(f.width >= 10);
    }

    // ── Text ──────────────────────────────────────────────────────────

    #[test]
    fn width_ignores_escapes_and_counts_wide() {
        assert_eq!(visible_width("\x1b[36mabc\x1b[0m"), 3);
        assert_eq!(visible_width("✓ ok"), 4);
        assert_eq!(visible_width("日本"), 4);
    }

    #[test]
    fn truncate() {
        assert_eq!(truncate_to_width("abcdef", 3), "abc");
        assert_eq!(truncate_to_width("日本語", 5), "日本");
        assert_eq!(truncate_to_width("ab", 9), "ab");
    }

    #[test]
    fn wrap_at_last_space() {
        assert_eq!(wrap("the quick brown fox", 10), vec!["the quick", "brown fox"]);
    }

    #[test]
    fn wrap_hard_cut_without_space() {
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_honours_newlines() {
        assert_eq!(wrap("a\nb c", 10), vec!["a", "b c"]);
    }

    #[test]
    fn wrap_leading_space_is_hard_cut() {
        assert_eq!(wrap(" abcdef", 4), vec![" abc", "def"]);
    }

    #[test]
    fn wrap_multibyte_safe() {
        assert_eq!(wrap("éééé éé", 5), vec!["éééé", "éé"]);
    }

    #[test]
    fn centering() {
        assert_eq!(center_line("ab", 6), "  ab");
        assert_eq!(center_line("abc", 6), " abc");
        assert_eq!(center_line("too long", 4), "too long");
        assert_eq!(center_text("aa bb", 4), vec![" aa", " bb"]);
    }
}
