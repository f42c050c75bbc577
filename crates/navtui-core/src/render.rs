//! Painting a [`Navigator`] onto a terminal.
//!
//! Every frame is drawn from scratch: clear, border, title and underline,
//! the rows of the active page, then the footer. Text wider than the frame
//! wraps, and every wrapped line is centered on its own. The footer is anchored to
//! the bottom of the terminal, not to the frame: the description of the
//! highlighted entry ends four rows above the bottom and the help line two
//! rows above it, both growing upward when they wrap.
//!
//! Nothing here mutates the navigator; the only state a [`Renderer`] keeps
//! is the random source used to shuffle gradients.

use navtui_term::{Size, TerminalDriver};
use navtui_theme::{BorderStyle, Rng};

use crate::config::{Config, Theme};
use crate::event::NavigationState;
use crate::layout::{self, Frame, Rect, center_offset, visible_width, wrap};
use crate::navigation::Navigator;
use crate::section::Section;

const NO_DESCRIPTION: &str = "No description provided";

/// Draws frames. Holds only the random source for shuffled gradients.
pub struct Renderer {
    rng: Rng,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Seeded from the clock.
    #[must_use]
    pub fn new() -> Self {
        Self { rng: Rng::from_time() }
    }

    /// A renderer whose randomized gradients are reproducible.
    #[must_use]
    pub const fn with_seed(seed: u32) -> Self {
        Self { rng: Rng::new(seed) }
    }

    /// Draw one complete frame and flush it.
    pub fn draw<T, D: TerminalDriver + ?Sized>(&mut self, nav: &Navigator<T>, driver: &mut D) {
        let size = driver.terminal_size();
        let config = nav.config();
        let rows = body_rows(nav);
        let mut frame = layout::frame(size, &config.layout, rows.len().max(1));
        let width = usize::from(frame.width);

        let title = wrap(&title(nav), width);
        let blocks = wrap_rows(&config.theme, &rows, width);
        let empty = if rows.is_empty() && nav.state() == NavigationState::ItemList {
            wrap(&config.text.empty_section_message, width)
        } else {
            Vec::new()
        };

        // Wrapped lines make the frame taller; its width stays put.
        let body_lines = blocks
            .iter()
            .map(|(lines, _)| lines.len())
            .sum::<usize>()
            .max(empty.len())
            .max(1);
        let needed = body_lines + title.len().saturating_sub(1);
        if needed > rows.len().max(1) {
            frame = layout::frame(size, &config.layout, needed);
        }

        driver.reset_formatting();
        driver.clear_screen();

        if let Some(rect) = frame.border {
            draw_border(driver, rect, config.theme.effective_border());
        }
        let body_row = draw_title(driver, &frame, config, &title);

        if empty.is_empty() {
            self.draw_rows(driver, &frame, config, body_row, &blocks);
        } else {
            for (i, line) in empty.iter().enumerate() {
                let col = column(&frame, config, visible_width(line));
                driver.write_at(below(body_row, i), col, line);
            }
        }

        draw_footer(driver, nav, &frame, size);

        driver.reset_formatting();
        driver.flush();
    }

    fn draw_rows<D: TerminalDriver + ?Sized>(
        &mut self,
        driver: &mut D,
        frame: &Frame,
        config: &Config,
        top: u16,
        blocks: &[(Vec<String>, bool)],
    ) {
        let theme = &config.theme;
        let mut row = top;
        for (lines, highlighted) in blocks {
            for line in lines {
                let col = column(frame, config, visible_width(line));
                if *highlighted {
                    let styled = theme.highlight(line, Some(&mut self.rng));
                    driver.write_at(row, col, &styled);
                } else {
                    driver.write_at(row, col, line);
                }
                row = row.saturating_add(1);
            }
        }
    }
}

/// Each row behind the highlight prefix (or as many blanks) and wrapped to
/// `width`.
fn wrap_rows(theme: &Theme, rows: &[(String, bool)], width: usize) -> Vec<(Vec<String>, bool)> {
    let blank = " ".repeat(visible_width(&theme.highlighted_prefix));
    rows.iter()
        .map(|(text, highlighted)| {
            let prefix = if *highlighted { theme.highlighted_prefix.as_str() } else { blank.as_str() };
            (wrap(&format!("{prefix}{text}"), width), *highlighted)
        })
        .collect()
}

fn below(row: u16, offset: usize) -> u16 {
    row.saturating_add(u16::try_from(offset).unwrap_or(u16::MAX))
}

/// The rows of the active page with the highlighted one marked.
fn body_rows<T>(nav: &Navigator<T>) -> Vec<(String, bool)> {
    let config = nav.config();
    let selection = nav.current_selection_index();
    match nav.state() {
        NavigationState::SectionList => {
            let (start, end) = nav.section_bounds();
            nav.sections()[start..end]
                .iter()
                .enumerate()
                .map(|(i, section)| {
                    let label = section_label(start + i, section, config.text.show_counters);
                    (label, i == selection)
                })
                .collect()
        }
        NavigationState::ItemList => {
            let Some(section) = nav.current_section() else {
                return Vec::new();
            };
            let (start, end) = nav.item_bounds();
            section.items()[start..end]
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    let marker = config.theme.selection_marker(item.is_selected());
                    (format!("{marker}{}", item.name), i == selection)
                })
                .collect()
        }
    }
}

/// `"3. Name"` or `"3. Name (1/4)"`; empty sections never show a counter.
fn section_label<T>(index: usize, section: &Section<T>, counters: bool) -> String {
    let name = if counters {
        section.display_string_with_count()
    } else {
        section.display_string()
    };
    format!("{}. {name}", index + 1)
}

fn title<T>(nav: &Navigator<T>) -> String {
    let text = &nav.config().text;
    match (nav.state(), nav.current_section()) {
        (NavigationState::ItemList, Some(section)) => {
            format!("{}{}", text.item_selection_prefix, section.name)
        }
        _ => text.section_selection_title.clone(),
    }
}

/// Description of whatever the highlight is on.
fn description<T>(nav: &Navigator<T>) -> String {
    let described = match nav.state() {
        NavigationState::SectionList => nav.current_section().map(|s| s.description.as_str()),
        NavigationState::ItemList => nav.highlighted_item().map(|i| i.description.as_str()),
    };
    match described {
        Some(d) if !d.is_empty() => d.to_owned(),
        _ => NO_DESCRIPTION.to_owned(),
    }
}

/// Help text, custom shortcuts and the page indicator on one line.
fn help_line<T>(nav: &Navigator<T>) -> String {
    let config = nav.config();
    let mut line = match nav.state() {
        NavigationState::SectionList => config.text.help_text_sections.clone(),
        NavigationState::ItemList => config.text.help_text_items.clone(),
    };
    for (key, what) in &config.keys.custom_shortcuts {
        line.push_str(&format!(" | {key} - {what}"));
    }
    let paginated = match nav.state() {
        NavigationState::SectionList => config.layout.paginate_sections,
        NavigationState::ItemList => true,
    };
    if paginated && config.text.show_page_numbers {
        let (page, total) = nav.page_info();
        line.push_str(&format!(" | Page {} of {total}", page + 1));
    }
    line
}

/// First column for something `content` cells wide.
fn column(frame: &Frame, config: &Config, content: usize) -> u16 {
    let offset = if config.layout.center_horizontally {
        center_offset(content, usize::from(frame.width))
    } else {
        0
    };
    frame.left.saturating_add(u16::try_from(offset).unwrap_or(0))
}

fn draw_border<D: TerminalDriver + ?Sized>(driver: &mut D, rect: Rect, style: BorderStyle) {
    let width = usize::from(rect.width);
    let height = usize::from(rect.height);
    let vertical = style.glyphs().vertical.to_string();
    let right = rect.left.saturating_add(rect.width.saturating_sub(1));

    driver.write_at(rect.top, rect.left, &style.row(0, width, height));
    for r in 1..rect.height.saturating_sub(1) {
        let row = rect.top.saturating_add(r);
        driver.write_at(row, rect.left, &vertical);
        driver.write_at(row, right, &vertical);
    }
    let bottom = rect.top.saturating_add(rect.height.saturating_sub(1));
    driver.write_at(bottom, rect.left, &style.row(height - 1, width, height));
}

/// Title lines, then an underline as wide as the widest. Returns the row
/// the body starts on.
fn draw_title<D: TerminalDriver + ?Sized>(
    driver: &mut D,
    frame: &Frame,
    config: &Config,
    lines: &[String],
) -> u16 {
    for (i, line) in lines.iter().enumerate() {
        let col = column(frame, config, visible_width(line));
        driver.write_at(below(frame.title_row, i), col, &config.theme.accent(line));
    }
    let w = lines.iter().map(|l| visible_width(l)).max().unwrap_or(0);
    let col = column(frame, config, w);
    driver.write_at(below(frame.title_row, lines.len()), col, &"=".repeat(w));
    below(frame.body_row, lines.len().saturating_sub(1))
}

fn draw_footer<T, D: TerminalDriver + ?Sized>(
    driver: &mut D,
    nav: &Navigator<T>,
    frame: &Frame,
    size: Size,
) {
    let config = nav.config();
    let width = usize::from(frame.width);

    let lines = wrap(&description(nav), width);
    draw_anchored(driver, frame, config, &lines, size.rows.saturating_sub(4));

    if config.text.show_help {
        let lines = wrap(&help_line(nav), width);
        draw_anchored(driver, frame, config, &lines, size.rows.saturating_sub(2));
    }
}

/// Draw `lines` so the last one lands on `anchor`; rows above the screen
/// are dropped.
fn draw_anchored<D: TerminalDriver + ?Sized>(
    driver: &mut D,
    frame: &Frame,
    config: &Config,
    lines: &[String],
    anchor: u16,
) {
    let count = lines.len();
    for (i, line) in lines.iter().enumerate() {
        let above = u16::try_from(count - 1 - i).unwrap_or(u16::MAX);
        let row = match anchor.checked_sub(above) {
            Some(r) if r >= 1 => r,
            _ => continue,
        };
        let col = column(frame, config, visible_width(line));
        driver.write_at(row, col, line);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
