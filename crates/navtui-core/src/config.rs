//! Engine configuration.
//!
//! Four plain value groups bundled in [`Config`]:
//!
//! | Group        | Decides                                            |
//! |--------------|----------------------------------------------------|
//! | [`Theme`]    | markers, colors, border glyphs, gradient           |
//! | [`Layout`]   | centering, width bounds, padding, page sizes       |
//! | [`TextConfig`] | titles, messages, help lines, what to show       |
//! | [`KeyConfig`] | quick select, vim keys, custom shortcuts, polling |
//!
//! The renderer reads a `Config` without mutating it. The engine replaces
//! groups wholesale between frames (see `Navigator::update_*`).

use std::collections::BTreeMap;
use std::time::Duration;

pub use navtui_theme::Theme;

/// Where things go on screen and how many fit on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub center_horizontally: bool,
    pub center_vertically: bool,
    /// Upper bound on the content width, in cells.
    pub max_width: u16,
    pub min_width: u16,
    /// Blank rows above the body and below the last row.
    pub vertical_padding: u16,
    /// Track the terminal width within `[min_width, max_width]`; otherwise
    /// always use `max_width`.
    pub auto_resize: bool,
    pub show_borders: bool,
    /// Page size of the item list. Never below 1 in practice.
    pub items_per_page: usize,
    /// When off, every section is on a single page.
    pub paginate_sections: bool,
    pub sections_per_page: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            center_horizontally: true,
            center_vertically: true,
            max_width: 80,
            min_width: 40,
            vertical_padding: 2,
            auto_resize: true,
            show_borders: true,
            items_per_page: 20,
            paginate_sections: true,
            sections_per_page: 15,
        }
    }
}

impl Layout {
    /// `items_per_page`, never zero.
    #[inline]
    #[must_use]
    pub fn item_page_size(&self) -> usize {
        self.items_per_page.max(1)
    }

    /// Page size for the section list holding `section_count` sections.
    #[must_use]
    pub fn section_page_size(&self, section_count: usize) -> usize {
        if self.paginate_sections {
            self.sections_per_page.max(1)
        } else {
            section_count.max(1)
        }
    }
}

/// Every string the menu prints that is not user data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextConfig {
    pub section_selection_title: String,
    /// Prepended to the section name as the item list's title.
    pub item_selection_prefix: String,
    pub empty_section_message: String,
    pub help_text_sections: String,
    pub help_text_items: String,
    pub show_help: bool,
    pub show_page_numbers: bool,
    /// `" (selected/total)"` after section names.
    pub show_counters: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            section_selection_title: "Select Section".into(),
            item_selection_prefix: "Section: ".into(),
            empty_section_message: "No items in this section.".into(),
            help_text_sections: "Enter - select | q - quit | 1-9 - quick select".into(),
            help_text_items: "Space - toggle | Enter - select | b/Esc - back | 1-9 - page".into(),
            show_help: true,
            show_page_numbers: true,
            show_counters: true,
        }
    }
}

/// Input behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyConfig {
    /// Extra keys the embedding application handles, with the help text
    /// shown for each. Delivered through `Listener::on_custom_command`.
    pub custom_shortcuts: BTreeMap<char, String>,
    /// Digits jump to sections (section list) or pages (item list).
    pub enable_quick_select: bool,
    /// `j`/`k` move, `h` goes back.
    pub enable_vim_keys: bool,
    /// Longest wait for input before the loop ticks listeners again.
    pub poll_interval: Duration,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            custom_shortcuts: BTreeMap::new(),
            enable_quick_select: true,
            enable_vim_keys: false,
            poll_interval: Duration::from_millis(100),
        }
    }
}

/// Everything that shapes the menu apart from its content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub theme: Theme,
    pub layout: Layout,
    pub text: TextConfig,
    pub keys: KeyConfig,
}
