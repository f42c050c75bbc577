//! Fluent construction of a [`Navigator`].
//!
//! ```
//! use navtui_core::{Item, NavigatorBuilder, Section};
//!
//! let nav = NavigatorBuilder::<()>::new()
//!     .theme_modern()
//!     .layout_compact()
//!     .text_titles("Pick a category", "Category: ")
//!     .keys_vim_style(true)
//!     .add_section(Section::new("Fruit", "").with_item(Item::new("Apple", "")))
//!     .build();
//! assert_eq!(nav.section_count(), 1);
//! ```

use std::time::Duration;

use navtui_term::AccentColor;
use navtui_theme::{BorderStyle, GradientPreset, builtin_theme};

use crate::config::{Config, KeyConfig, Layout, TextConfig, Theme};
use crate::error::ConfigError;
use crate::event::Listener;
use crate::navigation::Navigator;
use crate::section::Section;

/// Fluent construction of a [`Navigator`]. Every setter consumes and
/// returns the builder.
pub struct NavigatorBuilder<T = ()> {
    config: Config,
    sections: Vec<Section<T>>,
    listeners: Vec<Box<dyn Listener<T>>>,
}

impl<T> Default for NavigatorBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NavigatorBuilder<T> {
    /// Default configuration, no sections, no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            sections: Vec::new(),
            listeners: Vec::new(),
        }
    }

    /// The configuration built so far.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Back to defaults, dropping sections and listeners.
    #[must_use]
    pub fn reset(self) -> Self {
        Self::new()
    }

    /// The navigator, with sections and listeners in the order added.
    #[must_use]
    pub fn build(self) -> Navigator<T> {
        let mut nav = Navigator::with_config(self.config);
        nav.add_sections(self.sections);
        for listener in self.listeners {
            nav.add_boxed_listener(listener);
        }
        nav
    }

    // ── Whole groups ─────────────────────────────────────────────────

    #[must_use]
    pub fn config_all(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.config.theme = theme;
        self
    }

    #[must_use]
    pub fn layout(mut self, layout: Layout) -> Self {
        self.config.layout = layout;
        self
    }

    #[must_use]
    pub fn text(mut self, text: TextConfig) -> Self {
        self.config.text = text;
        self
    }

    #[must_use]
    pub fn keys(mut self, keys: KeyConfig) -> Self {
        self.config.keys = keys;
        self
    }

    /// Apply an option string such as `"noborders items_per_page=8"`.
    ///
    /// # Errors
    ///
    /// The first directive that does not apply; earlier ones stay applied.
    pub fn options(mut self, input: &str) -> Result<Self, ConfigError> {
        self.config.apply_str(input)?;
        Ok(self)
    }

    // ── Theme ────────────────────────────────────────────────────────

    #[must_use]
    pub fn theme_unicode(mut self, enable: bool) -> Self {
        self.config.theme.use_unicode = enable;
        self
    }

    #[must_use]
    pub fn theme_colors(mut self, enable: bool) -> Self {
        self.config.theme.use_colors = enable;
        self
    }

    /// Paint highlighted rows with `preset`. `None` turns gradients off.
    #[must_use]
    pub fn theme_gradient(mut self, preset: GradientPreset) -> Self {
        self.config.theme.gradient_enabled = !preset.is_none();
        self.config.theme.gradient = preset;
        self
    }

    #[must_use]
    pub fn theme_randomize(mut self, enable: bool) -> Self {
        self.config.theme.gradient_randomize = enable;
        self
    }

    #[must_use]
    pub fn theme_border(mut self, style: BorderStyle) -> Self {
        self.config.theme.border_style = style;
        self
    }

    #[must_use]
    pub fn theme_accent(mut self, color: AccentColor) -> Self {
        self.config.theme.accent_color = color;
        self
    }

    #[must_use]
    pub fn theme_prefixes(
        mut self,
        selected: impl Into<String>,
        unselected: impl Into<String>,
        highlighted: impl Into<String>,
    ) -> Self {
        self.config.theme.selected_prefix = selected.into();
        self.config.theme.unselected_prefix = unselected.into();
        self.config.theme.highlighted_prefix = highlighted.into();
        self
    }

    #[must_use]
    pub fn theme_indicators(mut self, selected: char, unselected: char) -> Self {
        self.config.theme.selected_indicator = selected;
        self.config.theme.unselected_indicator = unselected;
        self
    }

    #[must_use]
    pub fn theme_minimal(self) -> Self {
        self.builtin("minimal")
    }

    #[must_use]
    pub fn theme_fancy(self) -> Self {
        self.builtin("fancy")
    }

    #[must_use]
    pub fn theme_retro(self) -> Self {
        self.builtin("retro")
    }

    #[must_use]
    pub fn theme_modern(self) -> Self {
        self.builtin("modern")
    }

    fn builtin(mut self, name: &str) -> Self {
        if let Some(theme) = builtin_theme(name) {
            self.config.theme = theme;
        }
        self
    }

    // ── Layout ───────────────────────────────────────────────────────

    #[must_use]
    pub fn layout_centering(mut self, horizontal: bool, vertical: bool) -> Self {
        self.config.layout.center_horizontally = horizontal;
        self.config.layout.center_vertically = vertical;
        self
    }

    #[must_use]
    pub fn layout_width(mut self, min: u16, max: u16) -> Self {
        self.config.layout.min_width = min;
        self.config.layout.max_width = max;
        self
    }

    #[must_use]
    pub fn layout_padding(mut self, vertical: u16) -> Self {
        self.config.layout.vertical_padding = vertical;
        self
    }

    #[must_use]
    pub fn layout_auto_resize(mut self, enable: bool) -> Self {
        self.config.layout.auto_resize = enable;
        self
    }

    #[must_use]
    pub fn layout_borders(mut self, show: bool) -> Self {
        self.config.layout.show_borders = show;
        self
    }

    #[must_use]
    pub fn layout_items_per_page(mut self, count: usize) -> Self {
        self.config.layout.items_per_page = count;
        self
    }

    #[must_use]
    pub fn layout_sections_per_page(mut self, count: usize) -> Self {
        self.config.layout.sections_per_page = count;
        self
    }

    #[must_use]
    pub fn paginate_sections(mut self, paginate: bool) -> Self {
        self.config.layout.paginate_sections = paginate;
        self
    }

    /// Dense, top-left, no border.
    #[must_use]
    pub fn layout_compact(mut self) -> Self {
        let l = &mut self.config.layout;
        l.items_per_page = 25;
        l.show_borders = false;
        l.center_horizontally = false;
        l.center_vertically = false;
        l.min_width = 40;
        l.max_width = 60;
        self
    }

    #[must_use]
    pub fn layout_comfortable(mut self) -> Self {
        let l = &mut self.config.layout;
        l.items_per_page = 15;
        l.show_borders = true;
        l.center_horizontally = false;
        l.center_vertically = false;
        l.min_width = 60;
        l.max_width = 100;
        l.vertical_padding = 2;
        self
    }

    /// As wide as the terminal allows, up to 120 columns.
    #[must_use]
    pub fn layout_fullscreen(mut self) -> Self {
        let l = &mut self.config.layout;
        l.items_per_page = 30;
        l.show_borders = true;
        l.center_horizontally = false;
        l.center_vertically = false;
        l.auto_resize = true;
        l.min_width = 80;
        l.max_width = 120;
        self
    }

    #[must_use]
    pub fn layout_centered(mut self) -> Self {
        let l = &mut self.config.layout;
        l.center_horizontally = true;
        l.center_vertically = false;
        l.items_per_page = 20;
        l.show_borders = true;
        l.min_width = 60;
        l.max_width = 80;
        l.vertical_padding = 3;
        self
    }

    // ── Text ─────────────────────────────────────────────────────────

    #[must_use]
    pub fn text_titles(mut self, section_title: impl Into<String>, item_prefix: impl Into<String>) -> Self {
        self.config.text.section_selection_title = section_title.into();
        self.config.text.item_selection_prefix = item_prefix.into();
        self
    }

    #[must_use]
    pub fn text_empty_message(mut self, message: impl Into<String>) -> Self {
        self.config.text.empty_section_message = message.into();
        self
    }

    #[must_use]
    pub fn text_help(mut self, sections: impl Into<String>, items: impl Into<String>) -> Self {
        self.config.text.help_text_sections = sections.into();
        self.config.text.help_text_items = items.into();
        self
    }

    #[must_use]
    pub fn text_show_help(mut self, show: bool) -> Self {
        self.config.text.show_help = show;
        self
    }

    #[must_use]
    pub fn text_show_pages(mut self, show: bool) -> Self {
        self.config.text.show_page_numbers = show;
        self
    }

    #[must_use]
    pub fn text_show_counters(mut self, show: bool) -> Self {
        self.config.text.show_counters = show;
        self
    }

    // ── Keys ─────────────────────────────────────────────────────────

    #[must_use]
    pub fn keys_quick_select(mut self, enable: bool) -> Self {
        self.config.keys.enable_quick_select = enable;
        self
    }

    #[must_use]
    pub fn keys_vim_style(mut self, enable: bool) -> Self {
        self.config.keys.enable_vim_keys = enable;
        self
    }

    /// Advertise `key` in the help line. Handling it is up to a listener.
    #[must_use]
    pub fn keys_custom_shortcut(mut self, key: char, description: impl Into<String>) -> Self {
        self.config.keys.custom_shortcuts.insert(key, description.into());
        self
    }

    #[must_use]
    pub fn keys_poll_interval(mut self, interval: Duration) -> Self {
        self.config.keys.poll_interval = interval;
        self
    }

    // ── Content ──────────────────────────────────────────────────────

    #[must_use]
    pub fn add_section(mut self, section: Section<T>) -> Self {
        self.sections.push(section);
        self
    }

    #[must_use]
    pub fn add_sections(mut self, sections: impl IntoIterator<Item = Section<T>>) -> Self {
        self.sections.extend(sections);
        self
    }

    #[must_use]
    pub fn listener(mut self, listener: impl Listener<T> + 'static) -> Self {
        self.listeners.push(Box::new(listener));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::NavEvent;
    use crate::item::Item;
    use navtui_term::{Key, KeyEvent};
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn defaults_match_config_default() {
        let b: NavigatorBuilder = NavigatorBuilder::new();
        assert_eq!(*b.config(), Config::default());
    }

    #[test]
    fn fluent_setters_reach_config() {
        let b: NavigatorBuilder = NavigatorBuilder::new()
            .theme_unicode(false)
            .theme_border(BorderStyle::Sharp)
            .theme_accent(AccentColor::Magenta)
            .theme_indicators('+', '-')
            .layout_width(30, 50)
            .layout_items_per_page(8)
            .paginate_sections(false)
            .text_titles("Pick", "In: ")
            .text_show_counters(false)
            .keys_vim_style(true)
            .keys_custom_shortcut('s', "save");
        let c = b.config();
        assert!(!c.theme.use_unicode);
        assert_eq!(c.theme.border_style, BorderStyle::Sharp);
        assert_eq!(c.theme.accent_color, AccentColor::Magenta);
        assert_eq!((c.theme.selected_indicator, c.theme.unselected_indicator), ('+', '-'));
        assert_eq!((c.layout.min_width, c.layout.max_width), (30, 50));
        assert_eq!(c.layout.items_per_page, 8);
        assert!(!c.layout.paginate_sections);
        assert_eq!(c.text.section_selection_title, "Pick");
        assert_eq!(c.text.item_selection_prefix, "In: ");
        assert!(!c.text.show_counters);
        assert!(c.keys.enable_vim_keys);
        assert_eq!(c.keys.custom_shortcuts[&'s'], "save");
    }

    #[test]
    fn gradient_setter_enables_only_real_presets() {
        let b: NavigatorBuilder = NavigatorBuilder::new().theme_gradient(GradientPreset::Ocean);
        assert!(b.config().theme.paints_gradient());
        let b = b.theme_gradient(GradientPreset::None);
        assert!(!b.config().theme.gradient_enabled);
    }

    #[test]
    fn theme_presets() {
        let b: NavigatorBuilder = NavigatorBuilder::new().theme_retro();
        assert_eq!(b.config().theme.selected_prefix, "[X] ");
        assert_eq!(b.config().theme.border_style, BorderStyle::Double);
        let b = b.theme_modern();
        assert_eq!(b.config().theme.accent_color, AccentColor::Blue);
        let b = b.theme_minimal();
        assert!(!b.config().theme.use_colors);
        let b = b.theme_fancy();
        assert_eq!(b.config().theme.selected_prefix, "✓ ");
    }

    #[test]
    fn layout_presets() {
        let b: NavigatorBuilder = NavigatorBuilder::new().layout_compact();
        let l = &b.config().layout;
        assert!(!l.show_borders && !l.center_horizontally);
        assert_eq!((l.items_per_page, l.max_width), (25, 60));

        let b = b.layout_fullscreen();
        assert_eq!((b.config().layout.min_width, b.config().layout.max_width), (80, 120));

        let b = b.layout_centered();
        let l = &b.config().layout;
        assert!(l.center_horizontally && !l.center_vertically);
        assert_eq!(l.vertical_padding, 3);

        let b = b.layout_comfortable();
        assert_eq!(b.config().layout.items_per_page, 15);
    }

    #[test]
    fn options_string_applies_in_order() {
        let b: NavigatorBuilder = NavigatorBuilder::new()
            .options("noborders items_per_page=8 vimkeys")
            .unwrap();
        assert!(!b.config().layout.show_borders);
        assert_eq!(b.config().layout.items_per_page, 8);
        assert!(b.config().keys.enable_vim_keys);

        let err = NavigatorBuilder::<()>::new().options("bogus").err();
        assert_eq!(err, Some(ConfigError::UnknownOption("bogus".into())));
    }

    #[test]
    fn reset_drops_everything() {
        let b: NavigatorBuilder = NavigatorBuilder::new()
            .layout_borders(false)
            .add_section(Section::new("A", ""))
            .reset();
        assert_eq!(*b.config(), Config::default());
        assert_eq!(b.build().section_count(), 0);
    }

    #[test]
    fn build_carries_sections_and_listeners() {
        struct Count(Rc<Cell<usize>>);
        impl Listener for Count {
            fn on_event(&mut self, _event: &NavEvent<'_>) {
                self.0.set(self.0.get() + 1);
            }
        }

        let hits = Rc::new(Cell::new(0));
        let mut nav = NavigatorBuilder::new()
            .add_sections([
                Section::new("A", "").with_item(Item::new("a", "")),
                Section::new("B", ""),
            ])
            .listener(Count(Rc::clone(&hits)))
            .build();
        assert_eq!(nav.section_count(), 2);
        nav.handle_key(KeyEvent::new(Key::Enter));
        // StateChanged + SectionSelected.
        assert_eq!(hits.get(), 2);
    }
}
