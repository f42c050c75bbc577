//! The navigation engine.
//!
//! A [`Navigator`] owns the sections, the configuration and the cursor. It
//! is a two-state machine:
//!
//! ```text
//!                 Enter / digit
//!   SectionList ────────────────▶ ItemList
//!        ▲                            │
//!        └────────────────────────────┘
//!          Enter / Esc / b / h(vim)
//! ```
//!
//! Both lists paginate independently. The cursor is a page index plus a
//! selection index relative to that page; moving past either end of a
//! page crosses into the neighbouring page and stops at the first and
//! last page (no wraparound).
//!
//! [`Navigator::handle_key`] is the whole key dispatch table and can be
//! driven without a terminal. [`Navigator::run`] wraps it in the loop that
//! reads keys from a [`TerminalDriver`] and repaints when something
//! changed.

use std::collections::BTreeMap;

use bitflags::bitflags;
use navtui_term::{Decoder, Key, KeyEvent, RawMode, Size, TerminalDriver};
use navtui_theme::Theme;
use tracing::{debug, info, warn};

use crate::config::{Config, KeyConfig, Layout, TextConfig};
use crate::error::{NavError, NavResult};
use crate::event::{Listener, NavEvent, NavigationState, emit};
use crate::item::Item;
use crate::layout::{page_bounds, total_pages};
use crate::render::Renderer;
use crate::section::Section;

bitflags! {
    /// Why the next frame must be drawn. Empty means the screen is current.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Changes: u8 {
        /// The selection moved within a page.
        const CURSOR = 0b0000_0001;
        /// A list changed page.
        const PAGE   = 0b0000_0010;
        /// Switched between the two lists, or a full redraw was requested.
        const SCREEN = 0b0000_0100;
        /// Items or sections were added, removed or (de)selected.
        const ITEMS  = 0b0000_1000;
        const CONFIG = 0b0001_0000;
        const RESIZE = 0b0010_0000;
    }
}

/// How a [`Navigator::run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Raw mode was held for the whole run.
    Completed,
    /// Raw mode could not be entered; input was line-buffered and echoed.
    Degraded,
}

/// Position of the highlight. Page indices are 0-based; `selection` is
/// relative to the start of the active list's current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Cursor {
    section_index: usize,
    selection: usize,
    section_page: usize,
    item_page: usize,
}

/// The two-level menu: sections, configuration, cursor and listeners.
///
/// Drive it with [`run`](Self::run), or feed keys through
/// [`handle_key`](Self::handle_key) and paint with a
/// [`Renderer`](crate::Renderer) when embedding it in another loop.
pub struct Navigator<T = ()> {
    sections: Vec<Section<T>>,
    config: Config,
    state: NavigationState,
    cursor: Cursor,
    changes: Changes,
    listeners: Vec<Box<dyn Listener<T>>>,
    quit: bool,
    last_size: Option<Size>,
}

impl<T> Default for Navigator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Navigator<T> {
    /// An empty navigator with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// An empty navigator on the section list.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            sections: Vec::new(),
            config,
            state: NavigationState::SectionList,
            cursor: Cursor::default(),
            changes: Changes::SCREEN,
            listeners: Vec::new(),
            quit: false,
            last_size: None,
        }
    }

    // ── Sections ─────────────────────────────────────────────────────

    pub fn add_section(&mut self, section: Section<T>) {
        self.sections.push(section);
        self.changes |= Changes::ITEMS;
    }

    pub fn add_sections(&mut self, sections: impl IntoIterator<Item = Section<T>>) {
        self.sections.extend(sections);
        self.changes |= Changes::ITEMS;
    }

    #[inline]
    #[must_use]
    pub fn sections(&self) -> &[Section<T>] {
        &self.sections
    }

    #[inline]
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn section(&self, index: usize) -> Option<&Section<T>> {
        self.sections.get(index)
    }

    /// Mutable access marks the screen dirty; the cursor is re-clamped
    /// before the next key or frame.
    pub fn section_mut(&mut self, index: usize) -> Option<&mut Section<T>> {
        self.changes |= Changes::ITEMS;
        self.sections.get_mut(index)
    }

    #[must_use]
    pub fn section_by_name(&self, name: &str) -> Option<&Section<T>> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn section_by_name_mut(&mut self, name: &str) -> Option<&mut Section<T>> {
        self.changes |= Changes::ITEMS;
        self.sections.iter_mut().find(|s| s.name == name)
    }

    /// Remove section `index`. Returns `false` (cursor untouched) when out
    /// of range. Removing the open section returns to the section list.
    pub fn remove_section(&mut self, index: usize) -> bool {
        if index >= self.sections.len() {
            return false;
        }
        self.sections.remove(index);

        if self.state == NavigationState::ItemList && index == self.cursor.section_index {
            self.state = NavigationState::SectionList;
            self.cursor.item_page = 0;
        } else if index < self.cursor.section_index {
            self.cursor.section_index -= 1;
        }
        if self.state == NavigationState::SectionList {
            self.place_on_section(self.cursor.section_index);
        }
        self.changes |= Changes::ITEMS | Changes::SCREEN;
        self.clamp();
        true
    }

    pub fn remove_section_by_name(&mut self, name: &str) -> bool {
        let found = self.sections.iter().position(|s| s.name == name);
        found.is_some_and(|idx| self.remove_section(idx))
    }

    /// Drop every section and reset to the first page of an empty list.
    pub fn clear_sections(&mut self) {
        self.sections.clear();
        self.state = NavigationState::SectionList;
        self.cursor = Cursor::default();
        self.changes |= Changes::ITEMS | Changes::SCREEN;
    }

    // ── Selections ───────────────────────────────────────────────────

    /// Selected item names per section, for sections with any selection.
    #[must_use]
    pub fn all_selections(&self) -> BTreeMap<String, Vec<String>> {
        self.sections
            .iter()
            .filter(|s| s.selected_count() > 0)
            .map(|s| (s.name.clone(), s.selected_names()))
            .collect()
    }

    #[must_use]
    pub fn section_selections(&self, index: usize) -> Vec<String> {
        self.sections
            .get(index)
            .map(Section::selected_names)
            .unwrap_or_default()
    }

    pub fn clear_all_selections(&mut self) {
        for s in &mut self.sections {
            s.clear_selections();
        }
        self.changes |= Changes::ITEMS;
    }

    pub fn clear_section_selections(&mut self, index: usize) {
        if let Some(s) = self.sections.get_mut(index) {
            s.clear_selections();
            self.changes |= Changes::ITEMS;
        }
    }

    // ── Configuration ────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    pub fn update_config(&mut self, config: Config) {
        self.config = config;
        self.config_changed();
    }

    pub fn update_theme(&mut self, theme: Theme) {
        self.config.theme = theme;
        self.config_changed();
    }

    pub fn update_layout(&mut self, layout: Layout) {
        self.config.layout = layout;
        self.config_changed();
    }

    pub fn update_text(&mut self, text: TextConfig) {
        self.config.text = text;
        self.config_changed();
    }

    pub fn update_keys(&mut self, keys: KeyConfig) {
        self.config.keys = keys;
        self.config_changed();
    }

    fn config_changed(&mut self) {
        // Page sizes may have changed: keep the highlight on the same section.
        if self.state == NavigationState::SectionList {
            self.place_on_section(self.cursor.section_index);
        }
        self.changes |= Changes::CONFIG;
        self.clamp();
    }

    // ── Listeners ────────────────────────────────────────────────────

    pub fn add_listener(&mut self, listener: impl Listener<T> + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn add_boxed_listener(&mut self, listener: Box<dyn Listener<T>>) {
        self.listeners.push(listener);
    }

    // ── State queries ────────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub const fn state(&self) -> NavigationState {
        self.state
    }

    /// Index of the open section, or of the highlighted one in the
    /// section list.
    #[inline]
    #[must_use]
    pub const fn current_section_index(&self) -> usize {
        self.cursor.section_index
    }

    /// Highlight position relative to the current page.
    #[inline]
    #[must_use]
    pub const fn current_selection_index(&self) -> usize {
        self.cursor.selection
    }

    #[inline]
    #[must_use]
    pub const fn current_section_page(&self) -> usize {
        self.cursor.section_page
    }

    #[inline]
    #[must_use]
    pub const fn current_item_page(&self) -> usize {
        self.cursor.item_page
    }

    #[must_use]
    pub fn current_section(&self) -> Option<&Section<T>> {
        self.sections.get(self.cursor.section_index)
    }

    /// The item under the highlight (item list only).
    #[must_use]
    pub fn highlighted_item(&self) -> Option<&Item<T>> {
        if self.state != NavigationState::ItemList {
            return None;
        }
        let (start, _) = self.item_bounds();
        self.current_section()?.item(start + self.cursor.selection)
    }

    #[must_use]
    pub fn section_page_size(&self) -> usize {
        self.config.layout.section_page_size(self.sections.len())
    }

    #[must_use]
    pub fn total_section_pages(&self) -> usize {
        total_pages(self.sections.len(), self.section_page_size())
    }

    #[must_use]
    pub fn total_item_pages(&self) -> usize {
        total_pages(self.current_item_count(), self.config.layout.item_page_size())
    }

    /// Index range of the sections on the current section page.
    #[must_use]
    pub fn section_bounds(&self) -> (usize, usize) {
        page_bounds(self.cursor.section_page, self.section_page_size(), self.sections.len())
    }

    /// Index range of the items on the current item page.
    #[must_use]
    pub fn item_bounds(&self) -> (usize, usize) {
        page_bounds(
            self.cursor.item_page,
            self.config.layout.item_page_size(),
            self.current_item_count(),
        )
    }

    /// `(page, total)` of the active list, page 0-based.
    #[must_use]
    pub fn page_info(&self) -> (usize, usize) {
        match self.state {
            NavigationState::SectionList => (self.cursor.section_page, self.total_section_pages()),
            NavigationState::ItemList => (self.cursor.item_page, self.total_item_pages()),
        }
    }

    fn current_item_count(&self) -> usize {
        self.current_section().map_or(0, Section::len)
    }

    // ── Dirty tracking ───────────────────────────────────────────────

    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.changes.is_empty()
    }

    #[inline]
    #[must_use]
    pub const fn changes(&self) -> Changes {
        self.changes
    }

    /// Return and clear the pending changes.
    pub fn take_changes(&mut self) -> Changes {
        std::mem::take(&mut self.changes)
    }

    /// Force a full redraw on the next frame.
    pub fn refresh(&mut self) {
        self.changes |= Changes::SCREEN;
    }

    // ── Transitions ──────────────────────────────────────────────────

    /// Open section `index`. Returns `false` when out of range.
    pub fn enter_section(&mut self, index: usize) -> bool {
        if index >= self.sections.len() {
            return false;
        }
        if self.state == NavigationState::ItemList {
            self.return_to_sections();
        }

        self.place_on_section(index);
        self.state = NavigationState::ItemList;
        self.cursor.item_page = 0;
        self.cursor.selection = 0;
        self.changes |= Changes::SCREEN;
        debug!(index, name = %self.sections[index].name, "entered section");

        emit(
            &mut self.listeners,
            &NavEvent::StateChanged {
                from: NavigationState::SectionList,
                to: NavigationState::ItemList,
            },
        );
        self.sections[index].trigger_enter();
        emit(
            &mut self.listeners,
            &NavEvent::SectionSelected {
                index,
                section: &self.sections[index],
            },
        );
        true
    }

    /// Back to the section list with the highlight on the section that was
    /// open. Returns `false` when already there.
    pub fn return_to_sections(&mut self) -> bool {
        if self.state != NavigationState::ItemList {
            return false;
        }
        let index = self.cursor.section_index;
        if let Some(section) = self.sections.get_mut(index) {
            section.trigger_exit();
        }
        self.state = NavigationState::SectionList;
        self.place_on_section(index);
        self.changes |= Changes::SCREEN;
        debug!(index, "returned to sections");

        emit(
            &mut self.listeners,
            &NavEvent::StateChanged {
                from: NavigationState::ItemList,
                to: NavigationState::SectionList,
            },
        );
        true
    }

    /// Stop [`run`](Self::run) at the next loop iteration.
    pub const fn quit(&mut self) {
        self.quit = true;
    }

    #[inline]
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.quit
    }

    /// Point the section-list cursor at `index`.
    fn place_on_section(&mut self, index: usize) {
        let size = self.section_page_size();
        self.cursor.section_index = index;
        self.cursor.section_page = index / size;
        self.cursor.selection = index % size;
    }

    /// Pull every cursor field back into range after a structural change.
    fn clamp(&mut self) {
        if self.sections.is_empty() {
            self.cursor = Cursor::default();
            self.state = NavigationState::SectionList;
            return;
        }
        self.cursor.section_index = self.cursor.section_index.min(self.sections.len() - 1);

        match self.state {
            NavigationState::SectionList => {
                let total = self.total_section_pages();
                self.cursor.section_page = self.cursor.section_page.min(total - 1);
                let (start, end) = self.section_bounds();
                self.cursor.selection = self.cursor.selection.min((end - start).saturating_sub(1));
                self.cursor.section_index = start + self.cursor.selection;
            }
            NavigationState::ItemList => {
                let total = self.total_item_pages();
                self.cursor.item_page = self.cursor.item_page.min(total - 1);
                let (start, end) = self.item_bounds();
                self.cursor.selection = self.cursor.selection.min((end - start).saturating_sub(1));
            }
        }
    }

    // ── Key dispatch ─────────────────────────────────────────────────

    /// Apply one key.
    ///
    /// `q`/`Q` quit from anywhere. Keys neither list handles are offered
    /// to the listeners' [`on_custom_command`](Listener::on_custom_command).
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.clamp();
        if key.is_char('q') || key.is_char('Q') {
            debug!("quit requested");
            self.quit();
            return;
        }

        let handled = self.handle_movement(key)
            || match self.state {
                NavigationState::SectionList => self.handle_section_key(key),
                NavigationState::ItemList => self.handle_item_key(key),
            };

        if !handled {
            self.offer_custom(key);
        }
    }

    fn handle_movement(&mut self, key: KeyEvent) -> bool {
        let vim = self.config.keys.enable_vim_keys;
        match key.key {
            Key::ArrowUp => self.move_up(),
            Key::ArrowDown => self.move_down(),
            Key::Normal if vim && key.is_char('k') => self.move_up(),
            Key::Normal if vim && key.is_char('j') => self.move_down(),
            Key::ArrowLeft | Key::PageUp => {
                let page = self.page_info().0;
                if page > 0 {
                    self.go_to_page(page - 1);
                }
            }
            Key::ArrowRight | Key::PageDown => {
                let page = self.page_info().0;
                self.go_to_page(page + 1);
            }
            Key::Home => {
                self.go_to_page(0);
                self.cursor.selection = 0;
                self.sync_section_index();
                self.changes |= Changes::CURSOR;
            }
            Key::End => {
                let (_, total) = self.page_info();
                self.go_to_page(total - 1);
                let (start, end) = self.active_bounds();
                self.cursor.selection = (end - start).saturating_sub(1);
                self.sync_section_index();
                self.changes |= Changes::CURSOR;
            }
            _ => return false,
        }
        true
    }

    fn handle_section_key(&mut self, key: KeyEvent) -> bool {
        if key.key == Key::Enter {
            let (start, _) = self.section_bounds();
            self.enter_section(start + self.cursor.selection);
            return true;
        }
        if let Some(n) = self.quick_select_digit(key) {
            if n <= self.sections.len() {
                self.enter_section(n - 1);
            } else if self.config.layout.paginate_sections && n <= self.total_section_pages() {
                self.go_to_page(n - 1);
            }
            return true;
        }
        false
    }

    fn handle_item_key(&mut self, key: KeyEvent) -> bool {
        let vim = self.config.keys.enable_vim_keys;
        match key.key {
            Key::Space => self.toggle_highlighted(),
            Key::Enter | Key::Escape => {
                self.return_to_sections();
            }
            Key::Normal if key.is_char('b') || (vim && key.is_char('h')) => {
                self.return_to_sections();
            }
            Key::Normal if key.is_char('a') => self.set_all_in_section(true),
            Key::Normal if key.is_char('n') => self.set_all_in_section(false),
            _ => {
                let Some(n) = self.quick_select_digit(key) else {
                    return false;
                };
                if n <= self.total_item_pages() {
                    self.go_to_page(n - 1);
                }
            }
        }
        true
    }

    /// `1`–`9` as a number, when quick select is on.
    fn quick_select_digit(&self, key: KeyEvent) -> Option<usize> {
        if !self.config.keys.enable_quick_select {
            return None;
        }
        key.digit()
            .filter(|d| (1..=9).contains(d))
            .and_then(|d| usize::try_from(d).ok())
    }

    fn offer_custom(&mut self, key: KeyEvent) {
        let state = self.state;
        let handled = self
            .listeners
            .iter_mut()
            .any(|l| l.on_custom_command(key, state));
        if handled {
            self.changes |= Changes::SCREEN;
        } else {
            debug!(?key, "unhandled key");
        }
    }

    // ── Movement ─────────────────────────────────────────────────────

    fn active_page_size(&self) -> usize {
        match self.state {
            NavigationState::SectionList => self.section_page_size(),
            NavigationState::ItemList => self.config.layout.item_page_size(),
        }
    }

    fn active_bounds(&self) -> (usize, usize) {
        match self.state {
            NavigationState::SectionList => self.section_bounds(),
            NavigationState::ItemList => self.item_bounds(),
        }
    }

    fn set_active_page(&mut self, page: usize) {
        match self.state {
            NavigationState::SectionList => self.cursor.section_page = page,
            NavigationState::ItemList => self.cursor.item_page = page,
        }
    }

    fn sync_section_index(&mut self) {
        if self.state == NavigationState::SectionList && !self.sections.is_empty() {
            let (start, _) = self.section_bounds();
            self.cursor.section_index = start + self.cursor.selection;
        }
    }

    /// Switch the active list to `page` with the selection on its first
    /// entry. Out-of-range pages and the current page are ignored.
    fn go_to_page(&mut self, page: usize) {
        let (current, total) = self.page_info();
        if page == current || page >= total {
            return;
        }
        self.set_active_page(page);
        self.cursor.selection = 0;
        self.sync_section_index();
        self.changes |= Changes::PAGE;
        emit(&mut self.listeners, &NavEvent::PageChanged { page, total });
    }

    fn move_up(&mut self) {
        if self.cursor.selection > 0 {
            self.cursor.selection -= 1;
            self.changes |= Changes::CURSOR;
        } else {
            let page = self.page_info().0;
            if page == 0 {
                return;
            }
            self.go_to_page(page - 1);
            // Previous pages are always full.
            self.cursor.selection = self.active_page_size() - 1;
        }
        self.sync_section_index();
    }

    fn move_down(&mut self) {
        let (start, end) = self.active_bounds();
        if self.cursor.selection + 1 < end - start {
            self.cursor.selection += 1;
            self.changes |= Changes::CURSOR;
            self.sync_section_index();
        } else {
            let page = self.page_info().0;
            self.go_to_page(page + 1);
        }
    }

    // ── Item actions ─────────────────────────────────────────────────

    fn toggle_highlighted(&mut self) {
        let (start, _) = self.item_bounds();
        let index = start + self.cursor.selection;
        let si = self.cursor.section_index;
        let Some(selected) = self.sections.get_mut(si).and_then(|s| s.toggle_item(index)) else {
            return;
        };
        self.changes |= Changes::ITEMS;
        let section = &self.sections[si];
        if let Some(item) = section.item(index) {
            debug!(section = %section.name, item = %item.name, index, selected, "item toggled");
            emit(
                &mut self.listeners,
                &NavEvent::ItemToggled {
                    section_index: si,
                    item_index: index,
                    section,
                    item,
                    selected,
                },
            );
        }
    }

    fn set_all_in_section(&mut self, selected: bool) {
        if let Some(section) = self.sections.get_mut(self.cursor.section_index) {
            if selected {
                section.select_all();
            } else {
                section.clear_selections();
            }
            self.changes |= Changes::ITEMS;
        }
    }

    // ── Run loop ─────────────────────────────────────────────────────

    /// Show the menu on `driver` until the user quits or input closes.
    ///
    /// Raw mode is held for the duration and restored before returning,
    /// also on panic. If raw mode cannot be entered the loop still runs
    /// and the result is [`RunStatus::Degraded`]. Listeners receive
    /// [`NavEvent::Exit`] after the terminal is restored.
    ///
    /// # Errors
    ///
    /// [`NavError::NoSections`] when there is nothing to show; the
    /// terminal is not touched in that case. [`NavError::Terminal`] when raw
    /// mode could not be left; listeners have already seen `Exit`.
    pub fn run<D: TerminalDriver + ?Sized>(&mut self, driver: &mut D) -> NavResult<RunStatus> {
        if self.sections.is_empty() {
            return Err(NavError::NoSections);
        }
        info!(sections = self.sections.len(), "navigation started");
        self.quit = false;
        self.changes |= Changes::SCREEN;

        let mut restored = Ok(());
        let degraded = match RawMode::acquire(&mut *driver) {
            Ok(mut raw) => {
                self.event_loop(&mut *raw);
                restored = raw.release();
                false
            }
            Err(e) => {
                warn!(error = %e, "raw mode unavailable, continuing without it");
                true
            }
        };
        if degraded {
            self.event_loop(driver);
        }

        info!("navigation finished");
        emit(&mut self.listeners, &NavEvent::Exit { sections: &self.sections });
        if let Err(e) = restored {
            warn!(error = %e, "terminal left in raw mode");
            return Err(NavError::Terminal(e));
        }
        Ok(if degraded { RunStatus::Degraded } else { RunStatus::Completed })
    }

    fn event_loop<D: TerminalDriver + ?Sized>(&mut self, driver: &mut D) {
        let mut decoder = Decoder::new();
        let mut renderer = Renderer::new();

        while !self.quit {
            self.check_resize(driver.terminal_size());
            if self.is_dirty() {
                self.clamp();
                renderer.draw(self, driver);
                self.changes = Changes::empty();
            }
            if self.tick_listeners() {
                self.changes |= Changes::SCREEN;
            }
            if driver.at_eof() {
                debug!("input closed");
                break;
            }
            if let Some(key) = decoder.next_key(driver, self.config.keys.poll_interval) {
                self.handle_key(key);
            }
        }

        driver.reset_formatting();
        driver.clear_screen();
        driver.flush();
    }

    fn check_resize(&mut self, size: Size) {
        if self.last_size != Some(size) {
            if self.last_size.is_some() {
                debug!(cols = size.cols, rows = size.rows, "terminal resized");
            }
            self.last_size = Some(size);
            self.changes |= Changes::RESIZE;
        }
    }

    fn tick_listeners(&mut self) -> bool {
        self.listeners
            .iter_mut()
            .fold(false, |redraw, l| l.on_tick() || redraw)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use navtui_term::HeadlessTerminal;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn section(name: &str, items: usize) -> Section {
        Section::new(name, format!("{name} description"))
            .with_items((0..items).map(|i| Item::new(format!("{name}-{i}"), "")))
    }

    fn nav(counts: &[usize], layout: Layout) -> Navigator {
        let mut n = Navigator::with_config(Config {
            layout,
            ..Config::default()
        });
        for (i, c) in counts.iter().enumerate() {
            n.add_section(section(&format!("S{}", i + 1), *c));
        }
        n
    }

    fn paged(items: usize, sections: usize) -> Layout {
        Layout {
            items_per_page: items,
            sections_per_page: sections,
            ..Layout::default()
        }
    }

    fn press(n: &mut Navigator, key: Key) {
        n.handle_key(KeyEvent::new(key));
    }

    fn type_char(n: &mut Navigator, c: char) {
        n.handle_key(KeyEvent::char(c));
    }

    /// Records every event as a short string.
    #[derive(Clone, Default)]
    struct Log(Rc<RefCell<Vec<String>>>);

    impl Log {
        fn take(&self) -> Vec<String> {
            std::mem::take(&mut *self.0.borrow_mut())
        }
    }

    impl Listener for Log {
        fn on_event(&mut self, event: &NavEvent<'_>) {
            let s = match event {
                NavEvent::SectionSelected { index, .. } => format!("selected {index}"),
                NavEvent::ItemToggled {
                    section_index,
                    item_index,
                    item,
                    selected,
                    ..
                } => format!("toggled {section_index}:{item_index} {} {selected}", item.name),
                NavEvent::PageChanged { page, total } => format!("page {page}/{total}"),
                NavEvent::StateChanged { to, .. } => format!("state {to}"),
                NavEvent::Exit { sections } => format!("exit {}", sections.len()),
            };
            self.0.borrow_mut().push(s);
        }
    }

    // ── Transitions ───────────────────────────────────────────────────

    #[test]
    fn starts_on_section_list() {
        let n = nav(&[1, 2], Layout::default());
        assert_eq!(n.state(), NavigationState::SectionList);
        assert_eq!(n.current_selection_index(), 0);
        assert!(n.is_dirty());
    }

    #[test]
    fn enter_and_return() {
        let mut n = nav(&[3, 3, 3], Layout::default());
        let log = Log::default();
        n.add_listener(log.clone());

        press(&mut n, Key::ArrowDown);
        press(&mut n, Key::Enter);
        assert_eq!(n.state(), NavigationState::ItemList);
        assert_eq!(n.current_section_index(), 1);
        assert_eq!(n.current_item_page(), 0);
        assert_eq!(n.current_selection_index(), 0);
        assert_eq!(log.take(), vec!["state items", "selected 1"]);

        press(&mut n, Key::Escape);
        assert_eq!(n.state(), NavigationState::SectionList);
        assert_eq!(n.current_selection_index(), 1);
        assert_eq!(log.take(), vec!["state sections"]);
    }

    #[test]
    fn return_derives_page_from_section_index() {
        let mut n = nav(&[1; 5], paged(20, 2));
        n.enter_section(3);
        type_char(&mut n, 'b');
        assert_eq!(n.current_section_page(), 1);
        assert_eq!(n.current_selection_index(), 1);
        assert_eq!(n.current_section_index(), 3);
    }

    #[test]
    fn enter_fires_section_hooks() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let (a, b) = (Rc::clone(&calls), Rc::clone(&calls));
        let mut n: Navigator = Navigator::new();
        n.add_section(
            section("X", 1)
                .on_enter(move || a.borrow_mut().push("enter"))
                .on_exit(move || b.borrow_mut().push("exit")),
        );
        press(&mut n, Key::Enter);
        press(&mut n, Key::Enter);
        assert_eq!(*calls.borrow(), vec!["enter", "exit"]);
    }

    #[test]
    fn enter_out_of_range_is_refused() {
        let mut n = nav(&[1], Layout::default());
        assert!(!n.enter_section(4));
        assert_eq!(n.state(), NavigationState::SectionList);
    }

    // ── Movement & pagination ─────────────────────────────────────────

    #[test]
    fn down_crosses_page_and_clamps_at_end() {
        let mut n = nav(&[12], paged(8, 15));
        n.enter_section(0);
        for _ in 0..7 {
            press(&mut n, Key::ArrowDown);
        }
        assert_eq!((n.current_item_page(), n.current_selection_index()), (0, 7));
        press(&mut n, Key::ArrowDown);
        assert_eq!((n.current_item_page(), n.current_selection_index()), (1, 0));
        for _ in 0..10 {
            press(&mut n, Key::ArrowDown);
        }
        assert_eq!((n.current_item_page(), n.current_selection_index()), (1, 3));
    }

    #[test]
    fn up_crosses_to_last_slot_of_previous_page() {
        let mut n = nav(&[12], paged(8, 15));
        n.enter_section(0);
        press(&mut n, Key::ArrowRight);
        press(&mut n, Key::ArrowUp);
        assert_eq!((n.current_item_page(), n.current_selection_index()), (0, 7));
        for _ in 0..20 {
            press(&mut n, Key::ArrowUp);
        }
        assert_eq!((n.current_item_page(), n.current_selection_index()), (0, 0));
    }

    #[test]
    fn selection_stays_within_page_under_any_walk() {
        let mut n = nav(&[23], paged(5, 15));
        n.enter_section(0);
        let walk = [
            Key::ArrowDown,
            Key::ArrowDown,
            Key::ArrowRight,
            Key::ArrowDown,
            Key::End,
            Key::ArrowUp,
            Key::PageUp,
            Key::ArrowDown,
            Key::Home,
            Key::ArrowUp,
            Key::PageDown,
            Key::PageDown,
            Key::PageDown,
            Key::PageDown,
            Key::PageDown,
            Key::ArrowDown,
        ];
        for (i, k) in walk.iter().cycle().take(200).enumerate() {
            press(&mut n, *k);
            let (start, end) = n.item_bounds();
            assert!(n.current_selection_index() < end - start, "step {i}");
            assert!(n.current_item_page() < n.total_item_pages(), "step {i}");
        }
    }

    #[test]
    fn third_section_has_two_pages() {
        let mut n = nav(&[5, 0, 12], paged(8, 15));
        let log = Log::default();
        n.add_listener(log.clone());
        n.enter_section(2);
        assert_eq!(n.total_item_pages(), 2);
        log.take();
        press(&mut n, Key::ArrowRight);
        assert_eq!(n.current_item_page(), 1);
        assert_eq!(n.current_selection_index(), 0);
        assert_eq!(log.take(), vec!["page 1/2"]);
    }

    #[test]
    fn page_keys_clamp_at_ends() {
        let mut n = nav(&[12], paged(8, 15));
        n.enter_section(0);
        press(&mut n, Key::ArrowLeft);
        assert_eq!(n.current_item_page(), 0);
        press(&mut n, Key::PageDown);
        press(&mut n, Key::PageDown);
        assert_eq!(n.current_item_page(), 1);
    }

    #[test]
    fn home_and_end() {
        let mut n = nav(&[12], paged(8, 15));
        n.enter_section(0);
        press(&mut n, Key::End);
        assert_eq!((n.current_item_page(), n.current_selection_index()), (1, 3));
        press(&mut n, Key::Home);
        assert_eq!((n.current_item_page(), n.current_selection_index()), (0, 0));
    }

    #[test]
    fn section_list_paginates_and_tracks_index() {
        let mut n = nav(&[1; 5], paged(20, 2));
        assert_eq!(n.total_section_pages(), 3);
        press(&mut n, Key::ArrowDown);
        press(&mut n, Key::ArrowDown);
        assert_eq!(n.current_section_page(), 1);
        assert_eq!(n.current_section_index(), 2);
        press(&mut n, Key::End);
        assert_eq!(n.current_section_index(), 4);
        assert_eq!(n.current_selection_index(), 0);
    }

    #[test]
    fn unpaginated_sections_are_one_page() {
        let layout = Layout {
            paginate_sections: false,
            sections_per_page: 2,
            ..Layout::default()
        };
        let mut n = nav(&[1; 5], layout);
        assert_eq!(n.total_section_pages(), 1);
        for _ in 0..4 {
            press(&mut n, Key::ArrowDown);
        }
        assert_eq!(n.current_selection_index(), 4);
    }

    #[test]
    fn vim_keys_only_when_enabled() {
        let mut n = nav(&[3, 3], Layout::default());
        type_char(&mut n, 'j');
        assert_eq!(n.current_selection_index(), 0);

        let mut keys = n.config().keys.clone();
        keys.enable_vim_keys = true;
        n.update_keys(keys);
        type_char(&mut n, 'j');
        assert_eq!(n.current_selection_index(), 1);
        type_char(&mut n, 'k');
        assert_eq!(n.current_selection_index(), 0);
        press(&mut n, Key::Enter);
        type_char(&mut n, 'h');
        assert_eq!(n.state(), NavigationState::SectionList);
    }

    // ── Quick select ──────────────────────────────────────────────────

    #[test]
    fn digit_enters_section_by_global_number() {
        let mut n = nav(&[1; 5], paged(20, 2));
        type_char(&mut n, '3');
        assert_eq!(n.state(), NavigationState::ItemList);
        assert_eq!(n.current_section_index(), 2);
    }

    #[test]
    fn digit_names_section_before_page() {
        let mut n = nav(&[1; 3], paged(20, 1));
        // 3 sections on 3 pages: '3' names the section, not the page.
        type_char(&mut n, '3');
        assert_eq!(n.state(), NavigationState::ItemList);
        assert_eq!(n.current_section_index(), 2);
    }

    #[test]
    fn digit_beyond_sections_is_ignored() {
        let mut n = nav(&[1; 3], paged(20, 2));
        type_char(&mut n, '7');
        assert_eq!(n.state(), NavigationState::SectionList);
        assert_eq!(n.current_section_index(), 0);
        type_char(&mut n, '0');
        assert_eq!(n.state(), NavigationState::SectionList);
    }

    #[test]
    fn digit_in_item_list_changes_page() {
        let mut n = nav(&[20], paged(5, 15));
        n.enter_section(0);
        type_char(&mut n, '3');
        assert_eq!(n.current_item_page(), 2);
        type_char(&mut n, '9');
        assert_eq!(n.current_item_page(), 2);
    }

    #[test]
    fn digits_ignored_without_quick_select() {
        let mut n = nav(&[1; 5], Layout::default());
        let mut keys = KeyConfig::default();
        keys.enable_quick_select = false;
        n.update_keys(keys);
        type_char(&mut n, '2');
        assert_eq!(n.state(), NavigationState::SectionList);
    }

    // ── Toggling ──────────────────────────────────────────────────────

    #[test]
    fn space_toggles_and_emits_once() {
        let mut n = nav(&[12], paged(8, 15));
        let log = Log::default();
        n.add_listener(log.clone());
        n.enter_section(0);
        press(&mut n, Key::ArrowRight);
        press(&mut n, Key::ArrowDown);
        log.take();

        press(&mut n, Key::Space);
        assert!(n.sections()[0].item(9).unwrap().is_selected());
        assert_eq!(log.take(), vec!["toggled 0:9 S1-9 true"]);

        press(&mut n, Key::Space);
        assert!(!n.sections()[0].item(9).unwrap().is_selected());
        assert_eq!(log.take(), vec!["toggled 0:9 S1-9 false"]);
    }

    #[test]
    fn toggle_reports_absolute_indices() {
        let mut n = nav(&[2], paged(3, 15));
        n.add_section(
            Section::new("Twins", "")
                .with_items((0..5).map(|_| Item::new("same", ""))),
        );
        let log = Log::default();
        n.add_listener(log.clone());
        n.enter_section(1);
        press(&mut n, Key::PageDown);
        press(&mut n, Key::ArrowDown);
        log.take();

        press(&mut n, Key::Space);
        assert_eq!(n.current_item_page(), 1);
        assert_eq!(log.take(), vec!["toggled 1:4 same true"]);
        assert!(n.sections()[1].item(4).unwrap().is_selected());
        assert!(!n.sections()[1].item(3).unwrap().is_selected());
    }

    #[test]
    fn space_on_empty_section_does_nothing() {
        let mut n = nav(&[0], Layout::default());
        let log = Log::default();
        n.add_listener(log.clone());
        n.enter_section(0);
        log.take();
        press(&mut n, Key::Space);
        assert!(log.take().is_empty());
    }

    #[test]
    fn select_all_and_none() {
        let mut n = nav(&[4], Layout::default());
        n.enter_section(0);
        type_char(&mut n, 'a');
        assert_eq!(n.section_selections(0).len(), 4);
        type_char(&mut n, 'n');
        assert!(n.section_selections(0).is_empty());
    }

    #[test]
    fn all_selections_skips_empty() {
        let mut n = nav(&[2, 2], Layout::default());
        n.section_mut(1).unwrap().toggle_item(1);
        let all = n.all_selections();
        assert_eq!(all.len(), 1);
        assert_eq!(all["S2"], vec!["S2-1"]);
        n.clear_all_selections();
        assert!(n.all_selections().is_empty());
    }

    #[test]
    fn clear_section_selections_only_touches_one() {
        let mut n = nav(&[2, 2], Layout::default());
        n.section_mut(0).unwrap().select_all();
        n.section_mut(1).unwrap().select_all();
        n.clear_section_selections(0);
        assert!(n.section_selections(0).is_empty());
        assert_eq!(n.section_selections(1).len(), 2);
    }

    // ── Quit & custom keys ────────────────────────────────────────────

    #[test]
    fn q_quits_from_both_lists() {
        let mut n = nav(&[1], Layout::default());
        type_char(&mut n, 'Q');
        assert!(n.should_quit());

        let mut n = nav(&[1], Layout::default());
        n.enter_section(0);
        type_char(&mut n, 'q');
        assert!(n.should_quit());
    }

    #[test]
    fn unknown_keys_reach_custom_handler() {
        struct Claims(Rc<RefCell<Vec<(char, NavigationState)>>>);
        impl Listener for Claims {
            fn on_custom_command(&mut self, key: KeyEvent, state: NavigationState) -> bool {
                if let Some(c) = key.character {
                    self.0.borrow_mut().push((c, state));
                }
                key.is_char('x')
            }
        }

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut n = nav(&[1], Layout::default());
        n.add_listener(Claims(Rc::clone(&seen)));
        n.take_changes();

        type_char(&mut n, 'x');
        assert!(n.changes().contains(Changes::SCREEN));
        type_char(&mut n, 'z');
        // Handled keys never reach it.
        press(&mut n, Key::ArrowDown);
        assert_eq!(
            *seen.borrow(),
            vec![('x', NavigationState::SectionList), ('z', NavigationState::SectionList)]
        );
    }

    // ── Structural changes ────────────────────────────────────────────

    #[test]
    fn remove_missing_name_leaves_cursor() {
        let mut n = nav(&[1, 1, 1], Layout::default());
        press(&mut n, Key::ArrowDown);
        assert!(!n.remove_section_by_name("nope"));
        assert_eq!(n.current_section_index(), 1);
        assert_eq!(n.section_count(), 3);
    }

    #[test]
    fn remove_open_section_returns_to_list() {
        let mut n = nav(&[1, 1, 1], Layout::default());
        n.enter_section(2);
        assert!(n.remove_section_by_name("S3"));
        assert_eq!(n.state(), NavigationState::SectionList);
        assert_eq!(n.current_section_index(), 1);
    }

    #[test]
    fn remove_earlier_section_keeps_highlight_on_same_section() {
        let mut n = nav(&[1, 1, 1], Layout::default());
        press(&mut n, Key::ArrowDown);
        press(&mut n, Key::ArrowDown);
        assert!(n.remove_section(0));
        assert_eq!(n.current_section().unwrap().name, "S3");
    }

    #[test]
    fn removing_items_clamps_selection() {
        let mut n = nav(&[6], Layout::default());
        n.enter_section(0);
        press(&mut n, Key::End);
        assert_eq!(n.current_selection_index(), 5);
        n.section_mut(0).unwrap().remove_item(5);
        n.section_mut(0).unwrap().remove_item(4);
        press(&mut n, Key::Tab);
        assert_eq!(n.current_selection_index(), 3);
    }

    #[test]
    fn clear_sections_resets() {
        let mut n = nav(&[3, 3], Layout::default());
        n.enter_section(1);
        n.clear_sections();
        assert_eq!(n.state(), NavigationState::SectionList);
        assert_eq!(n.current_section_index(), 0);
        assert_eq!(n.section_count(), 0);
    }

    #[test]
    fn shrinking_page_size_keeps_highlighted_section() {
        let mut n = nav(&[1; 6], paged(20, 6));
        for _ in 0..4 {
            press(&mut n, Key::ArrowDown);
        }
        n.update_layout(paged(20, 2));
        assert_eq!(n.current_section_index(), 4);
        assert_eq!(n.current_section_page(), 2);
        assert_eq!(n.current_selection_index(), 0);
        assert!(n.changes().contains(Changes::CONFIG));
    }

    // ── Run loop ──────────────────────────────────────────────────────

    #[test]
    fn run_refuses_empty_without_touching_terminal() {
        let mut n: Navigator = Navigator::new();
        let mut t = HeadlessTerminal::new(Size::new(80, 24));
        assert!(matches!(n.run(&mut t), Err(NavError::NoSections)));
        assert_eq!(t.raw_transitions(), (0, 0));
        assert!(t.output().is_empty());
    }

    #[test]
    fn run_processes_keys_and_restores() {
        let mut n = nav(&[3, 3], Layout::default());
        let log = Log::default();
        n.add_listener(log.clone());
        let mut t = HeadlessTerminal::new(Size::new(80, 24)).with_input(b"\x1b[B\r \x1b[Aq");

        assert_eq!(n.run(&mut t).unwrap(), RunStatus::Completed);
        assert_eq!(t.raw_transitions(), (1, 1));
        assert!(!t.is_raw());
        assert_eq!(n.all_selections()["S2"], vec!["S2-0"]);
        assert_eq!(
            log.take(),
            vec!["state items", "selected 1", "toggled 1:0 S2-0 true", "exit 2"]
        );
    }

    #[test]
    fn run_ends_when_input_closes() {
        let mut n = nav(&[1], Layout::default());
        let mut t = HeadlessTerminal::new(Size::new(80, 24)).with_input(b"\r");
        assert_eq!(n.run(&mut t).unwrap(), RunStatus::Completed);
        assert_eq!(n.state(), NavigationState::ItemList);
        assert!(t.frames() >= 2);
    }

    #[test]
    fn run_degrades_without_raw_mode() {
        let mut n = nav(&[1], Layout::default());
        let mut t = HeadlessTerminal::new(Size::new(80, 24)).with_input(b"q");
        t.fail_raw_mode(true);
        assert_eq!(n.run(&mut t).unwrap(), RunStatus::Degraded);
        assert!(n.should_quit());
    }

    #[test]
    fn run_reports_failed_restore() {
        let mut n = nav(&[1], Layout::default());
        let log = Log::default();
        n.add_listener(log.clone());
        let mut t = HeadlessTerminal::new(Size::new(80, 24)).with_input(b"q");
        t.fail_restore(true);
        assert!(matches!(n.run(&mut t), Err(NavError::Terminal(_))));
        assert_eq!(t.raw_transitions(), (1, 0));
        assert_eq!(log.take(), vec!["exit 1"]);
    }

    #[test]
    fn run_skips_redraw_when_nothing_changed() {
        let mut n = nav(&[1], Layout::default());
        // Tab is unhandled and unclaimed: no change, no new frame.
        let mut t = HeadlessTerminal::new(Size::new(80, 24)).with_input(b"\t\t\t");
        n.run(&mut t).unwrap();
        // raw-mode entry, first frame, exit clear, raw-mode exit.
        assert_eq!(t.frames(), 4);
    }

    #[test]
    fn ticking_listener_forces_redraws() {
        struct Ticker;
        impl Listener for Ticker {
            fn on_tick(&mut self) -> bool {
                true
            }
        }
        let mut n = nav(&[1], Layout::default());
        n.add_listener(Ticker);
        let mut t = HeadlessTerminal::new(Size::new(80, 24)).with_input(b"\t\t");
        n.run(&mut t).unwrap();
        assert!(t.frames() > 4);
    }
}
