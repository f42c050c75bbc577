//! A toggleable entry inside a section.

use std::fmt;

/// Called with the new state whenever an item's selection changes.
pub type ToggleHook = Box<dyn FnMut(bool)>;

/// One row of a section's item list.
///
/// `T` is an arbitrary payload the embedding application attaches; the
/// engine never looks at it.
pub struct Item<T = ()> {
    pub name: String,
    /// Footer text while the item is highlighted.
    pub description: String,
    /// Application-chosen identifier; `0` unless set.
    pub id: i32,
    pub data: Option<T>,
    selected: bool,
    on_toggle: Option<ToggleHook>,
}

impl<T> Item<T> {
    /// An unselected item with no hook.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            id: 0,
            data: None,
            selected: false,
            on_toggle: None,
        }
    }

    #[must_use]
    pub const fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub const fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    #[must_use]
    pub fn with_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    #[must_use]
    pub fn on_toggle(mut self, hook: impl FnMut(bool) + 'static) -> Self {
        self.on_toggle = Some(Box::new(hook));
        self
    }

    /// Replace the toggle hook on an item already in a section.
    pub fn set_on_toggle(&mut self, hook: impl FnMut(bool) + 'static) {
        self.on_toggle = Some(Box::new(hook));
    }

    #[inline]
    #[must_use]
    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    /// Flip the selection, fire the hook, return the new state.
    pub fn toggle(&mut self) -> bool {
        self.selected = !self.selected;
        self.fire();
        self.selected
    }

    /// Set the selection. Returns `true` (and fires the hook) only if the
    /// state actually changed.
    pub fn set_selected(&mut self, selected: bool) -> bool {
        if self.selected == selected {
            return false;
        }
        self.selected = selected;
        self.fire();
        true
    }

    fn fire(&mut self) {
        if let Some(hook) = self.on_toggle.as_mut() {
            hook(self.selected);
        }
    }

    /// `"{indicator} {name}"`.
    #[must_use]
    pub fn display_string_indicator(&self, selected: char, unselected: char) -> String {
        let ind = if self.selected { selected } else { unselected };
        format!("{ind} {}", self.name)
    }

    /// `"{prefix}{name}"`.
    #[must_use]
    pub fn display_string_prefix(&self, selected: &str, unselected: &str) -> String {
        let prefix = if self.selected { selected } else { unselected };
        format!("{prefix}{}", self.name)
    }

    /// `"name - description"`, or just the name when there is no description.
    #[must_use]
    pub fn full_description(&self) -> String {
        if self.description.is_empty() {
            self.name.clone()
        } else {
            format!("{} - {}", self.name, self.description)
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Item<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("selected", &self.selected)
            .field("data", &self.data)
            .field("on_toggle", &self.on_toggle.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn toggle_twice_restores() {
        let mut item: Item = Item::new("a", "");
        assert!(item.toggle());
        assert!(!item.toggle());
        assert!(!item.is_selected());
    }

    #[test]
    fn set_selected_reports_change() {
        let mut item: Item = Item::new("a", "");
        assert!(item.set_selected(true));
        assert!(!item.set_selected(true));
        assert!(item.set_selected(false));
    }

    #[test]
    fn hook_fires_on_changes_only() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        let mut item: Item = Item::new("a", "").on_toggle(move |s| log.borrow_mut().push(s));
        item.toggle();
        item.set_selected(true);
        item.set_selected(false);
        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn display_strings() {
        let mut item: Item = Item::new("Apple", "red fruit");
        assert_eq!(item.display_string_indicator('*', ' '), "  Apple");
        assert_eq!(item.display_string_prefix("✓ ", "  "), "  Apple");
        item.toggle();
        assert_eq!(item.display_string_indicator('*', ' '), "* Apple");
        assert_eq!(item.display_string_prefix("✓ ", "  "), "✓ Apple");
    }

    #[test]
    fn full_description() {
        assert_eq!(Item::<()>::new("A", "b").full_description(), "A - b");
        assert_eq!(Item::<()>::new("A", "").full_description(), "A");
    }

    #[test]
    fn builder_fields() {
        let item = Item::new("x", "").with_id(7).with_data(3u8).with_selected(true);
        assert_eq!(item.id, 7);
        assert_eq!(item.data, Some(3));
        assert!(item.is_selected());
    }
}
