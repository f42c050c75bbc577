//! A named group of items: one row of the section list, one screen of the
//! item list.

use std::fmt;

use crate::item::Item;

/// Run when a section is entered or left.
pub type SectionHook = Box<dyn FnMut()>;
/// Called with `(item index, new state)` after an item is toggled through
/// its section.
pub type ItemToggledHook = Box<dyn FnMut(usize, bool)>;

/// A named group of items: one row of the section list, one page set of
/// the item list.
pub struct Section<T = ()> {
    /// Shown in the section list and in the item list's title.
    pub name: String,
    /// Footer text while the section is highlighted.
    pub description: String,
    /// Application payload, ignored by the engine.
    pub data: Option<T>,
    items: Vec<Item<T>>,
    on_enter: Option<SectionHook>,
    on_exit: Option<SectionHook>,
    on_item_toggled: Option<ItemToggledHook>,
}

impl<T> Section<T> {
    /// An empty section with no hooks.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            data: None,
            items: Vec::new(),
            on_enter: None,
            on_exit: None,
            on_item_toggled: None,
        }
    }

    /// Builder-style [`add_item`](Self::add_item).
    #[must_use]
    pub fn with_item(mut self, item: Item<T>) -> Self {
        self.items.push(item);
        self
    }

    /// Builder-style [`add_items`](Self::add_items).
    #[must_use]
    pub fn with_items(mut self, items: impl IntoIterator<Item = Item<T>>) -> Self {
        self.items.extend(items);
        self
    }

    #[must_use]
    pub fn with_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    #[must_use]
    pub fn on_enter(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_enter = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn on_exit(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_exit = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn on_item_toggled(mut self, hook: impl FnMut(usize, bool) + 'static) -> Self {
        self.on_item_toggled = Some(Box::new(hook));
        self
    }

    // ── Items ────────────────────────────────────────────────────────

    pub fn add_item(&mut self, item: Item<T>) {
        self.items.push(item);
    }

    pub fn add_items(&mut self, items: impl IntoIterator<Item = Item<T>>) {
        self.items.extend(items);
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn items(&self) -> &[Item<T>] {
        &self.items
    }

    #[must_use]
    pub fn item(&self, index: usize) -> Option<&Item<T>> {
        self.items.get(index)
    }

    pub fn item_mut(&mut self, index: usize) -> Option<&mut Item<T>> {
        self.items.get_mut(index)
    }

    #[must_use]
    pub fn item_by_name(&self, name: &str) -> Option<&Item<T>> {
        self.items.iter().find(|i| i.name == name)
    }

    pub fn item_by_name_mut(&mut self, name: &str) -> Option<&mut Item<T>> {
        self.items.iter_mut().find(|i| i.name == name)
    }

    #[must_use]
    pub fn item_by_id(&self, id: i32) -> Option<&Item<T>> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Toggle item `index`. Returns its new state, or `None` if out of range.
    /// Fires the item's hook, then the section's item-toggled hook.
    pub fn toggle_item(&mut self, index: usize) -> Option<bool> {
        let state = self.items.get_mut(index)?.toggle();
        self.notify_toggled(index, state);
        Some(state)
    }

    /// Returns `true` if the state changed. Hooks fire only on change.
    pub fn set_item_selected(&mut self, index: usize, selected: bool) -> bool {
        let changed = self
            .items
            .get_mut(index)
            .is_some_and(|item| item.set_selected(selected));
        if changed {
            self.notify_toggled(index, selected);
        }
        changed
    }

    fn notify_toggled(&mut self, index: usize, state: bool) {
        if let Some(hook) = self.on_item_toggled.as_mut() {
            hook(index, state);
        }
    }

    pub fn remove_item(&mut self, index: usize) -> Option<Item<T>> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Removes the first item called `name`. Returns `true` if one was found.
    pub fn remove_item_by_name(&mut self, name: &str) -> bool {
        self.items
            .iter()
            .position(|i| i.name == name)
            .map(|pos| self.items.remove(pos))
            .is_some()
    }

    pub fn clear_items(&mut self) {
        self.items.clear();
    }

    // ── Selection queries ────────────────────────────────────────────

    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_selected()).count()
    }

    #[must_use]
    pub fn selected_names(&self) -> Vec<String> {
        self.selected_items().map(|i| i.name.clone()).collect()
    }

    pub fn selected_items(&self) -> impl Iterator<Item = &Item<T>> {
        self.items.iter().filter(|i| i.is_selected())
    }

    #[must_use]
    pub fn selected_indices(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter_map(|(idx, i)| i.is_selected().then_some(idx))
            .collect()
    }

    // ── Bulk selection ───────────────────────────────────────────────

    /// Deselect everything. Hooks fire for each item that changes.
    pub fn clear_selections(&mut self) {
        self.set_all(false);
    }

    /// Select everything. Hooks fire for each item that changes.
    pub fn select_all(&mut self) {
        self.set_all(true);
    }

    fn set_all(&mut self, selected: bool) {
        for idx in 0..self.items.len() {
            self.set_item_selected(idx, selected);
        }
    }

    pub fn invert_selections(&mut self) {
        for idx in 0..self.items.len() {
            self.toggle_item(idx);
        }
    }

    // ── Ordering ─────────────────────────────────────────────────────

    pub fn sort_items_by_name(&mut self) {
        self.items.sort_by(|a, b| a.name.cmp(&b.name));
    }

    /// Stable: items keep their relative order within each group.
    pub fn sort_items_by_selection(&mut self, selected_first: bool) {
        self.items
            .sort_by_key(|i| i.is_selected() != selected_first);
    }

    // ── Display ──────────────────────────────────────────────────────

    #[must_use]
    pub fn display_string(&self) -> String {
        self.name.clone()
    }

    /// `"name (selected/total)"`, or just the name when empty.
    #[must_use]
    pub fn display_string_with_count(&self) -> String {
        if self.items.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({}/{})", self.name, self.selected_count(), self.len())
        }
    }

    // ── Lifecycle hooks ──────────────────────────────────────────────

    pub fn trigger_enter(&mut self) {
        if let Some(hook) = self.on_enter.as_mut() {
            hook();
        }
    }

    pub fn trigger_exit(&mut self) {
        if let Some(hook) = self.on_exit.as_mut() {
            hook();
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Section<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Section")
            .field("name", &self.name)
            .field("items", &self.items)
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn fruits() -> Section {
        Section::new("Fruits", "Pick some").with_items([
            Item::new("Cherry", "").with_id(3),
            Item::new("Apple", "").with_id(1),
            Item::new("Banana", "").with_id(2),
        ])
    }

    #[test]
    fn lookup() {
        let s = fruits();
        assert_eq!(s.len(), 3);
        assert_eq!(s.item(1).map(|i| i.name.as_str()), Some("Apple"));
        assert_eq!(s.item_by_name("Banana").map(|i| i.id), Some(2));
        assert_eq!(s.item_by_id(3).map(|i| i.name.as_str()), Some("Cherry"));
        assert!(s.item(9).is_none());
        assert!(s.item_by_name("Kiwi").is_none());
    }

    #[test]
    fn toggle_and_queries() {
        let mut s = fruits();
        assert_eq!(s.toggle_item(0), Some(true));
        assert_eq!(s.toggle_item(2), Some(true));
        assert_eq!(s.toggle_item(5), None);
        assert_eq!(s.selected_count(), 2);
        assert_eq!(s.selected_names(), vec!["Cherry", "Banana"]);
        assert_eq!(s.selected_indices(), vec![0, 2]);
    }

    #[test]
    fn bulk_operations() {
        let mut s = fruits();
        s.select_all();
        assert_eq!(s.selected_count(), 3);
        s.clear_selections();
        assert_eq!(s.selected_count(), 0);
        s.toggle_item(1);
        s.invert_selections();
        assert_eq!(s.selected_indices(), vec![0, 2]);
    }

    #[test]
    fn toggled_hook_sees_index_and_state() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        let mut s = fruits().on_item_toggled(move |i, st| log.borrow_mut().push((i, st)));
        s.toggle_item(1);
        s.set_item_selected(1, true);
        s.select_all();
        assert_eq!(*seen.borrow(), vec![(1, true), (0, true), (2, true)]);
    }

    #[test]
    fn removal() {
        let mut s = fruits();
        assert_eq!(s.remove_item(0).map(|i| i.name), Some("Cherry".to_string()));
        assert!(s.remove_item(7).is_none());
        assert!(s.remove_item_by_name("Banana"));
        assert!(!s.remove_item_by_name("Banana"));
        assert_eq!(s.len(), 1);
        s.clear_items();
        assert!(s.is_empty());
    }

    #[test]
    fn sorting() {
        let mut s = fruits();
        s.sort_items_by_name();
        let names: Vec<_> = s.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Apple", "Banana", "Cherry"]);

        s.toggle_item(2);
        s.sort_items_by_selection(true);
        let names: Vec<_> = s.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Cherry", "Apple", "Banana"]);

        s.sort_items_by_selection(false);
        let names: Vec<_> = s.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Apple", "Banana", "Cherry"]);
    }

    #[test]
    fn display_with_count() {
        let mut s = fruits();
        s.toggle_item(0);
        assert_eq!(s.display_string_with_count(), "Fruits (1/3)");
        assert_eq!(Section::<()>::new("Empty", "").display_string_with_count(), "Empty");
    }

    #[test]
    fn enter_exit_hooks() {
        let count = Rc::new(RefCell::new((0, 0)));
        let (a, b) = (Rc::clone(&count), Rc::clone(&count));
        let mut s: Section = Section::new("S", "")
            .on_enter(move || a.borrow_mut().0 += 1)
            .on_exit(move || b.borrow_mut().1 += 1);
        s.trigger_enter();
        s.trigger_enter();
        s.trigger_exit();
        assert_eq!(*count.borrow(), (2, 1));
    }
}
