//! Notifications out of the engine.
//!
//! The embedding application registers [`Listener`]s on the navigator. Each
//! listener sees every [`NavEvent`] in order and may claim keys the engine
//! itself does not handle.

use std::fmt;

use navtui_term::KeyEvent;

use crate::item::Item;
use crate::section::Section;

/// Which list is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NavigationState {
    #[default]
    SectionList,
    ItemList,
}

impl fmt::Display for NavigationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SectionList => f.write_str("sections"),
            Self::ItemList => f.write_str("items"),
        }
    }
}

/// Something that happened inside the engine.
///
/// Borrowed views are valid only for the duration of the callback.
pub enum NavEvent<'a, T = ()> {
    /// A section was entered (its enter hook has already run).
    SectionSelected { index: usize, section: &'a Section<T> },
    /// An item changed state through Space. Indices are absolute, not
    /// relative to the page.
    ItemToggled {
        section_index: usize,
        item_index: usize,
        section: &'a Section<T>,
        item: &'a Item<T>,
        selected: bool,
    },
    /// The active list moved to another page. `page` is 0-based.
    PageChanged { page: usize, total: usize },
    StateChanged { from: NavigationState, to: NavigationState },
    /// The loop ended and the terminal has been restored.
    Exit { sections: &'a [Section<T>] },
}

impl<T> fmt::Debug for NavEvent<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SectionSelected { index, section } => f
                .debug_struct("SectionSelected")
                .field("index", index)
                .field("section", &section.name)
                .finish(),
            Self::ItemToggled {
                section_index,
                item_index,
                section,
                item,
                selected,
            } => f
                .debug_struct("ItemToggled")
                .field("section_index", section_index)
                .field("item_index", item_index)
                .field("section", &section.name)
                .field("item", &item.name)
                .field("selected", selected)
                .finish(),
            Self::PageChanged { page, total } => f
                .debug_struct("PageChanged")
                .field("page", page)
                .field("total", total)
                .finish(),
            Self::StateChanged { from, to } => f
                .debug_struct("StateChanged")
                .field("from", from)
                .field("to", to)
                .finish(),
            Self::Exit { sections } => f
                .debug_struct("Exit")
                .field("sections", &sections.len())
                .finish(),
        }
    }
}

/// Receiver of engine notifications.
///
/// Every method has a default no-op implementation.
pub trait Listener<T = ()> {
    fn on_event(&mut self, _event: &NavEvent<'_, T>) {}

    /// A key the engine did not recognise. Return `true` if handled; the
    /// engine redraws after a handled key.
    fn on_custom_command(&mut self, _key: KeyEvent, _state: NavigationState) -> bool {
        false
    }

    /// Called once per loop iteration. Return `true` to request a redraw.
    fn on_tick(&mut self) -> bool {
        false
    }
}

pub(crate) fn emit<T>(listeners: &mut [Box<dyn Listener<T>>], event: &NavEvent<'_, T>) {
    for l in listeners.iter_mut() {
        l.on_event(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;
    use std::rc::Rc;

    struct Counter(Rc<Cell<usize>>);

    impl Listener for Counter {
        fn on_event(&mut self, _event: &NavEvent<'_>) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn defaults_are_no_ops() {
        struct Quiet;
        impl Listener for Quiet {}
        let mut q = Quiet;
        assert!(!q.on_tick());
        assert!(!q.on_custom_command(KeyEvent::char('x'), NavigationState::SectionList));
    }

    #[test]
    fn emit_reaches_every_listener() {
        let hits = Rc::new(Cell::new(0));
        let mut ls: Vec<Box<dyn Listener>> = vec![
            Box::new(Counter(Rc::clone(&hits))),
            Box::new(Counter(Rc::clone(&hits))),
        ];
        emit(&mut ls, &NavEvent::PageChanged { page: 1, total: 2 });
        emit(&mut ls, &NavEvent::PageChanged { page: 0, total: 2 });
        assert_eq!(hits.get(), 4);
    }

    #[test]
    fn debug_names_fields() {
        let ev: NavEvent<'_, ()> = NavEvent::PageChanged { page: 1, total: 2 };
        let dbg = format!("{ev:?}");
        assert_eq!(dbg, "PageChanged { page: 1, total: 2 }");
    }

    #[test]
    fn state_display() {
        assert_eq!(NavigationState::SectionList.to_string(), "sections");
        assert_eq!(NavigationState::ItemList.to_string(), "items");
    }
}
