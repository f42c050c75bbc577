//! # navtui-core — the navigation engine
//!
//! A two-level menu: a paginated list of sections, each holding a paginated
//! list of toggleable items.
//!
//! - **[`item`]** / **[`section`]** — the data model, generic over a payload `T`
//! - **[`config`]** — `Config` with theme, layout, text and key groups
//! - **[`options`]** — `name` / `noname` / `name!` / `name=value` option strings
//! - **[`event`]** — `NavEvent` and the `Listener` trait
//! - **[`navigation`]** — `Navigator`: state machine, key dispatch, run loop
//! - **[`layout`]** — pure geometry and text measurement
//! - **[`render`]** — paints a `Navigator` through a `TerminalDriver`
//! - **[`builder`]** — `NavigatorBuilder` with theme and layout presets

pub mod builder;
pub mod config;
pub mod error;
pub mod event;
pub mod item;
pub mod layout;
pub mod navigation;
pub mod options;
pub mod render;
pub mod section;

pub use builder::NavigatorBuilder;
pub use config::{Config, KeyConfig, Layout, TextConfig, Theme};
pub use error::{ConfigError, NavError, NavResult};
pub use event::{Listener, NavEvent, NavigationState};
pub use item::Item;
pub use navigation::{Changes, Navigator, RunStatus};
pub use options::{OptionDirective, parse_options};
pub use render::Renderer;
pub use section::Section;
