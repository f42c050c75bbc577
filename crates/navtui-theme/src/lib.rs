//! # navtui-theme — how the menu looks
//!
//! Pure value types and functions; nothing here touches a terminal.
//!
//! # Architecture
//!
//! ```text
//! GradientPreset + steps
//!     │
//!     ▼
//! gradient.rs: control points → per-character RGB sequence
//!     │
//!     ▼
//! theme.rs:    Theme picks gradient / accent / plain for highlighted text
//!     │
//!     ▼
//! border.rs:   glyph sets for the frame (ASCII when unicode is off)
//!
//! builtin.rs:  named Theme presets
//! ```

pub mod border;
pub mod builtin;
pub mod gradient;
pub mod theme;

pub use border::{BorderGlyphs, BorderStyle};
pub use builtin::{builtin_names, builtin_theme};
pub use gradient::{GradientPreset, Rng, gradient};
pub use theme::Theme;
