//! Option strings: configure a [`Config`] from text.
//!
//! The same small syntax works for environment variables, command-line
//! arguments, and config lines:
//!
//! | Syntax          | Effect                          |
//! |-----------------|---------------------------------|
//! | `option`        | Enable a boolean option         |
//! | `nooption`      | Disable a boolean option        |
//! | `option!`       | Toggle a boolean option         |
//! | `option=value`  | Assign a value                  |
//! | `option="a b"`  | Assign a value containing spaces|
//!
//! # Boolean options
//!
//! | Name                | Field                              |
//! |---------------------|------------------------------------|
//! | `unicode`           | `theme.use_unicode`                |
//! | `colors`            | `theme.use_colors`                 |
//! | `gradient`          | `theme.gradient_enabled`           |
//! | `randomize`         | `theme.gradient_randomize`         |
//! | `centerh`           | `layout.center_horizontally`       |
//! | `centerv`           | `layout.center_vertically`         |
//! | `autoresize`        | `layout.auto_resize`               |
//! | `borders`           | `layout.show_borders`              |
//! | `pagesections`      | `layout.paginate_sections`         |
//! | `help`              | `text.show_help`                   |
//! | `pagenumbers`       | `text.show_page_numbers`           |
//! | `counters`          | `text.show_counters`               |
//! | `quickselect`       | `keys.enable_quick_select`         |
//! | `vimkeys`           | `keys.enable_vim_keys`             |
//!
//! # Valued options
//!
//! `items_per_page`, `sections_per_page`, `max_width`, `min_width`,
//! `padding`, `poll_ms` (integers); `border` (`rounded`, `double`, `sharp`,
//! `ascii`); `accent` (color name); `preset` (gradient name);
//! `gradient_colors` (comma-separated `#rrggbb`); `theme` (builtin theme
//! name, replaces the whole theme); `title`, `item_prefix`,
//! `empty_message`, `help_sections`, `help_items`, `selected_prefix`,
//! `unselected_prefix`, `highlighted_prefix` (text);
//! `selected_indicator`, `unselected_indicator` (single character).

use std::str::FromStr;
use std::time::Duration;

use navtui_term::AccentColor;
use navtui_theme::{BorderStyle, GradientPreset, builtin_theme};

use crate::config::Config;
use crate::error::ConfigError;

/// One parsed option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionDirective {
    On(String),
    Off(String),
    Toggle(String),
    Assign(String, String),
}

/// Names of the boolean options.
pub const BOOL_OPTIONS: &[&str] = &[
    "unicode",
    "colors",
    "gradient",
    "randomize",
    "centerh",
    "centerv",
    "autoresize",
    "borders",
    "pagesections",
    "help",
    "pagenumbers",
    "counters",
    "quickselect",
    "vimkeys",
];

/// Names of the options that take `=value`.
pub const VALUE_OPTIONS: &[&str] = &[
    "items_per_page",
    "sections_per_page",
    "max_width",
    "min_width",
    "padding",
    "poll_ms",
    "border",
    "accent",
    "preset",
    "gradient_colors",
    "theme",
    "title",
    "item_prefix",
    "empty_message",
    "help_sections",
    "help_items",
    "selected_prefix",
    "unselected_prefix",
    "highlighted_prefix",
    "selected_indicator",
    "unselected_indicator",
];

#[must_use]
pub fn is_bool_option(name: &str) -> bool {
    BOOL_OPTIONS.contains(&name)
}

#[must_use]
pub fn is_value_option(name: &str) -> bool {
    VALUE_OPTIONS.contains(&name)
}

/// Split `args` into directives. Whitespace separates arguments except
/// inside double quotes; the quotes themselves are dropped.
#[must_use]
pub fn parse_options(args: &str) -> Vec<OptionDirective> {
    split_args(args).iter().map(|a| parse_option(a)).collect()
}

fn split_args(args: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut started = false;
    for c in args.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                started = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if started {
                    out.push(std::mem::take(&mut current));
                    started = false;
                }
            }
            c => {
                current.push(c);
                started = true;
            }
        }
    }
    if started {
        out.push(current);
    }
    out
}

/// Parse a single argument.
#[must_use]
pub fn parse_option(arg: &str) -> OptionDirective {
    if let Some((name, value)) = arg.split_once('=') {
        return OptionDirective::Assign(name.to_string(), value.to_string());
    }
    if let Some(name) = arg.strip_suffix('!') {
        return OptionDirective::Toggle(name.to_string());
    }
    // `nooption` only when the rest is a real option, so a future option
    // starting with "no" still parses.
    if let Some(name) = arg.strip_prefix("no") {
        if is_bool_option(name) {
            return OptionDirective::Off(name.to_string());
        }
    }
    OptionDirective::On(arg.to_string())
}

fn invalid(option: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        option: option.to_string(),
        value: value.to_string(),
    }
}

fn number<N: FromStr>(option: &str, value: &str) -> Result<N, ConfigError> {
    value.trim().parse().map_err(|_| invalid(option, value))
}

fn single_char(option: &str, value: &str) -> Result<char, ConfigError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(invalid(option, value)),
    }
}

impl Config {
    fn bool_option(&mut self, name: &str) -> Option<&mut bool> {
        Some(match name {
            "unicode" => &mut self.theme.use_unicode,
            "colors" => &mut self.theme.use_colors,
            "gradient" => &mut self.theme.gradient_enabled,
            "randomize" => &mut self.theme.gradient_randomize,
            "centerh" => &mut self.layout.center_horizontally,
            "centerv" => &mut self.layout.center_vertically,
            "autoresize" => &mut self.layout.auto_resize,
            "borders" => &mut self.layout.show_borders,
            "pagesections" => &mut self.layout.paginate_sections,
            "help" => &mut self.text.show_help,
            "pagenumbers" => &mut self.text.show_page_numbers,
            "counters" => &mut self.text.show_counters,
            "quickselect" => &mut self.keys.enable_quick_select,
            "vimkeys" => &mut self.keys.enable_vim_keys,
            _ => return None,
        })
    }

    /// Apply one directive.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownOption`] for names not listed in the module
    /// docs, [`ConfigError::WrongKind`] for a boolean form on a valued
    /// option (or the reverse), [`ConfigError::InvalidValue`] when a value
    /// does not parse. The config is unchanged on error.
    pub fn apply(&mut self, directive: &OptionDirective) -> Result<(), ConfigError> {
        match directive {
            OptionDirective::On(name) => self.set_bool(name, |_| true),
            OptionDirective::Off(name) => self.set_bool(name, |_| false),
            OptionDirective::Toggle(name) => self.set_bool(name, |v| !v),
            OptionDirective::Assign(name, value) => self.assign(name, value),
        }
    }

    /// Parse `args` with [`parse_options`] and apply each directive in order,
    /// stopping at the first error.
    ///
    /// # Errors
    ///
    /// The first error from [`apply`](Self::apply). Directives before it
    /// stay applied.
    pub fn apply_str(&mut self, args: &str) -> Result<(), ConfigError> {
        parse_options(args).iter().try_for_each(|d| self.apply(d))
    }

    fn set_bool(&mut self, name: &str, f: impl FnOnce(bool) -> bool) -> Result<(), ConfigError> {
        if let Some(flag) = self.bool_option(name) {
            *flag = f(*flag);
            Ok(())
        } else if is_value_option(name) {
            Err(ConfigError::WrongKind(name.to_string()))
        } else {
            Err(ConfigError::UnknownOption(name.to_string()))
        }
    }

    fn assign(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        match name {
            "items_per_page" => self.layout.items_per_page = number(name, value)?,
            "sections_per_page" => self.layout.sections_per_page = number(name, value)?,
            "max_width" => self.layout.max_width = number(name, value)?,
            "min_width" => self.layout.min_width = number(name, value)?,
            "padding" => self.layout.vertical_padding = number(name, value)?,
            "poll_ms" => {
                self.keys.poll_interval = Duration::from_millis(number(name, value)?);
            }
            "border" => {
                self.theme.border_style =
                    BorderStyle::from_name(value).ok_or_else(|| invalid(name, value))?;
            }
            "accent" => {
                self.theme.accent_color =
                    AccentColor::from_name(value).ok_or_else(|| invalid(name, value))?;
            }
            "preset" => {
                self.theme.gradient =
                    GradientPreset::from_name(value).ok_or_else(|| invalid(name, value))?;
            }
            "gradient_colors" => {
                self.theme.gradient = GradientPreset::custom_from_hex_list(value)
                    .ok_or_else(|| invalid(name, value))?;
            }
            "theme" => {
                self.theme = builtin_theme(value).ok_or_else(|| invalid(name, value))?;
            }
            "title" => self.text.section_selection_title = value.to_string(),
            "item_prefix" => self.text.item_selection_prefix = value.to_string(),
            "empty_message" => self.text.empty_section_message = value.to_string(),
            "help_sections" => self.text.help_text_sections = value.to_string(),
            "help_items" => self.text.help_text_items = value.to_string(),
            "selected_prefix" => self.theme.selected_prefix = value.to_string(),
            "unselected_prefix" => self.theme.unselected_prefix = value.to_string(),
            "highlighted_prefix" => self.theme.highlighted_prefix = value.to_string(),
            "selected_indicator" => self.theme.selected_indicator = single_char(name, value)?,
            "unselected_indicator" => self.theme.unselected_indicator = single_char(name, value)?,
            _ if is_bool_option(name) => return Err(ConfigError::WrongKind(name.to_string())),
            _ => return Err(ConfigError::UnknownOption(name.to_string())),
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
