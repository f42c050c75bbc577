// SPDX-License-Identifier: MIT
//
// navtui — demo of the two-level navigation menu.
//
// Builds a handful of settings sections, lets the user browse and toggle
// them, then prints what ended up selected. The crates fit together as:
//
//   navtui-term  → raw mode, escape sequences, key decoding
//   navtui-theme → markers, borders, accent colors, gradients
//   navtui-core  → sections/items, navigation state machine, renderer
//
// Configuration comes from option strings, first `NAVTUI_OPTS` and then the
// command line, e.g. `navtui theme=retro items_per_page=5 vimkeys`.
//
// Logging is off unless `NAVTUI_LOG_FILE` names a file: stdout belongs to
// the menu. `NAVTUI_LOG` takes an env-filter directive (default `info`).

use std::env;
use std::fs::OpenOptions;
use std::process;
use std::sync::Mutex;

use navtui_core::{
    Item, Listener, NavEvent, NavigationState, Navigator, NavigatorBuilder, RunStatus, Section,
};
use navtui_term::{KeyEvent, platform_terminal};
use navtui_theme::GradientPreset;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// ─── Logging ────────────────────────────────────────────────────────────────

fn setup_logging() {
    let Some(path) = env::var_os("NAVTUI_LOG_FILE") else {
        return;
    };
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("navtui: cannot open log file {}: {e}", path.to_string_lossy());
            return;
        }
    };
    let filter = EnvFilter::try_from_env("NAVTUI_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

// ─── Demo content ───────────────────────────────────────────────────────────

fn items(entries: &[(&str, &str)]) -> Vec<Item> {
    entries.iter().map(|(name, desc)| Item::new(*name, *desc)).collect()
}

fn demo_sections() -> Vec<Section> {
    let mut privacy = Section::new("Privacy & Security", "Control data collection and security settings")
        .with_items(items(&[
            ("Block Telemetry", "Prevent the system from sending usage data"),
            ("Disable Location Tracking", "Stop apps from accessing location"),
            ("Clear Web Data", "Remove browsing history and cookies"),
            ("Disable Microphone Access", "Prevent unauthorized microphone use"),
            ("Disable Camera Access", "Block camera access for apps"),
            ("Enable Firewall", "Block unauthorized network connections"),
            ("Secure DNS", "Use encrypted DNS queries"),
            ("VPN Integration", "Route traffic through a VPN"),
        ]))
        .on_item_toggled(|index, selected| info!(index, selected, "privacy setting changed"));
    for name in ["Block Telemetry", "Enable Firewall", "Secure DNS"] {
        if let Some(item) = privacy.item_by_name_mut(name) {
            item.set_selected(true);
        }
    }

    let mut performance = Section::new("Performance", "Improve system speed and responsiveness")
        .with_items(items(&[
            ("Disable Startup Programs", "Reduce boot time by disabling startup apps"),
            ("Clear Temporary Files", "Free disk space by removing temp files"),
            ("Optimize Memory Usage", "Better RAM management and cleanup"),
            ("Disable Visual Effects", "Reduce GPU and CPU usage from animations"),
            ("Enable Fast Boot", "Quick system startup mode"),
            ("Optimize Network Settings", "Improve connection speed"),
            ("Defragment Storage", "Optimize disk performance"),
            ("Update Device Drivers", "Install the latest hardware drivers"),
            ("Disable Background Apps", "Keep apps from running in the background"),
            ("Enable Game Mode", "Optimize the system for games"),
            ("Power Plan Optimization", "Adjust power settings for performance"),
        ]))
        .on_enter(|| info!("entered performance"));
    performance.sort_items_by_name();

    let appearance = Section::new("Appearance", "").with_items(items(&[
        ("Dark Mode", "System-wide dark theme"),
        ("Large Text", "Increase font sizes"),
        ("High Contrast", ""),
        ("Custom Wallpaper", "Set a personalized desktop background"),
        ("Window Animations", "Smooth window transitions"),
    ]));

    let developer = Section::new("Developer Tools", "Tools and settings for software development")
        .with_items(items(&[
            ("Command Line Tools", "Terminal and shell utilities"),
            ("Package Managers", "Package management systems"),
            ("Git", "Source code management"),
            ("Debugging Tools", "Application debugging utilities"),
            ("Container Support", "Container runtime"),
            ("Virtual Machines", "Hypervisor and VM support"),
        ]));

    let plugins = Section::new("Plugins", "Nothing installed yet");

    vec![privacy, performance, appearance, developer, plugins]
}

// ─── Listener ───────────────────────────────────────────────────────────────

/// Logs engine events and claims the `s` shortcut.
#[derive(Default)]
struct Journal {
    toggles: usize,
}

impl Listener for Journal {
    fn on_event(&mut self, event: &NavEvent<'_>) {
        match event {
            NavEvent::ItemToggled {
                section_index,
                item_index,
                section,
                item,
                selected,
            } => {
                self.toggles += 1;
                info!(
                    section_index,
                    item_index,
                    section = %section.name,
                    item = %item.name,
                    selected,
                    "toggled"
                );
            }
            NavEvent::Exit { sections } => {
                info!(sections = sections.len(), toggles = self.toggles, "menu closed");
            }
            other => info!(?other, "event"),
        }
    }

    fn on_custom_command(&mut self, key: KeyEvent, state: NavigationState) -> bool {
        if key.is_char('s') {
            info!(%state, toggles = self.toggles, "snapshot requested");
            return true;
        }
        false
    }
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn build_navigator() -> Navigator {
    let mut options = env::var("NAVTUI_OPTS").unwrap_or_default();
    for arg in env::args().skip(1) {
        options.push(' ');
        if arg.contains(char::is_whitespace) {
            options.push_str(&format!("\"{arg}\""));
        } else {
            options.push_str(&arg);
        }
    }

    let builder = NavigatorBuilder::new()
        .text_titles("Example Settings", "Configure: ")
        .text_empty_message("No options available in this section.")
        .theme_gradient(GradientPreset::Ocean)
        .layout_items_per_page(8)
        .layout_sections_per_page(4)
        .keys_custom_shortcut('s', "snapshot")
        .add_sections(demo_sections())
        .listener(Journal::default());

    builder.options(&options).unwrap_or_else(|e| {
        eprintln!("navtui: {e}");
        process::exit(2);
    })
    .build()
}

fn main() {
    setup_logging();
    let mut nav = build_navigator();
    let mut terminal = platform_terminal();

    match nav.run(terminal.as_mut()) {
        Ok(RunStatus::Completed) => {}
        Ok(RunStatus::Degraded) => {
            warn!("ran without raw mode");
            eprintln!("navtui: terminal does not support raw mode; input was line-buffered");
        }
        Err(e) => {
            eprintln!("navtui: {e}");
            process::exit(1);
        }
    }

    let selections = nav.all_selections();
    if selections.is_empty() {
        println!("Nothing selected.");
        return;
    }
    println!("Selected:");
    for (section, names) in &selections {
        println!("  {section}");
        for name in names {
            println!("    - {name}");
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
