use std::fs;
use std::path::Path;

use super::config::ensure_settings_file;
use super::parsing::{
    apply_theme_color, parse_key_chords, parse_suggestion, strip_inline_comment,
};
use super::paths::{config_dir, resolve_settings_config_path};
use super::types::Settings;

/// What: Load user settings, writing a skeleton file on first run.
///
/// Inputs: none
///
/// Output:
/// - Parsed [`Settings`]; `Settings::default()` when no file can be read.
///
/// Details:
/// - Looks in `$HOME/.config/docsearch` then `$XDG_CONFIG_HOME/docsearch`.
#[must_use]
pub fn settings() -> Settings {
    let path = resolve_settings_config_path().or_else(|| match ensure_settings_file(&config_dir()) {
        Ok(p) => Some(p),
        Err(e) => {
            tracing::warn!(error = %e, "could not write settings skeleton; using defaults");
            None
        }
    });
    path.map_or_else(Settings::default, |p| settings_from_path(&p))
}

/// What: Load settings from a specific file.
///
/// Inputs:
/// - `path`: Settings file.
///
/// Output:
/// - Parsed settings; defaults when the file cannot be read.
#[must_use]
pub fn settings_from_path(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(content) => {
            tracing::info!(path = %path.display(), "loaded settings");
            parse_settings(&content)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read settings; using defaults");
            Settings::default()
        }
    }
}

/// What: Parse settings file content over the defaults.
///
/// Inputs:
/// - `content`: Full `key = value` text.
///
/// Output:
/// - [`Settings`] with every recognized key applied.
///
/// Details:
/// - Keys are case-insensitive; `.`, `-` and spaces normalize to `_`.
/// - Invalid values keep the default and log at debug level.
/// - Any `suggestion` line replaces the built-in suggestion list.
#[must_use]
pub fn parse_settings(content: &str) -> Settings {
    let mut out = Settings::default();
    let mut suggestions = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }
        let Some((raw_key, raw_val)) = trimmed.split_once('=') else {
            continue;
        };
        let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
        let val = strip_inline_comment(raw_val);
        let applied = match key.as_str() {
            "search_endpoint" | "endpoint" => set_string(&mut out.search_endpoint, val),
            "site_url" => set_string(&mut out.site_url, val),
            "site_name" => set_string(&mut out.site_name, val),
            "debounce_ms" | "debounce" => val.parse().map(|v| out.debounce_ms = v).is_ok(),
            "page_size" | "limit" => val
                .parse::<usize>()
                .ok()
                .filter(|v| *v > 0)
                .map(|v| out.page_size = v)
                .is_some(),
            "filter_page" | "page" => {
                out.filter_page = non_empty(val);
                true
            }
            "filter_library" | "library" => {
                out.filter_library = non_empty(val);
                true
            }
            "suggestion" => parse_suggestion(val).map(|s| suggestions.push(s)).is_some(),
            k if k.starts_with("keybind_") => apply_keybind(&mut out, &k["keybind_".len()..], val),
            k if k.starts_with("theme_") => {
                apply_theme_color(&mut out.theme, &k["theme_".len()..], val)
            }
            _ => false,
        };
        if !applied {
            tracing::debug!(line = line_no + 1, key = %key, "ignoring unrecognized setting");
        }
    }
    if !suggestions.is_empty() {
        out.suggestions = suggestions;
    }
    out
}

/// Replace `slot` with `val` when non-empty.
fn set_string(slot: &mut String, val: &str) -> bool {
    if val.is_empty() {
        return false;
    }
    *slot = val.to_string();
    true
}

/// `Some(val)` unless blank.
fn non_empty(val: &str) -> Option<String> {
    if val.is_empty() {
        None
    } else {
        Some(val.to_string())
    }
}

/// Apply a `keybind_<action>` entry; returns whether it was recognized and valid.
fn apply_keybind(out: &mut Settings, action: &str, val: &str) -> bool {
    let Some(chords) = parse_key_chords(val) else {
        return false;
    };
    let km = &mut out.keymap;
    let slot = match action {
        "open" => &mut km.open,
        "close" => &mut km.close,
        "move_up" | "up" => &mut km.move_up,
        "move_down" | "down" => &mut km.move_down,
        "commit" | "select" => &mut km.commit,
        "clear_query" | "clear" => &mut km.clear_query,
        "exit" | "quit" => &mut km.exit,
        _ => return false,
    };
    *slot = chords;
    true
}
