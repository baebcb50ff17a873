use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::style::Color;

use super::types::{KeyChord, Theme};
use crate::state::{ResultKind, SearchResult};

/// What: Parse a single key token (e.g. "Esc", "Down", "/", "k") into a [`KeyCode`].
///
/// Inputs:
/// - `s`: Raw key token from a configuration value.
///
/// Output:
/// - `Some(KeyCode)` on success; `None` for unsupported tokens.
///
/// Details:
/// - Character keys are normalized to lowercase so `Ctrl+K` and `Ctrl+k` agree.
pub(crate) fn parse_key_identifier(s: &str) -> Option<KeyCode> {
    let t = s.trim();
    if let Some(n) = t
        .strip_prefix(['F', 'f'])
        .and_then(|x| x.parse::<u8>().ok())
    {
        return Some(KeyCode::F(n));
    }
    let code = match t.to_ascii_lowercase().as_str() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "up" | "arrowup" => KeyCode::Up,
        "down" | "arrowdown" => KeyCode::Down,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        "space" => KeyCode::Char(' '),
        "slash" => KeyCode::Char('/'),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => KeyCode::Char(ch),
                _ => return None,
            }
        }
    };
    Some(code)
}

/// What: Parse a chord such as "Ctrl+K" or "Esc" into a [`KeyChord`].
///
/// Inputs:
/// - `chord`: Modifiers and a key token joined by `+`.
///
/// Output:
/// - `Some(KeyChord)` when the key token is recognized; `None` otherwise.
///
/// Details:
/// - A lone `+` is read as the plus key rather than a separator.
pub(crate) fn parse_key_chord(chord: &str) -> Option<KeyChord> {
    let chord = chord.trim();
    if chord == "+" {
        return Some(KeyChord::plain(KeyCode::Char('+')));
    }
    let mut mods = KeyModifiers::NONE;
    let mut key: Option<KeyCode> = None;
    for part in chord.split('+').map(str::trim).filter(|p| !p.is_empty()) {
        match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => mods |= KeyModifiers::CONTROL,
            "alt" | "meta" => mods |= KeyModifiers::ALT,
            "shift" => mods |= KeyModifiers::SHIFT,
            _ => key = Some(parse_key_identifier(part)?),
        }
    }
    key.map(|code| KeyChord { code, mods })
}

/// What: Parse a comma-separated list of chords, dropping invalid entries.
///
/// Inputs:
/// - `value`: e.g. `"Down, Ctrl+N"`.
///
/// Output:
/// - Parsed chords; `None` when nothing valid remains so defaults stay in place.
pub(crate) fn parse_key_chords(value: &str) -> Option<Vec<KeyChord>> {
    let chords: Vec<KeyChord> = value.split(',').filter_map(parse_key_chord).collect();
    if chords.is_empty() { None } else { Some(chords) }
}

/// What: Parse `#RRGGBB`, `RRGGBB` or `R,G,B` into a [`Color`].
///
/// Inputs:
/// - `s`: Color literal with any inline comment already removed.
///
/// Output:
/// - `Some(Color::Rgb)` for valid literals; `None` otherwise.
pub(crate) fn parse_color_value(s: &str) -> Option<Color> {
    let t = s.trim();
    let hex = t.strip_prefix('#').unwrap_or(t);
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        return Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?));
    }
    let parts: Vec<&str> = t.split(',').map(str::trim).collect();
    if let [r, g, b] = parts.as_slice() {
        return Some(Color::Rgb(r.parse().ok()?, g.parse().ok()?, b.parse().ok()?));
    }
    None
}

/// What: Apply one `theme_*` setting to the palette.
///
/// Inputs:
/// - `theme`: Palette being built.
/// - `key`: Normalized key without the `theme_` prefix.
/// - `value`: Color literal.
///
/// Output:
/// - `true` when the key was recognized and the color parsed.
pub(crate) fn apply_theme_color(theme: &mut Theme, key: &str, value: &str) -> bool {
    let Some(color) = parse_color_value(value) else {
        return false;
    };
    let slot = match key {
        "base" | "background" => &mut theme.base,
        "surface" | "panel" => &mut theme.surface,
        "border" => &mut theme.border,
        "text" | "text_primary" => &mut theme.text,
        "subtext" | "text_secondary" => &mut theme.subtext,
        "accent" | "selection" => &mut theme.accent,
        "heading" => &mut theme.heading,
        "warning" => &mut theme.warning,
        "error" => &mut theme.error,
        _ => return false,
    };
    *slot = color;
    true
}

/// What: Parse a `suggestion = title | group | category | target` entry.
///
/// Inputs:
/// - `value`: Pipe-separated fields; an optional fifth field is the kind.
///
/// Output:
/// - `Some(SearchResult)` when title and target are present.
///
/// Details:
/// - Kind defaults to `page` when missing or unknown.
pub(crate) fn parse_suggestion(value: &str) -> Option<SearchResult> {
    let fields: Vec<&str> = value.split('|').map(str::trim).collect();
    let [title, group, category, target, rest @ ..] = fields.as_slice() else {
        return None;
    };
    if title.is_empty() || target.is_empty() {
        return None;
    }
    let kind = rest
        .first()
        .and_then(|k| serde_json::from_value(serde_json::Value::String(k.to_lowercase())).ok())
        .unwrap_or(ResultKind::Page);
    Some(SearchResult {
        id: None,
        kind,
        group: (*group).to_string(),
        category: (*category).to_string(),
        title: (*title).to_string(),
        subtitle: None,
        extra: None,
        description: String::new(),
        target: (*target).to_string(),
    })
}

/// What: Remove a trailing comment from a config value.
///
/// Inputs:
/// - `s`: Raw value text.
///
/// Output:
/// - Value without the comment, trimmed.
///
/// Details:
/// - A comment starts at `#` or `//` preceded by whitespace, so hex colors,
///   URLs and `#anchor` fragments inside values survive.
pub(crate) fn strip_inline_comment(s: &str) -> &str {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    for i in 1..bytes.len() {
        if !bytes[i - 1].is_ascii_whitespace() {
            continue;
        }
        if bytes[i] == b'#' || s[i..].starts_with("//") {
            return s[..i].trim();
        }
    }
    s.trim()
}
