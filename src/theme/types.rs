use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Color;

use crate::logic::dispatch::{DEFAULT_DEBOUNCE_MS, DEFAULT_PAGE_SIZE};
use crate::state::{ResultKind, SearchResult};

/// Overlay palette used by rendering code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Page background behind the overlay.
    pub base: Color,
    /// Overlay panel background.
    pub surface: Color,
    /// Border and separator color.
    pub border: Color,
    /// Primary text.
    pub text: Color,
    /// Secondary text (descriptions, category headers).
    pub subtext: Color,
    /// Highlight for the selected row.
    pub accent: Color,
    /// Group headings.
    pub heading: Color,
    /// "No results" notice.
    pub warning: Color,
    /// Diagnostics note in the status line.
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            base: Color::Rgb(0x1e, 0x1e, 0x2e),
            surface: Color::Rgb(0x31, 0x32, 0x44),
            border: Color::Rgb(0x7f, 0x84, 0x9c),
            text: Color::Rgb(0xcd, 0xd6, 0xf4),
            subtext: Color::Rgb(0xa6, 0xad, 0xc8),
            accent: Color::Rgb(0x74, 0xc7, 0xec),
            heading: Color::Rgb(0xcb, 0xa6, 0xf7),
            warning: Color::Rgb(0xf9, 0xe2, 0xaf),
            error: Color::Rgb(0xf3, 0x8b, 0xa8),
        }
    }
}

/// User-configurable settings parsed from `settings.conf`.
#[derive(Clone, Debug)]
pub struct Settings {
    /// Search index endpoint receiving `{query, limit, filters}` as JSON.
    pub search_endpoint: String,
    /// Base URL that relative result targets are resolved against.
    pub site_url: String,
    /// Display name used in the overlay title.
    pub site_name: String,
    /// Quiet period before a query is sent.
    pub debounce_ms: u64,
    /// Maximum results per query.
    pub page_size: usize,
    /// Page the overlay is mounted on, scoping matches when set.
    pub filter_page: Option<String>,
    /// Library (site section) the overlay is mounted in, scoping matches when set.
    pub filter_library: Option<String>,
    /// Entries offered before a query resolves.
    pub suggestions: Vec<SearchResult>,
    /// Key bindings.
    pub keymap: KeyMap,
    /// Color palette.
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            search_endpoint: "http://127.0.0.1:8787/search".to_string(),
            site_url: "https://docs.example.com".to_string(),
            site_name: "Docs".to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            page_size: DEFAULT_PAGE_SIZE,
            filter_page: None,
            filter_library: None,
            suggestions: default_suggestions(),
            keymap: KeyMap::default(),
            theme: Theme::default(),
        }
    }
}

impl Settings {
    /// What: Context filters sent with every query.
    ///
    /// Inputs: none
    ///
    /// Output:
    /// - `page:<name>` and/or `library:<name>` entries for the configured context.
    #[must_use]
    pub fn filters(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(p) = self.filter_page.as_deref().filter(|p| !p.is_empty()) {
            out.push(format!("page:{p}"));
        }
        if let Some(l) = self.filter_library.as_deref().filter(|l| !l.is_empty()) {
            out.push(format!("library:{l}"));
        }
        out
    }
}

/// Built-in suggestions used when the config defines none.
fn default_suggestions() -> Vec<SearchResult> {
    [
        ("Quick start", "Getting started", "/docs/quick-start"),
        ("Installation", "Getting started", "/docs/installation"),
        ("Animation", "Guides", "/docs/animation"),
        ("Gestures", "Guides", "/docs/gestures"),
        ("Layout animations", "Guides", "/docs/layout-animations"),
    ]
    .into_iter()
    .map(|(title, category, target)| SearchResult {
        id: None,
        kind: ResultKind::Page,
        group: "library".to_string(),
        category: category.to_string(),
        title: title.to_string(),
        subtitle: None,
        extra: None,
        description: String::new(),
        target: target.to_string(),
    })
    .collect()
}

/// A single keyboard chord (modifiers + key).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyChord {
    /// Key code.
    pub code: KeyCode,
    /// Required modifiers (exact match).
    pub mods: KeyModifiers,
}

impl KeyChord {
    /// Chord without modifiers.
    #[must_use]
    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            mods: KeyModifiers::NONE,
        }
    }

    /// Chord with the Control modifier.
    #[must_use]
    pub const fn ctrl(ch: char) -> Self {
        Self {
            code: KeyCode::Char(ch),
            mods: KeyModifiers::CONTROL,
        }
    }

    /// Whether `ke` is exactly this chord.
    #[must_use]
    pub fn matches(&self, ke: &KeyEvent) -> bool {
        self.code == ke.code && self.mods == ke.modifiers
    }

    /// Return a short display label such as "Ctrl+K", "Esc", "↓".
    #[must_use]
    pub fn label(&self) -> String {
        let key = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(ch) => ch.to_ascii_uppercase().to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::PageUp => "PgUp".to_string(),
            KeyCode::PageDown => "PgDn".to_string(),
            KeyCode::F(n) => format!("F{n}"),
            _ => "?".to_string(),
        };
        let mut parts: Vec<&str> = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl");
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt");
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift");
        }
        if parts.is_empty() {
            key
        } else {
            format!("{}+{key}", parts.join("+"))
        }
    }
}

/// Overlay key bindings. Each action can have multiple chords.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyMap {
    /// Open the overlay while closed.
    pub open: Vec<KeyChord>,
    /// Close the overlay.
    pub close: Vec<KeyChord>,
    /// Move the active selection up.
    pub move_up: Vec<KeyChord>,
    /// Move the active selection down.
    pub move_down: Vec<KeyChord>,
    /// Navigate to the selected entry.
    pub commit: Vec<KeyChord>,
    /// Erase the whole query.
    pub clear_query: Vec<KeyChord>,
    /// Quit the application from any state.
    pub exit: Vec<KeyChord>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            open: vec![KeyChord::plain(KeyCode::Char('/')), KeyChord::ctrl('k')],
            close: vec![KeyChord::plain(KeyCode::Esc)],
            move_up: vec![KeyChord::plain(KeyCode::Up), KeyChord::ctrl('p')],
            move_down: vec![KeyChord::plain(KeyCode::Down), KeyChord::ctrl('n')],
            commit: vec![KeyChord::plain(KeyCode::Enter)],
            clear_query: vec![KeyChord::ctrl('u')],
            exit: vec![KeyChord::ctrl('c')],
        }
    }
}

/// Whether `ke` matches any chord in `list`.
#[must_use]
pub fn matches_any(ke: &KeyEvent, list: &[KeyChord]) -> bool {
    list.iter().any(|c| c.matches(ke))
}
