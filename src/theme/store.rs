use std::sync::{OnceLock, RwLock};

use super::types::Theme;

/// Process-wide palette, installed once settings are loaded.
static THEME_STORE: OnceLock<RwLock<Theme>> = OnceLock::new();

/// Install `theme` as the active palette (replacing any earlier one).
pub fn set_theme(theme: Theme) {
    let lock = THEME_STORE.get_or_init(|| RwLock::new(theme));
    if let Ok(mut guard) = lock.write() {
        *guard = theme;
    }
}

/// Return the active palette; the built-in one if none was installed.
#[must_use]
pub fn theme() -> Theme {
    THEME_STORE
        .get()
        .and_then(|lock| lock.read().ok().map(|t| *t))
        .unwrap_or_default()
}
