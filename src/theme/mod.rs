//! Settings, key bindings and palette for docsearch.
//!
//! Everything user-configurable lives in one `settings.conf`; the submodules
//! split path resolution, parsing and the live palette store.

/// Skeleton settings file.
mod config;
/// Value parsers for keys, colors and suggestions.
mod parsing;
/// Path resolution for config directories.
mod paths;
/// Settings loading.
mod settings;
/// Palette store.
mod store;
/// Settings, key map and palette types.
mod types;

pub use paths::{config_dir, logs_dir};
pub use settings::{parse_settings, settings, settings_from_path};
pub use store::{set_theme, theme};
pub use types::{KeyChord, KeyMap, Settings, Theme, matches_any};

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

#[cfg(test)]
/// What: Provide a process-wide mutex to serialize environment-mutating tests.
///
/// Output:
/// - Shared reference to a lazily-initialized `Mutex<()>`.
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}
