use std::fs;
use std::path::{Path, PathBuf};

/// Skeleton settings file written on first run.
pub(crate) const SKELETON_SETTINGS_CONTENT: &str = "# docsearch settings\n\
#\n\
# Format: key = value (one per line). Lines starting with # are comments.\n\
# A trailing comment must be separated from the value by whitespace.\n\
#\n\
# ---------- Search service ----------\n\
search_endpoint = http://127.0.0.1:8787/search\n\
site_url = https://docs.example.com\n\
site_name = Docs\n\
#\n\
# Quiet period (ms) after the last keystroke before a query is sent\n\
debounce_ms = 200\n\
# Maximum number of results per query\n\
page_size = 10\n\
#\n\
# Context filters (leave empty to search everything)\n\
filter_page =\n\
filter_library =\n\
#\n\
# ---------- Suggestions ----------\n\
# suggestion = title | group | category | target [| kind]\n\
# When no suggestion lines are present the built-in list is used.\n\
# suggestion = Quick start | library | Getting started | /docs/quick-start\n\
# suggestion = useDrag | library | Gestures | /docs/gestures#drag | function\n\
#\n\
# ---------- Key bindings ----------\n\
# Comma-separated chords, e.g. \"Down, Ctrl+N\"\n\
keybind_open = /, Ctrl+K\n\
keybind_close = Esc\n\
keybind_move_up = Up, Ctrl+P\n\
keybind_move_down = Down, Ctrl+N\n\
keybind_commit = Enter\n\
keybind_clear_query = Ctrl+U\n\
keybind_exit = Ctrl+C\n\
#\n\
# ---------- Theme ----------\n\
# Colors as #RRGGBB or R,G,B\n\
theme_base = #1e1e2e\n\
theme_surface = #313244\n\
theme_border = #7f849c\n\
theme_text = #cdd6f4\n\
theme_subtext = #a6adc8\n\
theme_accent = #74c7ec\n\
theme_heading = #cba6f7\n\
theme_warning = #f9e2af\n\
theme_error = #f38ba8\n";

/// What: Write the skeleton settings file into `dir` unless one already exists.
///
/// Inputs:
/// - `dir`: Config directory.
///
/// Output:
/// - Path of the settings file (existing or newly written).
///
/// # Errors
/// - Returns the IO error when the directory or file cannot be created.
pub(crate) fn ensure_settings_file(dir: &Path) -> std::io::Result<PathBuf> {
    let path = dir.join("settings.conf");
    if path.is_file() && fs::metadata(&path).is_ok_and(|m| m.len() > 0) {
        return Ok(path);
    }
    fs::create_dir_all(dir)?;
    fs::write(&path, SKELETON_SETTINGS_CONTENT)?;
    tracing::info!(path = %path.display(), "wrote default settings skeleton");
    Ok(path)
}
