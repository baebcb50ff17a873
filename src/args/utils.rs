//! Helpers that turn parsed arguments into runtime configuration.

use crate::theme::Settings;

use super::Args;

/// What: Determine the log level from command-line arguments.
///
/// Inputs:
/// - `args`: Parsed arguments
///
/// Output:
/// - `"debug"` when `--verbose` is set, otherwise the `--log-level` value.
#[must_use]
pub fn determine_log_level(args: &Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}

/// What: Apply command-line overrides on top of file settings.
///
/// Inputs:
/// - `args`: Parsed arguments
/// - `settings`: Settings loaded from `settings.conf`
///
/// Output: None (mutates `settings`).
///
/// Details:
/// - Only flags that were actually given replace the file value.
pub fn apply_overrides(args: &Args, settings: &mut Settings) {
    if let Some(e) = &args.endpoint {
        settings.search_endpoint.clone_from(e);
    }
    if let Some(u) = &args.site_url {
        settings.site_url.clone_from(u);
    }
    if args.page.is_some() {
        settings.filter_page.clone_from(&args.page);
    }
    if args.library.is_some() {
        settings.filter_library.clone_from(&args.library);
    }
    if let Some(ms) = args.debounce_ms {
        settings.debounce_ms = ms;
    }
    if let Some(limit) = args.limit {
        settings.page_size = usize::from(limit);
    }
}
