use std::process::{Command, Stdio};

use tokio::{sync::mpsc, task::JoinHandle};

/// What: Turn a result target into an absolute URL.
///
/// Inputs:
/// - `site_url`: Base URL of the documentation site
/// - `target`: Result link as returned by the index
///
/// Output:
/// - Absolute URL string.
///
/// Details:
/// - Absolute `http(s)` targets pass through.
/// - Root-relative (`/docs/x`) and fragment-only (`#drag`) targets are joined
///   onto the site URL; anything else is treated as a path under it.
#[must_use]
pub fn resolve_target(site_url: &str, target: &str) -> String {
    if target.starts_with("http://") || target.starts_with("https://") {
        return target.to_string();
    }
    let base = site_url.trim_end_matches('/');
    if target.starts_with('/') || target.starts_with('#') {
        format!("{base}{target}")
    } else {
        format!("{base}/{target}")
    }
}

/// What: Spawn the navigation sink's worker.
///
/// Inputs:
/// - `nav_rx`: Committed targets
/// - `site_url`: Base URL for relative targets
/// - `launch`: When false (headless), targets are only logged
///
/// Output:
/// - Handle of the worker task; it ends when `nav_rx` closes.
///
/// Details:
/// - Uses `xdg-open`, falling back to `open`. Without either the URL is logged.
#[must_use]
pub fn spawn_navigation_worker(
    mut nav_rx: mpsc::UnboundedReceiver<String>,
    site_url: String,
    launch: bool,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let opener = if launch {
            which::which("xdg-open")
                .or_else(|_| which::which("open"))
                .ok()
        } else {
            None
        };
        while let Some(target) = nav_rx.recv().await {
            let url = resolve_target(&site_url, &target);
            let Some(opener) = &opener else {
                tracing::info!(url = %url, "navigate (no system opener)");
                continue;
            };
            let spawned = Command::new(opener)
                .arg(&url)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn();
            match spawned {
                Ok(_) => tracing::info!(url = %url, opener = %opener.display(), "opened"),
                Err(e) => tracing::warn!(url = %url, error = %e, "failed to launch opener"),
            }
        }
    })
}
