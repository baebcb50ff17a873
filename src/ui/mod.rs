//! Terminal rendering for the search overlay.
//!
//! `view` is the pure projection from state to rows; `overlay` draws it.

use ratatui::Frame;

use crate::state::AppState;

mod overlay;
pub mod view;

pub use view::{OverlayView, ViewItem, ViewSection, project, project_parts};

/// Render one frame of the application.
pub fn ui(f: &mut Frame, app: &mut AppState) {
    overlay::render_overlay(f, app);
}
