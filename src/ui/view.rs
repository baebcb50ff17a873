//! Pure projection of overlay state into an ordered list of sections and items.
//!
//! Rendering only ever draws an [`OverlayView`]; it never walks the state
//! itself, so visual order and cursor order cannot drift apart.

use crate::logic::categorize::CategorizedResults;
use crate::state::{AppState, PresentationMode, ResultKind, SearchResult};

/// One row the overlay can draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewItem {
    /// Flattened cursor index; `None` for inert rows that cannot be selected.
    pub index: Option<usize>,
    /// Whether this row is the active cursor's selection.
    pub selected: bool,
    /// Badge kind.
    pub kind: ResultKind,
    /// Primary text.
    pub title: String,
    /// Secondary heading, if any.
    pub subtitle: Option<String>,
    /// Trailing annotation, if any.
    pub extra: Option<String>,
    /// One-line description (may be empty).
    pub description: String,
    /// Navigation target.
    pub target: String,
}

/// A run of items under one `(group, category)` heading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewSection {
    /// Group heading.
    pub group: String,
    /// Category heading.
    pub category: String,
    /// Items in flattened order.
    pub items: Vec<ViewItem>,
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayView {
    /// Presentation mode the view was built for.
    pub mode: PresentationMode,
    /// Query text as typed.
    pub query: String,
    /// Notice shown above the sections (the "no results" line in `Empty`).
    pub notice: Option<String>,
    /// Sections in display order.
    pub sections: Vec<ViewSection>,
}

impl OverlayView {
    /// Iterate every item in display order.
    pub fn items(&self) -> impl Iterator<Item = &ViewItem> {
        self.sections.iter().flat_map(|s| s.items.iter())
    }
}

/// What: Project the current application state.
///
/// Inputs:
/// - `app`: Application state (read only)
///
/// Output:
/// - [`OverlayView`] for the current mode, query and active cursor.
#[must_use]
pub fn project(app: &AppState) -> OverlayView {
    let mut view = project_parts(
        app.mode(),
        app.results.categorized(),
        app.suggestions.items(),
        app.active_cursor().index(),
    );
    view.query = app.query().to_string();
    view
}

/// What: Build a view from its raw inputs.
///
/// Inputs:
/// - `mode`: Presentation mode
/// - `results`: Categorized live results
/// - `suggestions`: Static suggestion list
/// - `active`: Index of the active cursor
///
/// Output:
/// - Sections and items in navigation order, each selectable item tagged with its
///   flattened index and `selected` flag.
///
/// Details:
/// - `Suggesting`: suggestions are selectable.
/// - `Showing`: live results are selectable, walked in categorized order.
/// - `Empty`: a notice plus the suggestions as inert rows (no index, never selected).
#[must_use]
pub fn project_parts(
    mode: PresentationMode,
    results: &CategorizedResults,
    suggestions: &[SearchResult],
    active: usize,
) -> OverlayView {
    let (notice, sections) = match mode {
        PresentationMode::Suggesting => (None, suggestion_sections(suggestions, Some(active))),
        PresentationMode::Showing => (None, result_sections(results, active)),
        PresentationMode::Empty => (
            Some("No results".to_string()),
            suggestion_sections(suggestions, None),
        ),
    };
    OverlayView {
        mode,
        query: String::new(),
        notice,
        sections,
    }
}

/// Sections for live results, in the categorizer's traversal order.
fn result_sections(results: &CategorizedResults, active: usize) -> Vec<ViewSection> {
    let mut sections: Vec<ViewSection> = Vec::new();
    for placed in results.iter() {
        let item = view_item(placed.result, Some(placed.index), placed.index == active);
        match sections.last_mut() {
            Some(s) if s.group == placed.group && s.category == placed.category => {
                s.items.push(item);
            }
            _ => sections.push(ViewSection {
                group: placed.group.to_string(),
                category: placed.category.to_string(),
                items: vec![item],
            }),
        }
    }
    sections
}

/// Sections for the suggestion list; `active = None` renders them inert.
///
/// Suggestions keep list order, so consecutive entries sharing a heading are
/// merged but the flattened index is simply the list position.
fn suggestion_sections(suggestions: &[SearchResult], active: Option<usize>) -> Vec<ViewSection> {
    let mut sections: Vec<ViewSection> = Vec::new();
    for (i, s) in suggestions.iter().enumerate() {
        let item = match active {
            Some(a) => view_item(s, Some(i), i == a),
            None => view_item(s, None, false),
        };
        match sections.last_mut() {
            Some(sec) if sec.group == s.group && sec.category == s.category => sec.items.push(item),
            _ => sections.push(ViewSection {
                group: s.group.clone(),
                category: s.category.clone(),
                items: vec![item],
            }),
        }
    }
    sections
}

fn view_item(r: &SearchResult, index: Option<usize>, selected: bool) -> ViewItem {
    ViewItem {
        index,
        selected,
        kind: r.kind,
        title: r.title.clone(),
        subtitle: r.subtitle.clone(),
        extra: r.extra.clone(),
        description: r.description.clone(),
        target: r.target.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::categorize::{categorize, flatten};

    fn hit(title: &str, group: &str, category: &str) -> SearchResult {
        SearchResult {
            id: None,
            kind: ResultKind::Property,
            group: group.into(),
            category: category.into(),
            title: title.into(),
            subtitle: None,
            extra: Some("number".into()),
            description: String::new(),
            target: format!("/{category}#{title}"),
        }
    }

    #[test]
    /// What: Visual order of results matches the flattened cursor order.
    ///
    /// Inputs:
    /// - Interleaved results across two groups and three categories, active index 2
    ///
    /// Output:
    /// - Item `i` carries index `i` and names `flatten(..)[i]`; only item 2 is selected
    fn view_results_follow_flattened_order() {
        let list = vec![
            hit("a", "motion", "Gestures"),
            hit("b", "three", "Canvas"),
            hit("c", "motion", "Hooks"),
            hit("d", "motion", "Gestures"),
        ];
        let cat = categorize(&list);
        let flat = flatten(&cat);
        let view = project_parts(PresentationMode::Showing, &cat, &[], 2);
        let items: Vec<&ViewItem> = view.items().collect();
        assert_eq!(items.len(), flat.len());
        for (i, (item, r)) in items.iter().zip(&flat).enumerate() {
            assert_eq!(item.index, Some(i));
            assert_eq!(item.target, r.target);
            assert_eq!(item.selected, i == 2);
        }
        let headings: Vec<(&str, &str)> = view
            .sections
            .iter()
            .map(|s| (s.group.as_str(), s.category.as_str()))
            .collect();
        assert_eq!(
            headings,
            [("motion", "Gestures"), ("motion", "Hooks"), ("three", "Canvas")]
        );
    }

    #[test]
    /// What: `Empty` shows a notice and inert suggestions.
    ///
    /// Inputs:
    /// - Empty mode with two suggestions
    ///
    /// Output:
    /// - Notice present, no item selectable or selected
    fn view_empty_mode_is_inert() {
        let sugg = vec![hit("x", "library", "Start"), hit("y", "library", "Start")];
        let view = project_parts(
            PresentationMode::Empty,
            &CategorizedResults::default(),
            &sugg,
            0,
        );
        assert_eq!(view.notice.as_deref(), Some("No results"));
        assert_eq!(view.sections.len(), 1);
        assert!(view.items().all(|i| i.index.is_none() && !i.selected));
    }

    #[test]
    /// What: Projecting app state reflects the query and suggestion cursor.
    ///
    /// Inputs:
    /// - Default app with the suggestion cursor moved to 1
    ///
    /// Output:
    /// - `Suggesting` view where exactly item 1 is selected
    fn view_project_from_app_state() {
        let mut app = AppState::default();
        app.is_open = true;
        app.suggestions.set(1);
        let view = project(&app);
        assert_eq!(view.mode, PresentationMode::Suggesting);
        assert_eq!(view.query, "");
        let selected: Vec<Option<usize>> =
            view.items().filter(|i| i.selected).map(|i| i.index).collect();
        assert_eq!(selected, [Some(1)]);
    }
}
