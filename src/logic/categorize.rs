//! Two-level grouping of search results and its one linear traversal order.

use crate::state::SearchResult;

/// Results sharing one `(group, category)` pair, in arrival order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultCategory {
    /// Category name (typically the source page).
    pub name: String,
    /// Results in this bucket, original relative order preserved.
    pub results: Vec<SearchResult>,
}

/// All categories sharing one group, in first-seen order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultGroup {
    /// Group name (typically the library).
    pub name: String,
    /// Categories in first-seen order.
    pub categories: Vec<ResultCategory>,
}

/// Search results partitioned by group, then category.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategorizedResults {
    /// Groups in first-seen order.
    pub groups: Vec<ResultGroup>,
}

/// One step of the traversal: where a result sits and what its flattened index is.
#[derive(Clone, Copy, Debug)]
pub struct Placed<'a> {
    /// Position in the flattened order.
    pub index: usize,
    /// Owning group.
    pub group: &'a str,
    /// Owning category.
    pub category: &'a str,
    /// The result itself.
    pub result: &'a SearchResult,
}

impl CategorizedResults {
    /// What: Walk every result in navigation order.
    ///
    /// Inputs: none
    ///
    /// Output:
    /// - Iterator over [`Placed`] entries: groups, then categories, then results.
    ///
    /// Details:
    /// - This is the only definition of "next result". Both [`flatten`] and the
    ///   view projection consume it, so visual row `i` and cursor index `i`
    ///   always name the same result.
    pub fn iter(&self) -> impl Iterator<Item = Placed<'_>> {
        self.groups
            .iter()
            .flat_map(|g| {
                g.categories.iter().flat_map(move |c| {
                    c.results.iter().map(move |r| (g.name.as_str(), c.name.as_str(), r))
                })
            })
            .enumerate()
            .map(|(index, (group, category, result))| Placed {
                index,
                group,
                category,
                result,
            })
    }

    /// Total number of results across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|g| g.categories.iter())
            .map(|c| c.results.len())
            .sum()
    }

    /// Whether there are no results at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What: Group a flat result list by `group`, then by `category`.
///
/// Inputs:
/// - `results`: Results in the order the index returned them.
///
/// Output:
/// - [`CategorizedResults`] with groups and categories in first-seen order.
///
/// Details:
/// - Stable: results keep their original relative order inside each bucket.
/// - Lists are small (one page of hits), so a linear scan per insert is fine.
#[must_use]
pub fn categorize(results: &[SearchResult]) -> CategorizedResults {
    let mut out = CategorizedResults::default();
    for r in results {
        let gi = if let Some(i) = out.groups.iter().position(|g| g.name == r.group) {
            i
        } else {
            out.groups.push(ResultGroup {
                name: r.group.clone(),
                categories: Vec::new(),
            });
            out.groups.len() - 1
        };
        let group = &mut out.groups[gi];
        if let Some(cat) = group.categories.iter_mut().find(|c| c.name == r.category) {
            cat.results.push(r.clone());
        } else {
            group.categories.push(ResultCategory {
                name: r.category.clone(),
                results: vec![r.clone()],
            });
        }
    }
    out
}

/// What: Produce the linear navigation order of categorized results.
///
/// Inputs:
/// - `categorized`: Grouped results.
///
/// Output:
/// - Results in traversal order (see [`CategorizedResults::iter`]).
#[must_use]
pub fn flatten(categorized: &CategorizedResults) -> Vec<SearchResult> {
    categorized.iter().map(|p| p.result.clone()).collect()
}
