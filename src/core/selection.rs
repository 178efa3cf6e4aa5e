//! List/selection state for the master-detail review screen
//!
//! Combines free-text search, batch and stage equality filters, optional
//! sorting, pagination and the selected row into one derived [`ListView`].
//! Resolution is a pure function of the state and the input rows, so a
//! stale recompute can always be replaced by a fresher one.

use crate::core::query::{PaginationMeta, SortOrder, paginate};
use crate::core::record::Listed;
use crate::core::stage::stages_equal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User-controlled list state, independent of the filter tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListState {
    pub search_query: String,
    pub batch_filter: Option<String>,
    pub stage_filter: Option<String>,
    pub selected_id: Option<Uuid>,
    pub page: usize,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            batch_filter: None,
            stage_filter: None,
            selected_id: None,
            page: 1,
        }
    }
}

/// Knobs for [`ListState::resolve`] that come from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    pub page_size: usize,
    pub auto_select: bool,
    pub sort: Option<SortOrder>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            page_size: 20,
            auto_select: false,
            sort: None,
        }
    }
}

/// The derived view: one page of rows plus the resolved selection
#[derive(Debug, Serialize)]
pub struct ListView<'a, R> {
    pub items: Vec<&'a R>,
    pub total: usize,
    pub pagination: PaginationMeta,
    pub selected: Option<&'a R>,
}

impl ListState {
    /// Change the search text and go back to the first page
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.page = 1;
    }

    /// Change the batch filter and go back to the first page
    pub fn set_batch_filter(&mut self, batch: Option<String>) {
        self.batch_filter = batch;
        self.page = 1;
    }

    /// Change the stage filter and go back to the first page
    pub fn set_stage_filter(&mut self, stage: Option<String>) {
        self.stage_filter = stage;
        self.page = 1;
    }

    pub fn select(&mut self, id: Uuid) {
        self.selected_id = Some(id);
    }

    pub fn clear_selection(&mut self) {
        self.selected_id = None;
    }

    /// Request a page; out-of-range values are clamped when resolving
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Derive the visible view from rows already narrowed by the filter tree
    pub fn resolve<'a, R, I>(&self, records: I, options: &ResolveOptions) -> ListView<'a, R>
    where
        R: Listed,
        I: IntoIterator<Item = &'a R>,
    {
        let needle = self.search_query.trim().to_lowercase();

        let mut filtered: Vec<&'a R> = records
            .into_iter()
            .filter(|record| matches_search(*record, &needle))
            .filter(|record| {
                self.batch_filter
                    .as_deref()
                    .is_none_or(|batch| eq_loose(record.batch(), batch))
            })
            .filter(|record| {
                self.stage_filter
                    .as_deref()
                    .is_none_or(|stage| stages_equal(record.stage(), stage))
            })
            .collect();

        if let Some(order) = options.sort {
            order.sort(&mut filtered);
        }

        let selected = self
            .selected_id
            .and_then(|id| filtered.iter().copied().find(|record| record.id() == id))
            .or_else(|| {
                if options.auto_select {
                    filtered.first().copied()
                } else {
                    None
                }
            });

        let pagination = PaginationMeta::new(filtered.len(), self.page, options.page_size);
        let items = paginate(&filtered, &pagination).to_vec();

        ListView {
            items,
            total: filtered.len(),
            pagination,
            selected,
        }
    }
}

fn matches_search<R: Listed>(record: &R, needle: &str) -> bool {
    needle.is_empty()
        || record.display_name().to_lowercase().contains(needle)
        || record.secondary_key().to_lowercase().contains(needle)
}

fn eq_loose(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::applicant::Applicant;
    use crate::core::query::SortKey;

    fn roster() -> Vec<Applicant> {
        vec![
            Applicant::new("Abel", "abel@example.com")
                .with_batch("B1")
                .with_stage("registered"),
            Applicant::new("Sara", "sara@example.com")
                .with_batch("B1")
                .with_stage("approved"),
            Applicant::new("Tom", "tom@mail.org")
                .with_batch("B2")
                .with_stage("Not Interested"),
            Applicant::new("Lena", "lena@example.com")
                .with_batch("b2")
                .with_stage("1"),
        ]
    }

    fn names<R: Listed>(rows: &[&R]) -> Vec<String> {
        rows.iter().map(|r| r.display_name().to_string()).collect()
    }

    #[test]
    fn test_filter_changes_reset_page() {
        let mut state = ListState::default();
        state.set_page(4);
        state.set_search("ab");
        assert_eq!(state.page, 1);

        state.set_page(4);
        state.set_batch_filter(Some("B1".to_string()));
        assert_eq!(state.page, 1);

        state.set_page(4);
        state.set_stage_filter(None);
        assert_eq!(state.page, 1);

        state.set_page(4);
        state.select(Uuid::new_v4());
        assert_eq!(state.page, 4);
    }

    #[test]
    fn test_search_matches_name_or_email() {
        let rows = roster();
        let mut state = ListState::default();

        state.set_search("SARA");
        let view = state.resolve(&rows, &ResolveOptions::default());
        assert_eq!(names(&view.items), vec!["Sara"]);

        state.set_search("mail.org");
        let view = state.resolve(&rows, &ResolveOptions::default());
        assert_eq!(names(&view.items), vec!["Tom"]);

        state.set_search("   ");
        let view = state.resolve(&rows, &ResolveOptions::default());
        assert_eq!(view.total, 4);
    }

    #[test]
    fn test_batch_and_stage_filters_intersect() {
        let rows = roster();
        let mut state = ListState::default();
        state.set_batch_filter(Some("B2".to_string()));
        state.set_stage_filter(Some("rejected".to_string()));

        let view = state.resolve(&rows, &ResolveOptions::default());
        assert_eq!(names(&view.items), vec!["Tom", "Lena"]);
    }

    #[test]
    fn test_selection_resolution() {
        let rows = roster();
        let sara = rows[1].id;
        let mut state = ListState::default();
        state.select(sara);

        let view = state.resolve(&rows, &ResolveOptions::default());
        assert_eq!(view.selected.map(|r| r.id), Some(sara));

        // Selected row filtered out: none, or the first row with auto-select.
        state.set_search("tom");
        let view = state.resolve(&rows, &ResolveOptions::default());
        assert!(view.selected.is_none());

        let auto = ResolveOptions {
            auto_select: true,
            ..Default::default()
        };
        let view = state.resolve(&rows, &auto);
        assert_eq!(view.selected.map(|r| r.name.as_str()), Some("Tom"));
    }

    #[test]
    fn test_selection_survives_paging() {
        let rows = roster();
        let mut state = ListState::default();
        state.select(rows[0].id);
        state.set_page(2);

        let options = ResolveOptions {
            page_size: 2,
            ..Default::default()
        };
        let view = state.resolve(&rows, &options);
        assert_eq!(names(&view.items), vec!["Tom", "Lena"]);
        assert_eq!(view.selected.map(|r| r.name.as_str()), Some("Abel"));
    }

    #[test]
    fn test_page_is_clamped() {
        let rows = roster();
        let mut state = ListState::default();
        state.set_page(99);

        let options = ResolveOptions {
            page_size: 3,
            ..Default::default()
        };
        let view = state.resolve(&rows, &options);
        assert_eq!(view.pagination.safe_page, 2);
        assert_eq!(names(&view.items), vec!["Lena"]);
    }

    #[test]
    fn test_empty_result_has_one_empty_page() {
        let rows = roster();
        let mut state = ListState::default();
        state.set_search("nobody");

        let view = state.resolve(&rows, &ResolveOptions::default());
        assert!(view.items.is_empty());
        assert_eq!(view.pagination.total_pages, 1);
        assert!(view.selected.is_none());
    }

    #[test]
    fn test_sorted_view() {
        let rows = roster();
        let options = ResolveOptions {
            sort: Some(SortOrder {
                key: SortKey::Name,
                descending: false,
            }),
            ..Default::default()
        };
        let view = ListState::default().resolve(&rows, &options);
        assert_eq!(names(&view.items), vec!["Abel", "Lena", "Sara", "Tom"]);
    }
}
