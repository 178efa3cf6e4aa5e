//! List query parameters and pagination utilities

use crate::core::filter::{FilterField, FilterGroup};
use crate::core::record::Listed;
use crate::core::selection::ListState;
use crate::core::stage::Stage;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::ops::Range;
use uuid::Uuid;

/// Query parameters for the applicant list
///
/// Extracted from URL query strings, or flattened into the body of a
/// filter-tree query. All parameters are optional.
///
/// # Example
/// ```text
/// GET /applicants?page=2&limit=10
/// GET /applicants?q=abel&batch=B1&stage=Not%20Interested
/// GET /applicants?selected=<uuid>&auto_select=true&sort=age:desc
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    /// Page number (starts at 1, clamped to the last page)
    #[serde(default = "default_page")]
    pub page: usize,

    /// Number of items per page; falls back to the configured page size
    pub limit: Option<usize>,

    /// Free-text search over name and email
    pub q: Option<String>,

    /// Batch equality filter
    pub batch: Option<String>,

    /// Stage equality filter, any known alias
    pub stage: Option<String>,

    /// Currently selected applicant
    pub selected: Option<Uuid>,

    /// Fall back to the first row when the selection is not visible
    pub auto_select: Option<bool>,

    /// Sort field and direction
    ///
    /// # Format
    /// - `field:asc` or `field` (ascending)
    /// - `field:desc` (descending)
    ///
    /// Fields: `name`, `age`, `created_at`, `stage`
    pub sort: Option<String>,
}

fn default_page() -> usize {
    1
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: None,
            q: None,
            batch: None,
            stage: None,
            selected: None,
            auto_select: None,
            sort: None,
        }
    }
}

impl ListQuery {
    /// Get page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    /// Get limit, falling back to `default` and capped at `max`
    pub fn limit(&self, default: usize, max: usize) -> usize {
        self.limit.unwrap_or(default).clamp(1, max.max(1))
    }

    /// Parse the sort expression; unknown fields are ignored
    pub fn sort_order(&self) -> Option<SortOrder> {
        self.sort.as_deref().and_then(SortOrder::parse)
    }

    /// Build the list state these parameters describe
    pub fn to_list_state(&self) -> ListState {
        ListState {
            search_query: self.q.clone().unwrap_or_default(),
            batch_filter: non_blank(self.batch.as_deref()),
            stage_filter: non_blank(self.stage.as_deref()),
            selected_id: self.selected,
            page: self.page(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Body of a filter-tree query: a tree plus the usual list parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TreeQuery {
    #[serde(default)]
    pub filter: Option<FilterGroup>,

    #[serde(flatten)]
    pub params: ListQuery,
}

/// Sortable list columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Age,
    CreatedAt,
    Stage,
}

/// A parsed `field:direction` sort expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub key: SortKey,
    pub descending: bool,
}

impl SortOrder {
    pub fn parse(expr: &str) -> Option<Self> {
        let (field, direction) = match expr.split_once(':') {
            Some((field, direction)) => (field, direction),
            None => (expr, "asc"),
        };

        let key = match field.trim() {
            "name" => SortKey::Name,
            "age" => SortKey::Age,
            "created_at" => SortKey::CreatedAt,
            "stage" => SortKey::Stage,
            _ => return None,
        };

        let descending = match direction.trim() {
            "asc" | "" => false,
            "desc" => true,
            _ => return None,
        };

        Some(Self { key, descending })
    }

    /// Stable sort; records missing the key sort last in either direction
    pub fn sort<R: Listed>(&self, records: &mut [&R]) {
        records.sort_by(|a, b| {
            let ordering = match self.key {
                SortKey::Name => Some(
                    a.display_name()
                        .to_lowercase()
                        .cmp(&b.display_name().to_lowercase()),
                ),
                SortKey::Age => compare_present(
                    a.field_value(FilterField::Age).as_number(),
                    b.field_value(FilterField::Age).as_number(),
                    |x, y| x.partial_cmp(y).unwrap_or(Ordering::Equal),
                ),
                SortKey::CreatedAt => Some(a.created_at().cmp(&b.created_at())),
                SortKey::Stage => compare_present(
                    Stage::normalize(a.stage()),
                    Stage::normalize(b.stage()),
                    |x, y| x.cmp(y),
                ),
            };

            match ordering {
                Some(ordering) if self.descending => ordering.reverse(),
                Some(ordering) => ordering,
                None => missing_last(*a, self.key),
            }
        });
    }
}

// `None` means exactly one side is missing the key.
fn compare_present<T>(
    a: Option<T>,
    b: Option<T>,
    cmp: impl Fn(&T, &T) -> Ordering,
) -> Option<Ordering> {
    match (a, b) {
        (Some(x), Some(y)) => Some(cmp(&x, &y)),
        (None, None) => Some(Ordering::Equal),
        _ => None,
    }
}

fn missing_last<R: Listed>(a: &R, key: SortKey) -> Ordering {
    let present = match key {
        SortKey::Age => a.field_value(FilterField::Age).as_number().is_some(),
        SortKey::Stage => Stage::normalize(a.stage()).is_some(),
        SortKey::Name | SortKey::CreatedAt => true,
    };
    if present {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// Pagination metadata
///
/// Pages are 1-based. The requested page is clamped into
/// `[1, total_pages]`; an empty collection still has one (empty) page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Page number as requested
    pub page: usize,

    /// Requested page clamped into the valid range
    pub safe_page: usize,

    /// Number of items per page
    pub page_size: usize,

    /// Total number of items (after filters)
    pub total_items: usize,

    /// Total number of pages, at least 1
    pub total_pages: usize,

    /// First index on the page
    pub start_index: usize,

    /// One past the last index on the page
    pub end_index: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(total_items: usize, page: usize, page_size: usize) -> Self {
        // Ensure page_size is at least 1 to avoid division by zero
        let page_size = page_size.max(1);
        let total_pages = total_items.div_ceil(page_size).max(1);
        let safe_page = page.clamp(1, total_pages);
        let start_index = (safe_page - 1) * page_size;
        let end_index = (start_index + page_size).min(total_items);

        Self {
            page,
            safe_page,
            page_size,
            total_items,
            total_pages,
            start_index,
            end_index,
            has_next: safe_page < total_pages,
            has_prev: safe_page > 1,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start_index..self.end_index
    }
}

/// Slice the current page out of a filtered collection
pub fn paginate<'a, T>(items: &'a [T], meta: &PaginationMeta) -> &'a [T] {
    let end = meta.end_index.min(items.len());
    let start = meta.start_index.min(end);
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::applicant::Applicant;

    #[test]
    fn test_list_query_defaults() {
        let params: ListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(20, 100), 20);
        assert!(params.sort_order().is_none());
    }

    #[test]
    fn test_default_matches_empty_query_string() {
        let parsed: ListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(ListQuery::default().page, 1);
        assert_eq!(ListQuery::default().page, parsed.page);
        assert_eq!(TreeQuery::default().params.page, 1);
    }

    #[test]
    fn test_limit_is_clamped() {
        let params = ListQuery {
            limit: Some(500),
            ..Default::default()
        };
        assert_eq!(params.limit(20, 100), 100);

        let params = ListQuery {
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(params.limit(20, 100), 1);
    }

    #[test]
    fn test_pagination_clamps_to_last_page() {
        let meta = PaginationMeta::new(23, 99, 10);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.safe_page, 3);
        assert_eq!(meta.range(), 20..23);
        assert!(!meta.has_next);
        assert!(meta.has_prev);
    }

    #[test]
    fn test_pagination_empty_collection() {
        let meta = PaginationMeta::new(0, 1, 10);
        assert_eq!(meta.total_pages, 1);
        assert_eq!(meta.safe_page, 1);

        let items: Vec<u32> = Vec::new();
        assert!(paginate(&items, &meta).is_empty());
    }

    #[test]
    fn test_pagination_page_zero_and_zero_size() {
        let meta = PaginationMeta::new(5, 0, 0);
        assert_eq!(meta.page_size, 1);
        assert_eq!(meta.safe_page, 1);
        assert_eq!(meta.total_pages, 5);
    }

    #[test]
    fn test_paginate_slices() {
        let items: Vec<u32> = (0..23).collect();
        let meta = PaginationMeta::new(items.len(), 2, 10);
        assert_eq!(paginate(&items, &meta), &items[10..20]);
        assert!(meta.has_next);
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!(
            SortOrder::parse("age:desc"),
            Some(SortOrder { key: SortKey::Age, descending: true })
        );
        assert_eq!(
            SortOrder::parse("name"),
            Some(SortOrder { key: SortKey::Name, descending: false })
        );
        assert!(SortOrder::parse("salary").is_none());
        assert!(SortOrder::parse("age:sideways").is_none());
    }

    #[test]
    fn test_sort_puts_missing_values_last() {
        let a = Applicant::new("A", "").with_age(30.0);
        let b = Applicant::new("B", "").with_age("unknown");
        let c = Applicant::new("C", "").with_age(20.0);

        for expr in ["age:asc", "age:desc"] {
            let mut rows = vec![&a, &b, &c];
            SortOrder::parse(expr).unwrap().sort(&mut rows);
            assert_eq!(rows[2].name, "B", "{expr}");
        }

        let mut rows = vec![&a, &b, &c];
        SortOrder::parse("age:desc").unwrap().sort(&mut rows);
        assert_eq!(rows[0].name, "A");
    }

    #[test]
    fn test_list_state_from_query() {
        let params = ListQuery {
            page: 3,
            q: Some("abel".to_string()),
            batch: Some("  ".to_string()),
            stage: Some("1".to_string()),
            ..Default::default()
        };
        let state = params.to_list_state();
        assert_eq!(state.page, 3);
        assert_eq!(state.search_query, "abel");
        assert_eq!(state.batch_filter, None);
        assert_eq!(state.stage_filter.as_deref(), Some("1"));
    }

    #[test]
    fn test_tree_query_flattens_params() {
        let body: TreeQuery = serde_json::from_str(
            r#"{"filter": {"logic": "OR"}, "page": 2, "q": "sa"}"#,
        )
        .unwrap();
        assert!(body.filter.is_some());
        assert_eq!(body.params.page(), 2);
        assert_eq!(body.params.q.as_deref(), Some("sa"));
    }
}
