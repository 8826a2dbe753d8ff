//! Client-side list pipeline: search, filter, sort, paginate.
//!
//! List views fetch the whole dataset once (see [`crate::pagination`]) and then
//! derive what they show from it with the pure functions in this module. None of
//! them mutate their input; each returns a new `Vec`.
//!
//! The order is fixed by [`ListQuery::apply`]: search, equality filters, sort,
//! then pagination. The total reported to pagination controls is the size of
//! the filtered set before slicing.

use std::cmp::Ordering;

use crate::models::Provider;

/// A field value as seen by the list pipeline.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// String form used for searching and non-numeric comparisons.
    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Text(s) => s.clone(),
        }
    }
}

/// Named field access for anything that appears in a list view.
pub trait Record {
    fn field(&self, name: &str) -> Option<FieldValue>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

/// Case-insensitive substring search over `fields`.
///
/// The query is trimmed first; a blank query returns every item.
pub fn search_items<T: Record + Clone>(items: &[T], query: &str, fields: &[&str]) -> Vec<T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|item| {
            fields.iter().any(|field| {
                item.field(field)
                    .map(|value| value.as_text().to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
        })
        .cloned()
        .collect()
}

fn filter_by_field<T: Record + Clone>(items: &[T], field: &str, wanted: Option<&str>) -> Vec<T> {
    match wanted {
        None => items.to_vec(),
        Some(wanted) => items
            .iter()
            .filter(|item| item.field(field).map(|v| v.as_text() == wanted).unwrap_or(false))
            .cloned()
            .collect(),
    }
}

/// Keep items whose `status` equals `status`. `None` keeps everything.
pub fn filter_by_status<T: Record + Clone>(items: &[T], status: Option<&str>) -> Vec<T> {
    filter_by_field(items, "status", status)
}

/// Keep items whose provider is one of `providers`. An empty set keeps everything.
pub fn filter_by_provider<T: Record + Clone>(items: &[T], providers: &[Provider]) -> Vec<T> {
    if providers.is_empty() {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|item| {
            item.field("provider")
                .map(|v| {
                    let text = v.as_text();
                    providers.iter().any(|p| p.as_str() == text)
                })
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

/// Keep actions of the given wire `type`. `None` keeps everything.
pub fn filter_by_action_type<T: Record + Clone>(items: &[T], action_type: Option<&str>) -> Vec<T> {
    filter_by_field(items, "type", action_type)
}

fn locale_compare(a: &str, b: &str) -> Ordering {
    // Letters first compare without case, then lowercase sorts ahead of uppercase.
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| b.cmp(a))
}

fn compare_values(a: Option<FieldValue>, b: Option<FieldValue>) -> Ordering {
    match (a, b) {
        (Some(FieldValue::Number(x)), Some(FieldValue::Number(y))) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (a, b) => {
            let a = a.map(|v| v.as_text()).unwrap_or_default();
            let b = b.map(|v| v.as_text()).unwrap_or_default();
            locale_compare(&a, &b)
        }
    }
}

/// Stable sort on a copy of `items`.
///
/// Numbers compare arithmetically; everything else compares as text.
pub fn sort_items<T: Record + Clone>(items: &[T], field: &str, direction: SortDirection) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = compare_values(a.field(field), b.field(field));
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    sorted
}

/// 1-indexed page slice `[(page-1)*per_page, page*per_page)`.
///
/// Pages past the end (and page 0) are empty rather than an error.
pub fn paginate_items<T: Clone>(items: &[T], page: usize, per_page: usize) -> Vec<T> {
    if page == 0 || per_page == 0 {
        return Vec::new();
    }
    let start = (page - 1).saturating_mul(per_page);
    if start >= items.len() {
        return Vec::new();
    }
    let end = start.saturating_add(per_page).min(items.len());
    items[start..end].to_vec()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

/// Everything a list view needs to turn a full dataset into one visible page.
#[derive(Clone, Debug, PartialEq)]
pub struct ListQuery {
    pub search: String,
    pub status: Option<String>,
    pub providers: Vec<Provider>,
    pub action_type: Option<String>,
    pub sort: Option<SortSpec>,
    pub page: usize,
    pub per_page: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: None,
            providers: Vec::new(),
            action_type: None,
            sort: None,
            page: 1,
            per_page: crate::constants::DEFAULT_PER_PAGE,
        }
    }
}

impl ListQuery {
    pub fn with_per_page(per_page: usize) -> Self {
        Self {
            per_page,
            ..Self::default()
        }
    }

    /// Run the full pipeline.
    pub fn apply<T: Record + Clone>(&self, items: &[T], search_fields: &[&str]) -> ListView<T> {
        let found = search_items(items, &self.search, search_fields);
        let found = filter_by_status(&found, self.status.as_deref());
        let found = filter_by_provider(&found, &self.providers);
        let found = filter_by_action_type(&found, self.action_type.as_deref());
        let found = match &self.sort {
            Some(sort) => sort_items(&found, &sort.field, sort.direction),
            None => found,
        };

        ListView {
            total: found.len(),
            items: paginate_items(&found, self.page, self.per_page),
            page: self.page,
            per_page: self.per_page,
        }
    }

    /// Filters changed: go back to the first page.
    pub fn reset_page(&mut self) {
        self.page = 1;
    }
}

/// One visible page plus the size of the filtered set it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct ListView<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
}

impl<T> ListView<T> {
    pub fn page_count(&self) -> usize {
        if self.per_page == 0 {
            return 0;
        }
        self.total.div_ceil(self.per_page).max(1)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
