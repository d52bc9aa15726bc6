use std::cmp::Ordering;

use serde::Serialize;

use hookline_core::Tabular;

use crate::query::{SortDirection, TableQuery};

/// One derived page of a console table.
#[derive(Debug, Clone, Serialize)]
pub struct TablePage<T> {
    /// The records on this page, filtered and sorted.
    pub items: Vec<T>,
    /// Total records matching the filter, before pagination.
    pub total_items: usize,
    /// Total pages at the query's page size. 0 when no records match.
    pub total_pages: usize,
    /// The page actually returned, clamped into `1..=max(total_pages, 1)`.
    pub page: usize,
}

/// Derive one table page from a record collection.
///
/// Pure function of its inputs: filter → stable sort → clamped pagination.
/// The caller owns the [`TableQuery`] state across invocations.
pub fn view<T: Tabular + Clone>(records: &[T], query: &TableQuery) -> TablePage<T> {
    let mut matched: Vec<&T> = records
        .iter()
        .filter(|record| matches_filter(*record, query))
        .collect();

    if let Some(sort) = query.effective_sort() {
        // Vec::sort_by is stable, so equal keys keep their prior order.
        matched.sort_by(|a, b| {
            let ordering = compare_by_key(*a, *b, &sort.key);
            match sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    let total_items = matched.len();
    let total_pages = total_items.div_ceil(query.page_size.max(1));
    // Out-of-range requests land on the last valid page, never an empty one.
    let page = query.page.clamp(1, total_pages.max(1));

    let start = (page - 1) * query.page_size;
    let items = matched
        .into_iter()
        .skip(start)
        .take(query.page_size)
        .cloned()
        .collect();

    TablePage {
        items,
        total_items,
        total_pages,
        page,
    }
}

fn matches_filter<T: Tabular>(record: &T, query: &TableQuery) -> bool {
    if query.filter.is_empty() {
        return true;
    }
    let needle = query.filter.to_lowercase();
    query.searchable_keys.iter().any(|key| {
        record
            .field(key)
            .is_some_and(|value| value.display_string().to_lowercase().contains(&needle))
    })
}

fn compare_by_key<T: Tabular>(a: &T, b: &T, key: &str) -> Ordering {
    // Records missing the sort key order before those carrying it.
    match (a.field(key), b.field(key)) {
        (Some(lhs), Some(rhs)) => lhs.compare(&rhs),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SortSpec;
    use hookline_core::FieldValue;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: String,
        url: String,
        method: String,
        size: i64,
    }

    impl Row {
        fn new(id: &str, url: &str, method: &str, size: i64) -> Self {
            Self {
                id: id.into(),
                url: url.into(),
                method: method.into(),
                size,
            }
        }
    }

    impl Tabular for Row {
        fn id(&self) -> &str {
            &self.id
        }

        fn field(&self, key: &str) -> Option<FieldValue> {
            match key {
                "id" => Some(self.id.as_str().into()),
                "url" => Some(self.url.as_str().into()),
                "method" => Some(self.method.as_str().into()),
                "size" => Some(FieldValue::Int(self.size)),
                _ => None,
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row::new("1", "https://api.example.com/v1/users/1", "GET", 120),
            Row::new("2", "https://api.example.com/v1/webhook/hubspot/2", "POST", 300),
            Row::new("3", "https://api.example.com/v1/orders/3", "PUT", 80),
            Row::new("4", "https://api.example.com/v1/webhook/hubspot/4", "POST", 300),
            Row::new("5", "https://api.example.com/v1/products/5", "DELETE", 45),
        ]
    }

    fn query() -> TableQuery {
        TableQuery::new(["url", "method"]).with_page_size(10)
    }

    #[test]
    fn empty_filter_selects_all() {
        let page = view(&rows(), &query());
        assert_eq!(page.total_items, 5);
        assert_eq!(page.items.len(), 5);
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let mut q = query();
        q.set_filter("WEBHOOK");
        let page = view(&rows(), &q);
        assert_eq!(page.total_items, 2);
        assert!(page.items.iter().all(|r| r.url.contains("webhook")));
    }

    #[test]
    fn filter_matches_any_searchable_key() {
        let mut q = query();
        q.set_filter("delete");
        let page = view(&rows(), &q);
        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].id, "5");
    }

    #[test]
    fn filtered_items_are_subset_of_unfiltered() {
        let all = view(&rows(), &query());
        let mut q = query();
        q.set_filter("hubspot");
        let filtered = view(&rows(), &q);
        for item in &filtered.items {
            assert!(all.items.contains(item));
        }
    }

    #[test]
    fn sort_ascending_by_numeric_key() {
        let mut q = query();
        q.request_sort("size");
        let page = view(&rows(), &q);
        let sizes: Vec<i64> = page.items.iter().map(|r| r.size).collect();
        assert_eq!(sizes, vec![45, 80, 120, 300, 300]);
    }

    #[test]
    fn sort_is_idempotent() {
        let mut q = query();
        q.request_sort("url");
        let once = view(&rows(), &q);
        let again = view(&once.items, &q);
        assert_eq!(once.items, again.items);
    }

    #[test]
    fn toggle_reverses_distinct_keys_and_keeps_equal_key_order() {
        let mut q = query();
        q.request_sort("size");
        let ascending = view(&rows(), &q);
        // Rows 2 and 4 share size 300; stability keeps insertion order.
        let equal_asc: Vec<&str> = ascending
            .items
            .iter()
            .filter(|r| r.size == 300)
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(equal_asc, vec!["2", "4"]);

        q.request_sort("size");
        let descending = view(&rows(), &q);
        let sizes: Vec<i64> = descending.items.iter().map(|r| r.size).collect();
        assert_eq!(sizes, vec![300, 300, 120, 80, 45]);
        let equal_desc: Vec<&str> = descending
            .items
            .iter()
            .filter(|r| r.size == 300)
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(equal_desc, vec!["2", "4"]);
    }

    #[test]
    fn default_sort_applies_without_selection() {
        let q = TableQuery::new(["url"]).with_default_sort(SortSpec::descending("size"));
        let page = view(&rows(), &q);
        assert_eq!(page.items[0].size, 300);
    }

    #[test]
    fn pagination_metadata() {
        let q = query().with_page_size(2);
        let page = view(&rows(), &q);
        assert_eq!(page.total_items, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), 2);
    }

    #[test]
    fn out_of_range_page_clamps_to_last() {
        let mut q = query().with_page_size(2);
        q.set_page(99);
        let page = view(&rows(), &q);
        assert_eq!(page.page, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "5");
    }

    #[test]
    fn empty_set_reports_page_one() {
        let mut q = query();
        q.set_filter("no-such-record");
        q.set_page(5);
        let page = view(&rows(), &q);
        assert_eq!(page.total_items, 0);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.page, 1);
        assert!(page.items.is_empty());
    }
}
