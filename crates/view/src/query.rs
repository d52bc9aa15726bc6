use serde::{Deserialize, Serialize};

/// Direction of a column sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// A sort key and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Ascending sort on the given key.
    #[must_use]
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Descending sort on the given key.
    #[must_use]
    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Caller-persisted query state for one console table.
///
/// The state-changing methods encode the console's interaction rules:
/// editing the filter or requesting a sort resets to page 1, and
/// re-selecting the current sort key toggles its direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableQuery {
    /// Case-insensitive substring filter. Empty selects all records.
    pub filter: String,
    /// User-selected sort, if any.
    pub sort: Option<SortSpec>,
    /// Sort applied when the user has not selected one.
    pub default_sort: Option<SortSpec>,
    /// Requested page, 1-based. Clamped at view time.
    pub page: usize,
    /// Fixed page size.
    pub page_size: usize,
    /// Fields the filter is matched against.
    pub searchable_keys: Vec<String>,
}

impl TableQuery {
    /// Create a query over the given searchable fields with the default
    /// page size of 10 and no sort.
    #[must_use]
    pub fn new(searchable_keys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            filter: String::new(),
            sort: None,
            default_sort: None,
            page: 1,
            page_size: 10,
            searchable_keys: searchable_keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Set the page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the sort applied when the user has not selected one.
    #[must_use]
    pub fn with_default_sort(mut self, sort: SortSpec) -> Self {
        self.default_sort = Some(sort);
        self
    }

    /// Replace the filter string and reset to page 1.
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
        self.page = 1;
    }

    /// Select a sort key.
    ///
    /// A new key sorts ascending; re-selecting the current key toggles its
    /// direction. Either way the page resets to 1.
    pub fn request_sort(&mut self, key: impl Into<String>) {
        let key = key.into();
        let direction = match &self.sort {
            Some(current) if current.key == key => current.direction.toggled(),
            _ => SortDirection::Ascending,
        };
        self.sort = Some(SortSpec { key, direction });
        self.page = 1;
    }

    /// Request a page. Out-of-range values are clamped at view time.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// The sort in effect: the user's selection, else the default.
    #[must_use]
    pub fn effective_sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref().or(self.default_sort.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_key_sorts_ascending() {
        let mut query = TableQuery::new(["url"]);
        query.request_sort("url");
        assert_eq!(query.sort, Some(SortSpec::ascending("url")));
    }

    #[test]
    fn same_key_toggles_direction() {
        let mut query = TableQuery::new(["url"]);
        query.request_sort("url");
        query.request_sort("url");
        assert_eq!(query.sort, Some(SortSpec::descending("url")));
        query.request_sort("url");
        assert_eq!(query.sort, Some(SortSpec::ascending("url")));
    }

    #[test]
    fn switching_key_resets_to_ascending() {
        let mut query = TableQuery::new(["url", "method"]);
        query.request_sort("url");
        query.request_sort("url");
        query.request_sort("method");
        assert_eq!(query.sort, Some(SortSpec::ascending("method")));
    }

    #[test]
    fn filter_and_sort_reset_page() {
        let mut query = TableQuery::new(["url"]);
        query.set_page(7);
        query.set_filter("webhook");
        assert_eq!(query.page, 1);

        query.set_page(4);
        query.request_sort("url");
        assert_eq!(query.page, 1);
    }

    #[test]
    fn default_sort_applies_until_selection() {
        let mut query =
            TableQuery::new(["received_at"]).with_default_sort(SortSpec::descending("received_at"));
        assert_eq!(
            query.effective_sort(),
            Some(&SortSpec::descending("received_at"))
        );
        query.request_sort("url");
        assert_eq!(query.effective_sort(), Some(&SortSpec::ascending("url")));
    }

    #[test]
    fn page_floor_is_one() {
        let mut query = TableQuery::new(["url"]);
        query.set_page(0);
        assert_eq!(query.page, 1);
    }
}
