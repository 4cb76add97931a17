/// Query filter for the city catalog
///
/// Mirrors the query parameters accepted by the catalog's listing endpoint
/// and reaches the wire through [`to_query_pairs`](Self::to_query_pairs).
/// `page` always starts at 1 and is reset to 1 whenever any other field
/// changes; `limit` is fixed for the lifetime of the filter.
#[derive(Debug, Clone, PartialEq)]
pub struct CityFilter {
    /// Free-text search across name, state and description
    pub search: String,

    /// Restrict results to a single region
    pub region: Option<String>,

    /// Restrict results to cities offering a trip type
    pub trip_type: Option<String>,

    /// Upper bound on average budget per day
    pub budget_max: Option<u32>,

    /// Current page, 1-based
    pub page: u32,

    /// Page size, fixed per session
    pub limit: u32,
}

/// Default page size
fn default_limit() -> u32 {
    6
}

impl Default for CityFilter {
    fn default() -> Self {
        Self::new(default_limit())
    }
}

impl CityFilter {
    /// Create an empty filter with the given page size
    pub fn new(limit: u32) -> Self {
        Self {
            search: String::new(),
            region: None,
            trip_type: None,
            budget_max: None,
            page: 1,
            limit,
        }
    }

    /// Merge a partial update into the filter
    ///
    /// Only fields present in the update are touched. The page is reset to 1
    /// unconditionally; a changed filter always restarts pagination.
    pub fn apply(&mut self, update: FilterUpdate) {
        if let Some(search) = update.search {
            self.search = search.trim().to_string();
        }
        if let Some(region) = update.region {
            self.region = region.filter(|v| !v.is_empty());
        }
        if let Some(trip_type) = update.trip_type {
            self.trip_type = trip_type.filter(|v| !v.is_empty());
        }
        if let Some(budget_max) = update.budget_max {
            self.budget_max = budget_max;
        }
        self.page = 1;
    }

    /// Clear every field back to its default, keeping the page size
    pub fn reset(&mut self) {
        *self = Self::new(self.limit);
    }

    /// Encode the filter as query pairs for the listing endpoint
    ///
    /// Empty or unset fields are omitted, matching what the catalog expects.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.search.is_empty() {
            pairs.push(("search", self.search.clone()));
        }
        if let Some(region) = &self.region {
            pairs.push(("region", region.clone()));
        }
        if let Some(trip_type) = &self.trip_type {
            pairs.push(("trip_type", trip_type.clone()));
        }
        if let Some(budget_max) = self.budget_max {
            pairs.push(("budget_max", budget_max.to_string()));
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("limit", self.limit.to_string()));
        pairs
    }
}

/// Partial update to a [`CityFilter`]
///
/// Built with the `with_*` methods; unset fields leave the current filter
/// value alone. For the optional fields, setting `None` (or an empty string)
/// clears the restriction.
#[derive(Debug, Clone, Default)]
pub struct FilterUpdate {
    search: Option<String>,
    region: Option<Option<String>>,
    trip_type: Option<Option<String>>,
    budget_max: Option<Option<u32>>,
}

impl FilterUpdate {
    /// Create an update that changes nothing (but still resets the page)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Set or clear the region restriction
    pub fn with_region(mut self, region: Option<String>) -> Self {
        self.region = Some(region);
        self
    }

    /// Set or clear the trip type restriction
    pub fn with_trip_type(mut self, trip_type: Option<String>) -> Self {
        self.trip_type = Some(trip_type);
        self
    }

    /// Set or clear the budget ceiling
    pub fn with_budget_max(mut self, budget_max: Option<u32>) -> Self {
        self.budget_max = Some(budget_max);
        self
    }
}
