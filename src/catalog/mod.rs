pub mod http;

#[cfg(test)]
pub(crate) mod mock;

use crate::filter::CityFilter;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier for a city record
pub type CityId = u64;

/// A destination record returned by the catalog
///
/// Treated as opaque display data by the rest of the crate; nothing here is
/// ever mutated client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    pub name: String,

    #[serde(default)]
    pub state: String,

    #[serde(default)]
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(default)]
    pub avg_budget_per_day: f64,

    #[serde(default)]
    pub trip_types: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_season: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_days: Option<String>,

    #[serde(default)]
    pub attractions: Vec<String>,
}

/// One page of listing results
///
/// Produced fresh for every query; never cached across filter changes.
#[derive(Debug, Clone, PartialEq)]
pub struct CityPage {
    /// Cities for the requested page, in server order
    pub cities: Vec<City>,

    /// Total number of matches across all pages
    pub count: u64,

    /// Whether another page exists after this one
    pub has_next: bool,
}

/// Payload for creating or updating a city, admin-only operations
///
/// Unset fields are omitted from the JSON body, so one draft type serves
/// both creation and partial updates.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CityDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_budget_per_day: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_types: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_season: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_days: Option<String>,
}

impl CityDraft {
    /// Draft carrying the fields the catalog requires for creation
    pub fn new(
        name: impl Into<String>,
        state: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            state: Some(state.into()),
            description: Some(description.into()),
            ..Self::default()
        }
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_budget_per_day(mut self, amount: f64) -> Self {
        self.avg_budget_per_day = Some(amount);
        self
    }

    pub fn with_trip_types(mut self, trip_types: Vec<String>) -> Self {
        self.trip_types = Some(trip_types);
        self
    }

    pub fn with_best_season(mut self, season: impl Into<String>) -> Self {
        self.best_season = Some(season.into());
        self
    }

    pub fn with_recommended_days(mut self, days: impl Into<String>) -> Self {
        self.recommended_days = Some(days.into());
        self
    }
}

/// A confirmed trip booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(default)]
    pub id: u64,

    /// Server-assigned reference shown to the customer
    pub booking_reference: String,

    pub city_name: String,
    pub customer_name: String,

    #[serde(default)]
    pub customer_email: String,

    #[serde(default)]
    pub customer_phone: String,

    /// YYYY-MM-DD
    pub check_in_date: String,

    /// YYYY-MM-DD
    pub check_out_date: String,

    #[serde(default)]
    pub num_travelers: u32,

    #[serde(default)]
    pub daily_budget: f64,

    /// Computed server-side: nights x daily budget x travelers
    #[serde(default)]
    pub total_cost: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Payload for requesting a booking; every field is required by the API
#[derive(Debug, Clone, Serialize)]
pub struct BookingRequest {
    pub city_name: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,

    /// YYYY-MM-DD
    pub check_in_date: String,

    /// YYYY-MM-DD
    pub check_out_date: String,

    pub num_travelers: u32,
    pub daily_budget: f64,
}

/// Failures reported by a catalog
///
/// Every variant is recoverable: callers surface the error and fall back to
/// their last known-good state.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport-level failure (connection refused, timeout, ...)
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with an explicit failure payload
    #[error("catalog error: {0}")]
    Api(String),

    /// The response body could not be decoded
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A request URL could not be built
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

/// Remote city catalog
///
/// The seam between the client core and the REST API. Production code uses
/// [`http::HttpCatalog`]; tests script responses through a mock.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// List cities matching a filter
    async fn list_cities(&self, filter: &CityFilter) -> Result<CityPage, CatalogError>;

    /// Fetch a single city by id
    async fn city_by_id(&self, id: CityId) -> Result<City, CatalogError>;

    /// Fetch the ids of the current user's favorite cities
    async fn favorite_ids(&self) -> Result<Vec<CityId>, CatalogError>;

    /// Mark a city as a favorite
    async fn add_favorite(&self, id: CityId) -> Result<(), CatalogError>;

    /// Remove a city from the favorites
    async fn remove_favorite(&self, id: CityId) -> Result<(), CatalogError>;

    /// Distinct regions available for filtering
    async fn regions(&self) -> Result<Vec<String>, CatalogError>;

    /// Distinct trip types available for filtering
    async fn trip_types(&self) -> Result<Vec<String>, CatalogError>;

    /// Create a city; the catalog rejects this without an admin token
    async fn create_city(&self, draft: &CityDraft) -> Result<City, CatalogError>;

    /// Update the set fields of an existing city; admin token required
    async fn update_city(&self, id: CityId, draft: &CityDraft) -> Result<City, CatalogError>;

    /// Delete a city; admin token required
    async fn delete_city(&self, id: CityId) -> Result<(), CatalogError>;

    /// Bookings visible to the current user; admins see every booking
    async fn bookings(&self) -> Result<Vec<Booking>, CatalogError>;

    /// Request a booking for a trip
    async fn create_booking(&self, request: &BookingRequest) -> Result<Booking, CatalogError>;
}
