use super::{Booking, BookingRequest, Catalog, CatalogError, City, CityDraft, CityId, CityPage};
use crate::config::ClientConfig;
use crate::filter::CityFilter;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Catalog backed by the travel-planner REST API
///
/// Decodes the API's `{success, ...}` envelope: a `success: false` payload
/// becomes [`CatalogError::Api`], transport failures become
/// [`CatalogError::Network`].
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpCatalog {
    /// Create a catalog client from configuration
    pub fn new(config: &ClientConfig) -> Result<Self, CatalogError> {
        let mut base_url = Url::parse(&config.api_base_url)?;

        // Url::join drops the last path segment without a trailing slash
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    /// Attach a bearer token for authenticated endpoints
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Build the full URL for an endpoint path
    fn endpoint(&self, path: &str) -> Result<Url, CatalogError> {
        Ok(self.base_url.join(path)?)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let url = self.endpoint(path)?;
        ::log::debug!("GET {}", url);

        let request = self.authorize(self.client.get(url)).query(query);
        let body = request.send().await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> Result<T, CatalogError> {
        let url = self.endpoint(path)?;
        ::log::debug!("{} {}", method, url);

        let request = self.authorize(self.client.request(method, url));
        let body = request.send().await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn send_body<B, T>(
        &self,
        method: reqwest::Method,
        path: &str,
        payload: &B,
    ) -> Result<T, CatalogError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        ::log::debug!("{} {}", method, url);

        let request = self.authorize(self.client.request(method, url)).json(payload);
        let body = request.send().await?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn list_cities(&self, filter: &CityFilter) -> Result<CityPage, CatalogError> {
        let envelope: ListEnvelope = self
            .get_json("cities", &filter.to_query_pairs())
            .await?;

        if !envelope.success {
            return Err(failure(envelope.error, None));
        }

        Ok(CityPage {
            cities: envelope.cities,
            count: envelope.count,
            has_next: envelope.has_next,
        })
    }

    async fn city_by_id(&self, id: CityId) -> Result<City, CatalogError> {
        let envelope: CityEnvelope = self.get_json(&format!("cities/{id}"), &[]).await?;

        if !envelope.success {
            return Err(failure(envelope.error, None));
        }
        envelope
            .city
            .ok_or_else(|| CatalogError::Api("response carried no city".to_string()))
    }

    async fn favorite_ids(&self) -> Result<Vec<CityId>, CatalogError> {
        let envelope: FavoritesEnvelope = self.get_json("favorites", &[]).await?;

        if !envelope.success {
            return Err(failure(envelope.error, None));
        }
        Ok(envelope.favorites)
    }

    async fn add_favorite(&self, id: CityId) -> Result<(), CatalogError> {
        let envelope: AckEnvelope = self
            .send_json(reqwest::Method::POST, &format!("favorites/{id}"))
            .await?;

        if !envelope.success {
            return Err(failure(envelope.error, envelope.message));
        }
        Ok(())
    }

    async fn remove_favorite(&self, id: CityId) -> Result<(), CatalogError> {
        let envelope: AckEnvelope = self
            .send_json(reqwest::Method::DELETE, &format!("favorites/{id}"))
            .await?;

        if !envelope.success {
            return Err(failure(envelope.error, envelope.message));
        }
        Ok(())
    }

    async fn regions(&self) -> Result<Vec<String>, CatalogError> {
        let envelope: RegionsEnvelope = self.get_json("cities/regions", &[]).await?;

        if !envelope.success {
            return Err(failure(envelope.error, None));
        }
        Ok(envelope.regions)
    }

    async fn trip_types(&self) -> Result<Vec<String>, CatalogError> {
        let envelope: TripTypesEnvelope = self.get_json("cities/trip-types", &[]).await?;

        if !envelope.success {
            return Err(failure(envelope.error, None));
        }
        Ok(envelope.trip_types)
    }

    async fn create_city(&self, draft: &CityDraft) -> Result<City, CatalogError> {
        let envelope: CityEnvelope = self
            .send_body(reqwest::Method::POST, "cities", draft)
            .await?;

        if !envelope.success {
            return Err(failure(envelope.error, None));
        }
        envelope
            .city
            .ok_or_else(|| CatalogError::Api("response carried no city".to_string()))
    }

    async fn update_city(&self, id: CityId, draft: &CityDraft) -> Result<City, CatalogError> {
        let envelope: CityEnvelope = self
            .send_body(reqwest::Method::PUT, &format!("cities/{id}"), draft)
            .await?;

        if !envelope.success {
            return Err(failure(envelope.error, None));
        }
        envelope
            .city
            .ok_or_else(|| CatalogError::Api("response carried no city".to_string()))
    }

    async fn delete_city(&self, id: CityId) -> Result<(), CatalogError> {
        let envelope: AckEnvelope = self
            .send_json(reqwest::Method::DELETE, &format!("cities/{id}"))
            .await?;

        if !envelope.success {
            return Err(failure(envelope.error, envelope.message));
        }
        Ok(())
    }

    async fn bookings(&self) -> Result<Vec<Booking>, CatalogError> {
        let envelope: BookingsEnvelope = self.get_json("bookings", &[]).await?;

        if !envelope.success {
            return Err(failure(envelope.error, None));
        }
        Ok(envelope.bookings)
    }

    async fn create_booking(&self, request: &BookingRequest) -> Result<Booking, CatalogError> {
        let envelope: BookingEnvelope = self
            .send_body(reqwest::Method::POST, "bookings", request)
            .await?;

        if !envelope.success {
            return Err(failure(envelope.error, envelope.message));
        }
        envelope
            .booking
            .ok_or_else(|| CatalogError::Api("response carried no booking".to_string()))
    }
}

/// Map a failure payload to an Api error, preferring the explicit error text
fn failure(error: Option<String>, message: Option<String>) -> CatalogError {
    CatalogError::Api(
        error
            .or(message)
            .unwrap_or_else(|| "request failed".to_string()),
    )
}

#[derive(Debug, Deserialize)]
struct ListEnvelope {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    count: u64,
    #[serde(default)]
    has_next: bool,
    #[serde(default)]
    cities: Vec<City>,
}

#[derive(Debug, Deserialize)]
struct CityEnvelope {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    city: Option<City>,
}

#[derive(Debug, Deserialize)]
struct FavoritesEnvelope {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    favorites: Vec<CityId>,
}

#[derive(Debug, Deserialize)]
struct AckEnvelope {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RegionsEnvelope {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    regions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TripTypesEnvelope {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    trip_types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct BookingsEnvelope {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    bookings: Vec<Booking>,
}

#[derive(Debug, Deserialize)]
struct BookingEnvelope {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    booking: Option<Booking>,
}
