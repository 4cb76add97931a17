use super::{Booking, BookingRequest, Catalog, CatalogError, City, CityDraft, CityId, CityPage};
use crate::filter::CityFilter;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};

/// Mutation recorded by the mock
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Mutation {
    Add(CityId),
    Remove(CityId),
}

// A scripted response, optionally held in flight until the gate is notified.
type Scripted<T> = (Option<Arc<Notify>>, Result<T, CatalogError>);

/// Scripted catalog for tests
///
/// Listing and mutation results are queued up front and popped per call; an
/// empty queue fails the call with an Api error so a test that issues more
/// requests than it scripted fails loudly. Gated entries suspend until
/// their `Notify` fires, which lets tests overlap requests deliberately.
#[derive(Default)]
pub(crate) struct MockCatalog {
    list_results: Mutex<VecDeque<Scripted<CityPage>>>,
    list_calls: Mutex<Vec<CityFilter>>,
    favorite_results: Mutex<VecDeque<Result<Vec<CityId>, CatalogError>>>,
    mutation_results: Mutex<VecDeque<Scripted<()>>>,
    mutations: Mutex<Vec<Mutation>>,
}

impl MockCatalog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn push_list(&self, result: Result<CityPage, CatalogError>) {
        self.list_results.lock().await.push_back((None, result));
    }

    /// Script a listing response that stays in flight until `gate` fires
    pub(crate) async fn push_list_gated(
        &self,
        gate: Arc<Notify>,
        result: Result<CityPage, CatalogError>,
    ) {
        self.list_results.lock().await.push_back((Some(gate), result));
    }

    pub(crate) async fn push_favorite_ids(&self, result: Result<Vec<CityId>, CatalogError>) {
        self.favorite_results.lock().await.push_back(result);
    }

    pub(crate) async fn push_mutation(&self, result: Result<(), CatalogError>) {
        self.mutation_results.lock().await.push_back((None, result));
    }

    /// Script a favorite mutation that stays in flight until `gate` fires
    pub(crate) async fn push_mutation_gated(
        &self,
        gate: Arc<Notify>,
        result: Result<(), CatalogError>,
    ) {
        self.mutation_results
            .lock()
            .await
            .push_back((Some(gate), result));
    }

    /// Filters seen by `list_cities`, in call order
    pub(crate) async fn list_calls(&self) -> Vec<CityFilter> {
        self.list_calls.lock().await.clone()
    }

    /// Add/remove calls seen, in call order
    pub(crate) async fn mutations(&self) -> Vec<Mutation> {
        self.mutations.lock().await.clone()
    }

    async fn resolve_mutation(&self) -> Result<(), CatalogError> {
        let entry = self.mutation_results.lock().await.pop_front();
        match entry {
            Some((gate, result)) => {
                if let Some(gate) = gate {
                    gate.notified().await;
                }
                result
            }
            None => Err(CatalogError::Api("unscripted mutation".to_string())),
        }
    }
}

#[async_trait]
impl Catalog for MockCatalog {
    async fn list_cities(&self, filter: &CityFilter) -> Result<CityPage, CatalogError> {
        self.list_calls.lock().await.push(filter.clone());
        let entry = self.list_results.lock().await.pop_front();
        match entry {
            Some((gate, result)) => {
                if let Some(gate) = gate {
                    gate.notified().await;
                }
                result
            }
            None => Err(CatalogError::Api("unscripted list call".to_string())),
        }
    }

    async fn city_by_id(&self, id: CityId) -> Result<City, CatalogError> {
        Ok(city(id, &format!("city-{id}")))
    }

    async fn favorite_ids(&self) -> Result<Vec<CityId>, CatalogError> {
        self.favorite_results
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn add_favorite(&self, id: CityId) -> Result<(), CatalogError> {
        self.mutations.lock().await.push(Mutation::Add(id));
        self.resolve_mutation().await
    }

    async fn remove_favorite(&self, id: CityId) -> Result<(), CatalogError> {
        self.mutations.lock().await.push(Mutation::Remove(id));
        self.resolve_mutation().await
    }

    async fn regions(&self) -> Result<Vec<String>, CatalogError> {
        Ok(vec!["North".to_string(), "South".to_string()])
    }

    async fn trip_types(&self) -> Result<Vec<String>, CatalogError> {
        Ok(vec!["Adventure".to_string(), "Beach".to_string()])
    }

    async fn create_city(&self, _draft: &CityDraft) -> Result<City, CatalogError> {
        Err(CatalogError::Api("unscripted admin call".to_string()))
    }

    async fn update_city(&self, _id: CityId, _draft: &CityDraft) -> Result<City, CatalogError> {
        Err(CatalogError::Api("unscripted admin call".to_string()))
    }

    async fn delete_city(&self, _id: CityId) -> Result<(), CatalogError> {
        Err(CatalogError::Api("unscripted admin call".to_string()))
    }

    async fn bookings(&self) -> Result<Vec<Booking>, CatalogError> {
        Ok(Vec::new())
    }

    async fn create_booking(&self, _request: &BookingRequest) -> Result<Booking, CatalogError> {
        Err(CatalogError::Api("unscripted booking call".to_string()))
    }
}

/// Minimal city record for tests
pub(crate) fn city(id: CityId, name: &str) -> City {
    City {
        id,
        name: name.to_string(),
        state: String::new(),
        description: String::new(),
        image_url: None,
        category: None,
        badge: None,
        region: None,
        avg_budget_per_day: 0.0,
        trip_types: Vec::new(),
        best_season: None,
        recommended_days: None,
        attractions: Vec::new(),
    }
}

/// A page of sequentially named cities for tests
pub(crate) fn page(ids: std::ops::Range<u64>, count: u64, has_next: bool) -> CityPage {
    CityPage {
        cities: ids.map(|id| city(id, &format!("city-{id}"))).collect(),
        count,
        has_next,
    }
}
