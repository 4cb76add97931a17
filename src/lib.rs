// Re-export modules
pub mod budget;
pub mod catalog;
pub mod config;
pub mod debounce;
pub mod favorites;
pub mod filter;
pub mod list;
pub mod render;
pub mod session;
pub mod validate;

// Re-export commonly used types for convenience
pub use catalog::{
    Booking, BookingRequest, Catalog, CatalogError, City, CityDraft, CityId, CityPage,
};
pub use config::ClientConfig;
pub use favorites::{FavoritesStore, ToggleOutcome};
pub use filter::{CityFilter, FilterUpdate};
pub use list::{ListController, ListPhase, ListSnapshot, LoadMoreOutcome};
pub use session::Session;

use budget::BudgetTracker;
use catalog::http::HttpCatalog;
use debounce::DebouncedInput;
use std::error::Error;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Assembled client: listing state, favorites and the session they share
pub struct CatalogClient {
    pub catalog: Arc<HttpCatalog>,
    pub list: ListController<HttpCatalog>,
    pub favorites: FavoritesStore<HttpCatalog>,
    pub session: Session,
    pub config: ClientConfig,
}

impl CatalogClient {
    /// Debouncer for search input, using the configured quiet window
    pub fn search_debouncer(&self) -> (DebouncedInput, mpsc::Receiver<String>) {
        DebouncedInput::new(Duration::from_millis(self.config.search_debounce_ms))
    }

    /// Budget tracker persisted at the configured path
    pub fn budget_tracker(&self, default_budget: f64, default_days: u32) -> BudgetTracker {
        BudgetTracker::load(&self.config.budget_file, default_budget, default_days)
    }
}

/// Builder for a [`CatalogClient`] against the REST catalog
///
/// ```no_run
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// use wanderlist::Browser;
///
/// let client = Browser::new().with_page_size(9).build().await?;
/// client.list.reload().await?;
/// # Ok(())
/// # }
/// ```
pub struct Browser {
    config: ClientConfig,
}

impl Default for Browser {
    fn default() -> Self {
        Self::new()
    }
}

impl Browser {
    /// Create a builder with the default configuration
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, Box<dyn Error>> {
        self.config = ClientConfig::from_file(path)?;
        Ok(self)
    }

    /// Override the API base URL
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_base_url = url.into();
        self
    }

    /// Override the page size
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.config.page_size = page_size;
        self
    }

    /// Build the client: load the session, wire the catalog, fetch favorites
    ///
    /// The favorites fetch is skipped for anonymous sessions and non-fatal
    /// when it fails, so building succeeds whenever the configuration is
    /// usable.
    pub async fn build(self) -> Result<CatalogClient, Box<dyn Error>> {
        let session = Session::load(&self.config.session_file);

        let catalog = HttpCatalog::new(&self.config)?
            .with_token(session.token().map(str::to_string));
        let catalog = Arc::new(catalog);

        let list = ListController::new(Arc::clone(&catalog), self.config.page_size);
        let favorites = FavoritesStore::new(Arc::clone(&catalog));
        favorites.load(&session).await;

        Ok(CatalogClient {
            catalog,
            list,
            favorites,
            session,
            config: self.config,
        })
    }
}
