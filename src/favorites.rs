use crate::catalog::{Catalog, CatalogError, CityId};
use crate::session::Session;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Outcome of a resolved [`FavoritesStore::toggle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The city is now a favorite
    Added,
    /// The city is no longer a favorite
    Removed,
    /// A toggle for this city was already in flight; this one was ignored
    InFlight,
}

#[derive(Default)]
struct FavInner {
    // What the affordance currently displays. Flipped optimistically before
    // the network call resolves, reverted if it fails.
    shown: HashSet<CityId>,
    // Last state confirmed by the catalog. Only mutated on success.
    confirmed: HashSet<CityId>,
    // Per-id in-flight guard against double submission.
    pending: HashSet<CityId>,
}

/// Favorite cities for the current session
///
/// The remote catalog is the source of truth; nothing is persisted locally.
/// Toggles are applied optimistically: the shown state flips before the
/// mutation resolves and rolls back if it fails, so shown and confirmed
/// state always converge once a toggle has resolved.
pub struct FavoritesStore<C: Catalog> {
    catalog: Arc<C>,
    inner: Arc<Mutex<FavInner>>,
}

impl<C: Catalog> Clone for FavoritesStore<C> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Catalog> FavoritesStore<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self {
            catalog,
            inner: Arc::new(Mutex::new(FavInner::default())),
        }
    }

    /// Populate the set from the catalog, once, at session start
    ///
    /// Anonymous sessions cannot have favorites, so the set stays empty
    /// without a request. A fetch failure is non-fatal for the same reason:
    /// the set stays empty and later toggles surface their own errors.
    pub async fn load(&self, session: &Session) {
        if !session.is_logged_in() {
            ::log::debug!("no session token, skipping favorites load");
            return;
        }

        match self.catalog.favorite_ids().await {
            Ok(ids) => {
                let confirmed: HashSet<CityId> = ids.into_iter().collect();
                ::log::info!("loaded {} favorites", confirmed.len());
                let mut inner = self.inner.lock().await;
                inner.shown = confirmed.clone();
                inner.confirmed = confirmed;
            }
            Err(e) => {
                ::log::warn!("failed to load favorites: {}", e);
            }
        }
    }

    /// Flip the favorite state of a city
    ///
    /// The shown state changes immediately; the catalog mutation follows. On
    /// success the target state is committed, on failure the shown state is
    /// rolled back and the error returned for a non-blocking notification.
    /// A second toggle on the same id while one is unresolved is ignored.
    pub async fn toggle(&self, id: CityId) -> Result<ToggleOutcome, CatalogError> {
        let adding = {
            let mut inner = self.inner.lock().await;
            if inner.pending.contains(&id) {
                ::log::debug!("toggle for city {} already in flight", id);
                return Ok(ToggleOutcome::InFlight);
            }
            let adding = !inner.shown.contains(&id);
            // Optimistic flip, before the request is even sent
            if adding {
                inner.shown.insert(id);
            } else {
                inner.shown.remove(&id);
            }
            inner.pending.insert(id);
            adding
        };

        let result = if adding {
            self.catalog.add_favorite(id).await
        } else {
            self.catalog.remove_favorite(id).await
        };

        let mut inner = self.inner.lock().await;
        inner.pending.remove(&id);
        match result {
            Ok(()) => {
                if adding {
                    inner.confirmed.insert(id);
                    Ok(ToggleOutcome::Added)
                } else {
                    inner.confirmed.remove(&id);
                    Ok(ToggleOutcome::Removed)
                }
            }
            Err(e) => {
                // Roll the affordance back to the pre-toggle state
                if adding {
                    inner.shown.remove(&id);
                } else {
                    inner.shown.insert(id);
                }
                ::log::warn!("favorite update for city {} failed: {}", id, e);
                Err(e)
            }
        }
    }

    /// What the affordance for a city currently displays
    pub async fn is_shown(&self, id: CityId) -> bool {
        self.inner.lock().await.shown.contains(&id)
    }

    /// Whether a city is in the catalog-confirmed favorite set
    pub async fn is_confirmed(&self, id: CityId) -> bool {
        self.inner.lock().await.confirmed.contains(&id)
    }

    /// Snapshot of the shown ids, for rendering a list page
    pub async fn shown_ids(&self) -> HashSet<CityId> {
        self.inner.lock().await.shown.clone()
    }
}
