//! Catalog session: the held film list plus the favorites set.
//!
//! # Design
//! One `parking_lot::Mutex` guards both pieces of state so a reload and a
//! favorite toggle never interleave half-way. The lock is never held across
//! the network await: a load fetches first, then takes the lock only to swap
//! the film list in.
//!
//! A session built with `CatalogSession::detached` has no transport. The host
//! executes `build_fetch_request` itself and hands the result to
//! `apply_response`. Sessions built with `CatalogSession::new` also get
//! `load` and `load_with_cancel`.

use std::time::Duration;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::client::CatalogClient;
use crate::config::{ClientConfig, FavoritesPolicy};
use crate::error::CatalogError;
use crate::favorites::{favorites_of, Favorites};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::Film;

/// Whether the session has seen a successful load yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    Loaded,
}

#[derive(Debug, Default)]
struct Inner {
    // `None` until the first successful load; never reset afterwards.
    films: Option<Vec<Film>>,
    favorites: Favorites,
}

#[derive(Debug)]
pub struct CatalogSession<T = ()> {
    client: CatalogClient,
    transport: T,
    request_timeout: Duration,
    favorites_policy: FavoritesPolicy,
    inner: Mutex<Inner>,
}

impl CatalogSession<()> {
    /// A session whose host performs the HTTP round-trip.
    pub fn detached(config: ClientConfig) -> Self {
        Self::with_transport(config, ())
    }
}

#[cfg(feature = "reqwest")]
impl CatalogSession<crate::transport::ReqwestTransport> {
    /// A session that fetches with the bundled `reqwest` transport.
    ///
    /// # Errors
    ///
    /// - `CatalogError::Network` - If the HTTP client cannot be built
    pub fn from_config(config: ClientConfig) -> Result<Self, CatalogError> {
        let transport = crate::transport::ReqwestTransport::new(&config.user_agent)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> CatalogSession<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self::with_transport(config, transport)
    }

    /// Fetch the catalog and replace the held film list.
    ///
    /// Returns the number of films now held. On failure the held films and
    /// favorites are left exactly as they were.
    ///
    /// # Errors
    ///
    /// - `CatalogError::Timeout` - If the configured timeout elapses
    /// - Any error from `CatalogClient::fetch_catalog`
    pub async fn load(&self) -> Result<usize, CatalogError> {
        self.load_with_cancel(&CancellationToken::new()).await
    }

    /// `load`, abandoned with `CatalogError::Cancelled` once `cancel` fires.
    ///
    /// # Errors
    ///
    /// - `CatalogError::Cancelled` - If `cancel` fires before the fetch ends
    /// - Everything `load` can return
    pub async fn load_with_cancel(&self, cancel: &CancellationToken) -> Result<usize, CatalogError> {
        let fetch = self.client.fetch_catalog(&self.transport);
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(CatalogError::Cancelled),
            outcome = tokio::time::timeout(self.request_timeout, fetch) => match outcome {
                Ok(fetched) => fetched,
                Err(_) => Err(CatalogError::Timeout { after: self.request_timeout }),
            },
        };
        self.finish_load(result)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T> CatalogSession<T> {
    fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            client: CatalogClient::new(&config.base_url),
            transport,
            request_timeout: config.request_timeout,
            favorites_policy: config.favorites_policy,
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    /// The request a host must execute before calling `apply_response`.
    pub fn build_fetch_request(&self) -> HttpRequest {
        self.client.build_fetch_catalog()
    }

    /// Parse a host-executed response and apply it like `load` would.
    ///
    /// # Errors
    ///
    /// - `CatalogError::Status` / `CatalogError::Decode` - See
    ///   `CatalogClient::parse_fetch_catalog`
    pub fn apply_response(&self, response: HttpResponse) -> Result<usize, CatalogError> {
        let parsed = self.client.parse_fetch_catalog(response);
        self.finish_load(parsed)
    }

    fn finish_load(&self, result: Result<Vec<Film>, CatalogError>) -> Result<usize, CatalogError> {
        match result {
            Ok(films) => Ok(self.replace_films(films)),
            Err(err) => {
                warn!(error = %err, "catalog load failed; keeping previous state");
                Err(err)
            }
        }
    }

    fn replace_films(&self, films: Vec<Film>) -> usize {
        let count = films.len();
        let mut inner = self.inner.lock();

        if self.favorites_policy == FavoritesPolicy::Prune {
            let before = inner.favorites.len();
            inner
                .favorites
                .retain(|id| films.iter().any(|film| film.id == id));
            let pruned = before - inner.favorites.len();
            if pruned > 0 {
                info!(pruned, "dropped favorites missing from the new catalog");
            }
        }

        inner.films = Some(films);
        info!(count, "catalog loaded");
        count
    }

    pub fn state(&self) -> SessionState {
        if self.inner.lock().films.is_some() {
            SessionState::Loaded
        } else {
            SessionState::Empty
        }
    }

    /// The held catalog, empty before the first successful load.
    pub fn films(&self) -> Vec<Film> {
        self.inner.lock().films.clone().unwrap_or_default()
    }

    /// Look up one held film, e.g. for a detail view.
    pub fn film(&self, id: &str) -> Option<Film> {
        let inner = self.inner.lock();
        inner.films.as_ref()?.iter().find(|film| film.id == id).cloned()
    }

    /// Held films that are favorites, in catalog order. Recomputed per call.
    pub fn favorites(&self) -> Vec<Film> {
        let inner = self.inner.lock();
        match &inner.films {
            Some(films) => favorites_of(films, inner.favorites.ids()),
            None => Vec::new(),
        }
    }

    /// Flip `id` in the favorites set and return the new membership.
    ///
    /// Removing always succeeds, even for an id the current catalog no longer
    /// carries. Adding requires the id to be in the held catalog.
    ///
    /// # Errors
    ///
    /// - `CatalogError::UnknownFilm` - If `id` is not a favorite and not held
    pub fn toggle_favorite(&self, id: &str) -> Result<bool, CatalogError> {
        let mut inner = self.inner.lock();
        if !inner.favorites.is_favorite(id) {
            let known = inner
                .films
                .as_ref()
                .is_some_and(|films| films.iter().any(|film| film.id == id));
            if !known {
                return Err(CatalogError::UnknownFilm { id: id.to_string() });
            }
        }
        Ok(inner.favorites.toggle(id))
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.inner.lock().favorites.is_favorite(id)
    }

    /// Number of ids in the favorites set, including any stale ones.
    pub fn favorite_count(&self) -> usize {
        self.inner.lock().favorites.len()
    }
}
