//! Lifecycle of one console session.

use crate::api::ApiClient;
use crate::config::Config;
use crate::errors::AppError;
use crate::models::Resource;
use crate::store::Store;
use crate::sync::source::{EventSource, HttpEventSource};
use crate::sync::{LiveSync, SyncHandle};

pub struct Console {
    api: ApiClient,
    store: Store,
    sync: SyncHandle,
}

impl Console {
    /// Open the live channel, then seed the store from the REST API.
    ///
    /// The two run concurrently: events may land before, during or after the
    /// bulk fetch. A failed fetch is logged and the store is left to the live
    /// channel.
    pub async fn activate(config: Config) -> Console {
        let http = reqwest::Client::new();
        let api = ApiClient::with_client(http.clone(), &config.api_base_url);
        let source = HttpEventSource::new(http, config.events_url());
        log::info!("Loading from {} and following {}", api.base_url(), source.url());
        Self::activate_with(&config, api, source).await
    }

    pub async fn activate_with<S: EventSource>(config: &Config, api: ApiClient, source: S) -> Console {
        let store = Store::new();
        let sync = LiveSync::new(source, store.clone(), config.reconnect_delay).spawn();
        if let Err(e) = load_all(&api, &store).await {
            log::error!("Error loading data: {e}");
        }
        Console { api, store, sync }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Client for mutations. Writes go straight to the API; the store picks
    /// up the result from the live channel.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub async fn shutdown(self) {
        self.sync.shutdown().await;
    }
}

/// Fetch all three collections concurrently and seed the store.
///
/// Slots that received a live write while the fetch was in flight keep that
/// data; they are returned so callers can tell.
pub async fn load_all(api: &ApiClient, store: &Store) -> Result<Vec<Resource>, AppError> {
    let since = store.revisions();
    let (users, roles, permissions) =
        tokio::try_join!(api.list_users(), api.list_roles(), api.list_permissions())?;
    let skipped = store.seed(since, users, roles, permissions);
    if !skipped.is_empty() {
        log::info!("Initial load kept newer live data for {skipped:?}");
    }
    log::info!("Initial load complete: {:?}", store.stats());
    Ok(skipped)
}
