use crate::models::{ContentType, SearchRequest, SearchResponse};
use crate::notify::Notifier;
use crate::search::errors::SearchError;
use crate::search::response_text::generate_response_text;
use crate::search::traits::SearchBackend;
use crate::store::{into_refs, SearchStore};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Sends queries to the backend and feeds the outcome into the store.
///
/// Overlapping calls are not serialised: whichever response arrives last
/// overwrites results and is appended last to the transcript.
#[derive(Clone)]
pub struct SearchOrchestrator {
    backend: Arc<dyn SearchBackend>,
    store: SearchStore,
    notifier: Arc<dyn Notifier>,
    limit: u32,
}

impl SearchOrchestrator {
    pub fn new(
        backend: Arc<dyn SearchBackend>,
        store: SearchStore,
        notifier: Arc<dyn Notifier>,
        limit: u32,
    ) -> Self {
        Self {
            backend,
            store,
            notifier,
            limit,
        }
    }

    pub fn store(&self) -> &SearchStore {
        &self.store
    }

    async fn fetch(&self, query: &str, city: &str) -> Result<SearchResponse, SearchError> {
        let request = SearchRequest {
            query: query.to_string(),
            city: city.to_string(),
            limit: self.limit,
        };
        debug!("Searching via {} backend", self.backend.backend_name());
        self.backend.search(&request).await
    }

    /// Flat result search. Omitted arguments fall back to the store's
    /// current query and city. Blank queries do nothing.
    pub async fn search(&self, query: Option<&str>, city: Option<&str>) {
        let (query, city) = {
            let state = self.store.snapshot();
            (
                query.map(str::to_string).unwrap_or(state.query),
                city.map(str::to_string).unwrap_or(state.city),
            )
        };
        if query.trim().is_empty() {
            return;
        }

        self.store.set_loading(true);
        self.store.set_error(None);

        match self.fetch(&query, &city).await {
            Ok(data) => {
                info!("Loaded {} results for {:?}", data.results.len(), query);
                self.store
                    .set_results(into_refs(data.results), data.parsed_filters);
            }
            Err(err) => {
                warn!("Search failed: {}", err);
                let message = err.user_message();
                self.store.set_error(Some(message.to_string()));
                self.toast_if_serious(message);
            }
        }

        self.store.set_loading(false);
    }

    /// Conversational search: the query and the reply both land in the
    /// transcript. Blank queries do nothing.
    pub async fn search_with_chat(&self, query: &str, city: Option<&str>) {
        if query.trim().is_empty() {
            return;
        }
        let city = city
            .map(str::to_string)
            .unwrap_or_else(|| self.store.snapshot().city);

        self.store.add_user_message(query);
        self.store.set_typing(true);

        match self.fetch(query, &city).await {
            Ok(data) => {
                let text = generate_response_text(
                    data.results.len(),
                    &data.parsed_filters,
                    data.match_type,
                    &data.relaxed_filters,
                );
                self.store.add_assistant_message(
                    ContentType::Properties,
                    text,
                    Some(into_refs(data.results)),
                    Some(data.parsed_filters),
                );
            }
            Err(err) => {
                warn!("Chat search failed: {}", err);
                let message = err.user_message();
                self.toast_if_serious(message);
                self.store.add_assistant_message(
                    ContentType::Error,
                    format!("Sorry, I encountered an error: {message}"),
                    None,
                    None,
                );
            }
        }

        self.store.set_typing(false);
    }

    /// Only outages and unexpected failures get a toast; the rest are
    /// already visible in the store.
    fn toast_if_serious(&self, message: &str) {
        if message.contains("unavailable") || message.contains("unexpected") {
            self.notifier.show_error(message);
        }
    }

    /// Cities available on the backend. Failures map to a user-safe message.
    pub async fn cities(&self) -> Result<Vec<String>, &'static str> {
        self.backend.cities().await.map_err(|err| {
            warn!("Listing cities failed: {}", err);
            err.user_message()
        })
    }
}
