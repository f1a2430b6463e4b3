//! Application state store: search results, chat transcript, compare list
//! and transient UI flags behind one lock.

use crate::models::{
    ChatMessage, ContentType, MessageRole, MessageUpdate, ParsedFilters, Property, PropertyRef,
};
use chrono::Utc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;
use uuid::Uuid;

/// Maximum number of properties in the compare list
pub const MAX_COMPARE: usize = 5;

/// Snapshot of everything the store owns
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
    /// Empty means all cities
    pub city: String,
    pub results: Vec<PropertyRef>,
    pub parsed_filters: Option<ParsedFilters>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub selected_property: Option<PropertyRef>,
    pub compare_list: Vec<PropertyRef>,
    pub messages: Vec<ChatMessage>,
    pub is_typing: bool,
}

type Listener = Arc<dyn Fn(&SearchState) + Send + Sync>;

struct Inner {
    state: Mutex<SearchState>,
    listeners: Mutex<Vec<Listener>>,
}

/// Cloneable handle to one store instance. Clones share state.
#[derive(Clone)]
pub struct SearchStore {
    inner: Arc<Inner>,
}

impl Default for SearchStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(SearchState::default()),
                listeners: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Register a callback that receives the new state after every mutation.
    /// Listeners run with no lock held, so they may read, mutate or
    /// subscribe. A listener that mutates unconditionally recurses forever.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&SearchState) + Send + Sync + 'static,
    {
        lock(&self.inner.listeners).push(Arc::new(listener));
    }

    /// Cloned snapshot of the current state.
    pub fn snapshot(&self) -> SearchState {
        lock(&self.inner.state).clone()
    }

    /// Apply `f` under the lock, then notify listeners with the result.
    fn update<R>(&self, f: impl FnOnce(&mut SearchState) -> R) -> R {
        let (out, snapshot) = {
            let mut state = lock(&self.inner.state);
            let out = f(&mut state);
            (out, state.clone())
        };
        let listeners: Vec<Listener> = lock(&self.inner.listeners).clone();
        for listener in &listeners {
            listener(&snapshot);
        }
        out
    }

    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.update(|s| s.query = query);
    }

    pub fn set_city(&self, city: impl Into<String>) {
        let city = city.into();
        self.update(|s| s.city = city);
    }

    /// Replace the flat result view. Clears any error; the transcript is untouched.
    pub fn set_results(&self, results: Vec<PropertyRef>, filters: ParsedFilters) {
        self.update(|s| {
            s.results = results;
            s.parsed_filters = Some(filters);
            s.error = None;
        });
    }

    pub fn set_loading(&self, loading: bool) {
        self.update(|s| s.is_loading = loading);
    }

    /// Set or clear the error. A non-empty error also ends loading.
    pub fn set_error(&self, error: Option<String>) {
        self.update(|s| {
            if error.is_some() {
                s.is_loading = false;
            }
            s.error = error;
        });
    }

    pub fn select_property(&self, property: Option<PropertyRef>) {
        self.update(|s| s.selected_property = property);
    }

    /// Append to the compare list. Full lists and duplicate ids are ignored.
    pub fn add_to_compare(&self, property: PropertyRef) {
        self.update(|s| {
            if s.compare_list.len() >= MAX_COMPARE {
                debug!("Compare list full, ignoring {}", property.id);
                return;
            }
            if s.compare_list.iter().any(|p| p.id == property.id) {
                debug!("{} already in compare list", property.id);
                return;
            }
            s.compare_list.push(property);
        });
    }

    pub fn remove_from_compare(&self, property_id: &str) {
        self.update(|s| s.compare_list.retain(|p| p.id != property_id));
    }

    pub fn clear_compare(&self) {
        self.update(|s| s.compare_list.clear());
    }

    pub fn is_in_compare(&self, property_id: &str) -> bool {
        lock(&self.inner.state)
            .compare_list
            .iter()
            .any(|p| p.id == property_id)
    }

    /// Remove the property if present, otherwise try to add it.
    pub fn toggle_compare(&self, property: PropertyRef) {
        if self.is_in_compare(&property.id) {
            self.remove_from_compare(&property.id);
        } else {
            self.add_to_compare(property);
        }
    }

    pub fn can_add_more(&self) -> bool {
        lock(&self.inner.state).compare_list.len() < MAX_COMPARE
    }

    /// Append a user text message and return its id.
    pub fn add_user_message(&self, text: impl Into<String>) -> String {
        let message = ChatMessage {
            id: generate_id(),
            role: MessageRole::User,
            content_type: ContentType::Text,
            text: text.into(),
            properties: None,
            filters: None,
            timestamp: Utc::now(),
        };
        let id = message.id.clone();
        self.update(|s| s.messages.push(message));
        id
    }

    /// Append an assistant message and return its id.
    ///
    /// Supplied properties and filters also replace `results` and
    /// `parsed_filters`, keeping the flat view in sync with the chat.
    pub fn add_assistant_message(
        &self,
        content_type: ContentType,
        text: impl Into<String>,
        properties: Option<Vec<PropertyRef>>,
        filters: Option<ParsedFilters>,
    ) -> String {
        let message = ChatMessage {
            id: generate_id(),
            role: MessageRole::Assistant,
            content_type,
            text: text.into(),
            properties,
            filters,
            timestamp: Utc::now(),
        };
        let id = message.id.clone();
        self.update(|s| {
            if let Some(properties) = &message.properties {
                s.results = properties.clone();
            }
            if let Some(filters) = &message.filters {
                s.parsed_filters = Some(filters.clone());
            }
            s.messages.push(message);
        });
        id
    }

    pub fn update_message(&self, id: &str, update: MessageUpdate) {
        self.update(|s| {
            if let Some(message) = s.messages.iter_mut().find(|m| m.id == id) {
                message.apply(update);
            }
        });
    }

    pub fn set_typing(&self, typing: bool) {
        self.update(|s| s.is_typing = typing);
    }

    /// Empty the transcript and results. The compare list is kept.
    pub fn clear_chat(&self) {
        self.update(|s| {
            s.messages.clear();
            s.results.clear();
            s.parsed_filters = None;
        });
    }
}

/// Wrap freshly received properties in shared handles.
pub fn into_refs(properties: Vec<Property>) -> Vec<PropertyRef> {
    properties.into_iter().map(Arc::new).collect()
}

fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

// A panicking listener must not wedge the store.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
