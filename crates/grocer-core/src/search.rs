//! # Search Module
//!
//! Keyword search over the flattened catalog.
//!
//! - Case-insensitive substring match on product name or category key
//! - Results keep catalog order
//! - An empty query matches every product
//!
//! The search is a linear scan; the catalog is small and fixed.

use crate::catalog::CatalogProvider;
use crate::notify::{SubscriptionId, Subscribers};
use crate::Product;
use serde::{Deserialize, Serialize};

/// Filter `catalog` by `query`.
///
/// The query is lowercased, then matched as a substring against the
/// lowercased product name and category id. Every string contains the empty
/// substring, so `""` returns the whole catalog.
#[must_use]
pub fn search<C: CatalogProvider + ?Sized>(catalog: &C, query: &str) -> Vec<Product> {
    let needle = query.to_lowercase();
    catalog
        .products()
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.category.as_str().to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

// =============================================================================
// STATE
// =============================================================================

/// The current query and its results.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchState {
    /// The query exactly as entered.
    pub query: String,
    /// Matching products in catalog order.
    pub results: Vec<Product>,
}

// =============================================================================
// STORE
// =============================================================================

/// Search state plus change notification.
///
/// Starts with an empty query and no results; nothing is searched until
/// `set_query` is called.
#[derive(Debug, Default)]
pub struct SearchStore {
    state: SearchState,
    subscribers: Subscribers<SearchState>,
}

impl SearchStore {
    /// Create an idle search store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Store `query` and recompute the results against `catalog`.
    pub fn set_query<C: CatalogProvider + ?Sized>(
        &mut self,
        catalog: &C,
        query: &str,
    ) -> &SearchState {
        self.state = SearchState {
            query: query.to_string(),
            results: search(catalog, query),
        };
        self.subscribers.notify(&self.state);
        &self.state
    }

    /// Register a listener called after every query change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&SearchState) + Send + Sync + 'static,
    {
        self.subscribers.subscribe(listener)
    }

    /// Remove a listener.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }
}

// =============================================================================
// TESTS
// =============================================================================
