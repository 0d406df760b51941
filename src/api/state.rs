//! Application state for the scheduling API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::store::ScheduleStore;

/// Shared application state.
///
/// Holds the schedule store behind an `Arc`; the store does its own
/// per-business locking, so handlers never synchronize here.
#[derive(Clone)]
pub struct AppState {
    /// The schedule store.
    store: Arc<ScheduleStore>,
}

impl AppState {
    /// Creates a new application state around the given store.
    pub fn new(store: ScheduleStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Returns a reference to the schedule store.
    pub fn store(&self) -> &ScheduleStore {
        &self.store
    }
}
