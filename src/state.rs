//! Shared application state for all routes.

use crate::flash::FlashStore;
use crate::store::CountryStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CountryStore>,
    /// One-shot notices shown after a redirect.
    pub flash: FlashStore,
}

impl AppState {
    pub fn new(store: Arc<dyn CountryStore>) -> Self {
        Self {
            store,
            flash: FlashStore::new(),
        }
    }
}
