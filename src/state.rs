use std::sync::Arc;

use crate::database::DocumentStore;

/// Estado compartilhado entre os workers do actix.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, bcrypt_cost: u32) -> Self {
        Self { store, bcrypt_cost }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }
}
