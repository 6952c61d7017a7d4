use std::path::Path;
use std::sync::Arc;

use crate::conf::settings;
use crate::pkg::internal::{events::EventBus, store::LocalStore};
use crate::prelude::Result;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<LocalStore>,
    pub events: Arc<EventBus>,
}

impl AppState {
    pub fn new() -> Result<AppState> {
        AppState::open(&settings.storage_dir)
    }

    pub fn open(dir: impl AsRef<Path>) -> Result<AppState> {
        Ok(AppState {
            store: Arc::new(LocalStore::open(dir)?),
            events: Arc::new(EventBus::new()),
        })
    }
}
