pub mod adapters;
pub mod config;
pub mod domain;
pub mod infra;
pub mod services;

use {services::ingestor::EventIngestor, std::sync::Arc};

#[derive(Clone)]
pub struct AppState {
    pub ingestor: Arc<EventIngestor>,
}
