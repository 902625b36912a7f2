// Route exports
pub mod events;
pub mod recommendations;
pub mod vendors;

use std::sync::Arc;

use actix_web::web;

use crate::core::Recommender;
use crate::services::PostgresClient;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub recommender: Recommender,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(recommendations::configure)
            .configure(events::configure)
            .configure(vendors::configure),
    );
}
