pub mod config;
pub mod db;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use sqlx::PgPool;

use db::stats::{PgStatsGateway, StatsGateway};

/// Shared application state passed to all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Aggregate queries for the admin dashboard.
    pub stats: Arc<dyn StatsGateway>,
    pub config: config::AppConfig,
}

impl AppState {
    /// State backed entirely by the given pool.
    pub fn new(db: PgPool, config: config::AppConfig) -> Self {
        Self {
            stats: Arc::new(PgStatsGateway::new(db.clone())),
            db,
            config,
        }
    }
}
