use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{auth::SessionKeys, config::AppConfig};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DatabaseConnection,
    pub sessions: SessionKeys,
}

impl AppState {
    pub fn new(config: AppConfig, db: DatabaseConnection) -> Arc<Self> {
        let sessions = SessionKeys::from_config(&config.session);
        Arc::new(Self {
            config,
            db,
            sessions,
        })
    }
}
