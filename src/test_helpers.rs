use std::sync::Arc;

use crate::{
    config::{AppConfig, DatabaseConfig, SessionConfig},
    db::connection,
    state::AppState,
};

pub const TEST_SESSION_SECRET: &str = "test-session-secret";

/// Config for tests: a private in-memory SQLite database and a fixed secret.
/// Built from defaults so stray `APP_*` variables cannot leak in.
pub fn test_config() -> AppConfig {
    AppConfig {
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            // Every pooled connection to `sqlite::memory:` is its own database.
            max_connections: 1,
            min_idle: 1,
        },
        session: SessionConfig {
            secret: TEST_SESSION_SECRET.to_string(),
            ..SessionConfig::default()
        },
        ..AppConfig::default()
    }
}

/// Application state over a freshly synced in-memory database.
pub async fn sqlite_state() -> Arc<AppState> {
    let cfg = test_config();
    let db = connection::connect(&cfg.database)
        .await
        .expect("connect to in-memory sqlite");
    AppState::new(cfg, db)
}
