use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection};

use super::registry::{DbProvider, DbProviderId, connect_pool};
use crate::config::DatabaseConfig;

pub struct MySqlDbProvider;

#[async_trait]
impl DbProvider for MySqlDbProvider {
    fn id(&self) -> DbProviderId {
        DbProviderId::MySql
    }

    fn supports_url(&self, url: &str) -> bool {
        url.trim().to_ascii_lowercase().starts_with("mysql://")
    }

    async fn connect(&self, cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
        connect_pool(cfg).await
    }

    async fn post_connect(&self, db: &DatabaseConnection, _cfg: &DatabaseConfig) -> Result<()> {
        // Names and crop labels may be non-ASCII.
        db.execute_unprepared("SET NAMES utf8mb4").await?;
        Ok(())
    }
}
