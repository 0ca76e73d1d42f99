use anyhow::Context;

use super::load_config;
use crate::database::DatabaseManager;

pub async fn handle() -> anyhow::Result<()> {
    let config = load_config()?;
    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    DatabaseManager::migrate(&pool).await.context("migration failed")?;
    DatabaseManager::close(&pool).await;
    Ok(())
}
