use anyhow::Context;

use super::load_config;
use crate::api::payload::RegisterPayload;
use crate::auth::accounts::create_account;
use crate::database::{DatabaseManager, PgStore, Store};
use crate::validation::Validate;

/// Same checks and hashing as `POST /api/register`, without the HTTP hop
pub async fn create(email: String, name: String, password: String) -> anyhow::Result<()> {
    let config = load_config()?;

    let registration = RegisterPayload {
        email: Some(email),
        name: Some(name),
        password: Some(password),
    }
    .validate()
    .map_err(|e| anyhow::anyhow!("{}", e))?;

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    let store = PgStore::new(pool);

    let result = create_account(&store, &config.security, registration).await;
    store.close().await;

    let user = result.context("failed to create admin account")?;
    println!("Created admin {} <{}> ({})", user.name, user.email, user.id);
    Ok(())
}
