pub mod admin;
pub mod migrate;
pub mod serve;

use anyhow::Context;

use crate::config::AppConfig;

/// Environment config, refusing settings that must never reach a running server
pub(crate) fn load_config() -> anyhow::Result<AppConfig> {
    let config = AppConfig::from_env();
    config.validate().context("invalid configuration")?;
    Ok(config)
}
