use std::time::Duration;

use anyhow::Context;
use relic_config::{RegistryConfig, RelicConfig};
use relic_registry::Endpoints;

use crate::cli::Cli;

/// Load layered configuration, then apply command-line flags on top.
pub fn load_config(cli: &Cli) -> anyhow::Result<RelicConfig> {
    let mut config = RelicConfig::load_with_dotenv().context("failed to load configuration")?;
    cli.apply_to(&mut config);
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

pub fn endpoints(registry: &RegistryConfig) -> Endpoints {
    Endpoints {
        top_url: registry.top_url.clone(),
        pypi_url: registry.pypi_url.clone(),
        github_url: registry.github_url.clone(),
        user_agent: registry.user_agent.clone(),
        timeout: Duration::from_secs(registry.timeout_secs),
    }
}
