use serde::Deserialize;
use std::collections::HashMap;

pub const DEFAULT_API_URL: &str = "https://api.newrelic.com/v2";
const CONFIG_FILE: &str = "config/provider";
const ENV_PREFIX: &str = "NEWRELIC";

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub api_url: String,
    pub timeout_seconds: u64,
    pub listen_addr: String,
}

/// Loads provider settings from `config/provider.{toml,...}` when present,
/// overridden by `NEWRELIC_*` environment variables.
pub fn load_provider_config() -> anyhow::Result<ProviderConfig> {
    build_provider_config(CONFIG_FILE, None)
}

/// `env` replaces the process environment when given.
pub fn build_provider_config(
    file: &str,
    env: Option<HashMap<String, String>>,
) -> anyhow::Result<ProviderConfig> {
    let settings = config::Config::builder()
        .set_default("api_url", DEFAULT_API_URL)?
        .set_default("timeout_seconds", 30)?
        .set_default("listen_addr", "127.0.0.1:8080")?
        .add_source(config::File::with_name(file).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .source(env),
        )
        .build()?;

    let config: ProviderConfig = settings.try_deserialize()?;
    if config.api_key.trim().is_empty() {
        anyhow::bail!("api_key must not be empty (set NEWRELIC_API_KEY)");
    }

    Ok(config)
}
