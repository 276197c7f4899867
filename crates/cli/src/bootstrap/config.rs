use ferrous_failover_domain::{CliOverrides, Config};

/// Loads and validates the configuration. Nothing is processed when this
/// fails.
pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}
