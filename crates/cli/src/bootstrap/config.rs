use ferrous_lookup_domain::{CliOverrides, Config};

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides).map_err(|e| {
        // Logging is not up yet; the binary exits with this message.
        anyhow::anyhow!("Failed to load configuration: {}", e)
    })?;
    Ok(config)
}
