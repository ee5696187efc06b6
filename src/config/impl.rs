use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::StaticConfig;
use crate::errors::{LiveLogError, Result};

static CONFIG: OnceLock<ArcSwap<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Returns an Arc pointer to the configuration, which is cheap to clone
/// and doesn't hold any locks.
pub fn get_config() -> Result<Arc<StaticConfig>> {
    CONFIG
        .get()
        .map(|c| c.load_full())
        .ok_or_else(|| LiveLogError::config("Config not initialized. Call init_config() first."))
}

/// Initialize the global configuration
///
/// Loads `path` (or `livelog.toml`) plus `LIVELOG__*` environment overrides.
/// A second call is a no-op and returns the already loaded configuration.
pub fn init_config(path: Option<&str>) -> Result<Arc<StaticConfig>> {
    if let Some(existing) = CONFIG.get() {
        return Ok(existing.load_full());
    }
    let loaded = StaticConfig::load(path)?;
    let cell = CONFIG.get_or_init(|| ArcSwap::from_pointee(loaded));
    Ok(cell.load_full())
}

/// Replace the global configuration (tests and `--admin` style overrides)
pub fn replace_config(config: StaticConfig) -> Result<()> {
    config.validate()?;
    match CONFIG.get() {
        Some(cell) => cell.store(Arc::new(config)),
        None => {
            let _ = CONFIG.set(ArcSwap::from_pointee(config));
        }
    }
    Ok(())
}
