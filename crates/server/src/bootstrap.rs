use anyhow::{Context, Result};
use menufit_catalog::load_or_fallback;
use menufit_engine::{EngineConfig, EngineState};
use std::path::{Path, PathBuf};

/// Where the catalog and engine settings come from
#[derive(Debug, Clone, Default)]
pub struct DataSources {
    pub menus: Option<PathBuf>,
    pub restaurants: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Engine settings from a TOML file, or the defaults when no file is given
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let config = EngineConfig::from_toml_file(path)
        .with_context(|| format!("Invalid engine config {}", path.display()))?;
    log::info!("Loaded engine config from {}", path.display());
    Ok(config)
}

/// Load the catalog and build the engine once for the process lifetime
///
/// A bad config file is fatal. A bad catalog falls back to the built-in
/// dataset, and a failed feature build leaves the state unavailable.
pub fn build_state(sources: &DataSources) -> Result<EngineState> {
    let config = load_config(sources.config.as_deref())?;
    let catalog = load_or_fallback(sources.menus.as_deref(), sources.restaurants.as_deref());
    Ok(EngineState::initialize(catalog, config))
}
