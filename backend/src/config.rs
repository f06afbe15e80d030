//! Configuration loading for the sente tracker backend.

use anyhow::Result;
use log::info;
use shared::TrackerConfig;
use std::fs;
use std::path::Path;

/// Load tracker configuration from a YAML file.
///
/// A missing file is not an error: defaults apply. Fields absent from the
/// file also fall back to their defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TrackerConfig> {
    let path = path.as_ref();

    if !path.exists() {
        info!(
            "No config file at {}, using default configuration",
            path.display()
        );
        return Ok(TrackerConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: TrackerConfig = serde_yaml::from_str(&contents)?;
    info!("Loaded configuration from {}", path.display());
    Ok(config)
}
