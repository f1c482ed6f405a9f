//! Configuration utilities for the demo driver.

use std::path::PathBuf;

use bitmask_ecs::{StorageConfig, WorldConfig};
use log::LevelFilter;
use semver::Version;

pub const APP_NAME: &str = env!("CARGO_CRATE_NAME", "binary must be compiled by Cargo");

const APP_VERSION_STR: &str = env!("CARGO_PKG_VERSION", "binary must be compiled by Cargo");
lazy_static::lazy_static! {
    pub static ref APP_VERSION: Version = APP_VERSION_STR.parse().unwrap();
}

/// This struct represents general configuration of the demo run.
#[derive(Debug, Clone)]
pub struct Config {
    name: String,
    version: Version,
    frames: u64,
    delta_time: f32,
    speed: f32,
    capacity_limit: Option<usize>,
    log_level: LevelFilter,
    log_directory: Option<PathBuf>,
}

impl Config {
    /// Creates new configuration with given name and version, other values are defaults.
    pub fn new(name: String, version: Version) -> Self {
        Self {
            name,
            version,
            frames: 180,
            delta_time: 1.0 / 60.0,
            speed: 100.0,
            capacity_limit: None,
            log_level: if cfg!(debug_assertions) {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            },
            log_directory: Some(PathBuf::from("logs")),
        }
    }

    pub fn with_frames(mut self, frames: u64) -> Self {
        self.frames = frames;
        self
    }

    /// Limits count of components of each type; storages grow without bound if `None`.
    pub fn with_capacity_limit(mut self, capacity_limit: Option<usize>) -> Self {
        self.capacity_limit = capacity_limit;
        self
    }

    /// Name of the run.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Semver version of the run.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Count of frames to process before exit.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Fixed time step of each frame in seconds.
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Horizontal speed applied while movement key is held.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    /// Directory of log files. Logs go to console only if `None`.
    pub fn log_directory(&self) -> Option<&PathBuf> {
        self.log_directory.as_ref()
    }

    /// Configuration of ECS world driven by the demo.
    pub fn world_config(&self) -> WorldConfig {
        let storage = StorageConfig::default().with_capacity_limit(self.capacity_limit);
        WorldConfig::default().with_storage(storage)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(APP_NAME.to_string(), APP_VERSION.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = Config::default();
        assert_eq!(config.name(), "bitmask_demo");
        assert_eq!(config.version(), &*APP_VERSION);
        assert_eq!(config.frames(), 180);
        assert_eq!(config.world_config(), WorldConfig::default());
    }

    #[test]
    fn test_world_config() {
        let config = Config::default().with_capacity_limit(Some(10));
        assert_eq!(config.world_config().storage.capacity_limit, Some(10));

        let config = config.with_capacity_limit(None);
        assert_eq!(config.world_config(), WorldConfig::default());
    }
}
