// scene_core/src/storage/host_config.rs
use crate::constants::*;
use crate::*;
use ron::ser::{PrettyConfig, to_string_pretty};
use serde::{Deserialize, Serialize};
use directories_next::ProjectDirs;
use once_cell::sync::Lazy;
use thiserror::Error;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::fs;

pub static HOST_CONFIG: Lazy<RwLock<HostConfig>> = Lazy::new(|| RwLock::new(load_config()));

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("config serialize: {0}")]
    Serialize(#[from] ron::Error),
    #[error("config lock poisoned")]
    Poisoned,
}

/// Settings for the headless host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// `flexi_logger` spec string, e.g. `"info"` or `"scene_core=debug"`.
    pub log_level: String,
    pub log_to_file: bool,
    /// Overrides `<app dir>/logs`.
    pub log_dir: Option<PathBuf>,
    /// Directory the io interface maps `file_url` onto. Overrides `<app dir>/data`.
    pub data_root: Option<PathBuf>,
    pub file_url: String,
    /// Name of the tree root node and its element.
    pub root_name: String,
    pub physics_ticks_per_second: u32,
    /// Simulated time per rendered frame, in seconds.
    pub frame_delta: f64,
    /// Stop after this many frames. `None` runs until a script calls `engine.quit()`.
    pub max_frames: Option<u64>,
    /// Sleep between frames instead of running as fast as possible.
    pub realtime: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: true,
            log_dir: None,
            data_root: None,
            file_url: DEFAULT_FILE_URL.to_string(),
            root_name: DEFAULT_ROOT_NAME.to_string(),
            physics_ticks_per_second: DEFAULT_PHYSICS_TICKS,
            frame_delta: DEFAULT_FRAME_DELTA,
            max_frames: Some(600),
            realtime: false,
        }
    }
}

impl HostConfig {
    /// Reads a config from a .ron file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let txt = fs::read_to_string(path)?;
        Ok(ron::from_str(&txt)?)
    }

    /// Writes the config as pretty .ron, creating parent folders.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let ron = to_string_pretty(self, PrettyConfig::default())?;
        fs::write(path, ron)?;
        Ok(())
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| app_dir().join("logs"))
    }

    pub fn data_root(&self) -> PathBuf {
        self.data_root.clone().unwrap_or_else(|| app_dir().join("data"))
    }

    /// Fixed physics step derived from the tick rate.
    pub fn physics_delta(&self) -> f64 {
        1.0 / f64::from(self.physics_ticks_per_second.max(1))
    }
}

/// Returns a clone of the in memory config.
pub fn get_config() -> HostConfig {
    match HOST_CONFIG.read() {
        Ok(cfg) => cfg.clone(),
        Err(e) => {
            host_error!("Could not read config: {e}.");
            HostConfig::default()
        }
    }
}

/// Replaces the in memory config.
pub fn set_config(config: HostConfig) -> Result<(), ConfigError> {
    let mut cfg = HOST_CONFIG.write().map_err(|_| ConfigError::Poisoned)?;
    *cfg = config;
    Ok(())
}

/// Saves the in memory config to the app dir.
pub fn save_config() -> Result<(), ConfigError> {
    let config = get_config();
    config.save_to(&config_path())
}

/// Returns the app dir for the program, falling back to the temp dir.
pub fn app_dir() -> PathBuf {
    if let Some(project_dir) = ProjectDirs::from("com", "scene_bridge", "host") {
        project_dir.config_dir().to_path_buf()
    }
    else {
        let fallback = std::env::temp_dir().join(LOG_BASENAME);
        host_warn!("Could not resolve app directory, using {}.", fallback.display());
        fallback
    }
}

fn config_path() -> PathBuf {
    app_dir().join(CONFIG_RON)
}

fn load_config() -> HostConfig {
    let path = config_path();
    if !path.exists() {
        return HostConfig::default();
    }

    match HostConfig::load_from(&path) {
        Ok(config) => config,
        Err(e) => {
            host_error!("Error loading config: {e}.");
            HostConfig::default()
        }
    }
}
