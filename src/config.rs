use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::app_dirs::AppDirs;
use crate::error::{ConfigError, SettingsError};
use crate::exercise::Exercise;
use crate::session::{validate_confidence, validate_target_reps, DEFAULT_CONFIDENCE};

/// Sidebar slider bounds and steps
pub const MIN_TARGET_REPS: u32 = 5;
pub const MAX_TARGET_REPS: u32 = 30;
pub const TARGET_REPS_STEP: u32 = 5;
pub const CONFIDENCE_STEP: f64 = 0.1;

/// Accepted range for the simulated rep period, in seconds
pub const MIN_SIMULATE_EVERY_SECS: f64 = 0.1;
pub const MAX_SIMULATE_EVERY_SECS: f64 = 3600.0;

/// Persisted defaults for the sidebar
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub exercise: Exercise,
    pub target_reps: u32,
    pub detection_confidence: f64,
    pub show_coordinates: bool,
    pub simulate_every_secs: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exercise: Exercise::default(),
            target_reps: crate::session::DEFAULT_TARGET_REPS,
            detection_confidence: DEFAULT_CONFIDENCE,
            show_coordinates: true,
            simulate_every_secs: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_target_reps(self.target_reps)?;
        validate_confidence(self.detection_confidence)?;
        if let Some(secs) = self.simulate_every_secs {
            validate_simulate_every(secs)?;
        }
        Ok(())
    }
}

pub fn validate_simulate_every(secs: f64) -> Result<f64, SettingsError> {
    if secs.is_finite() && (MIN_SIMULATE_EVERY_SECS..=MAX_SIMULATE_EVERY_SECS).contains(&secs) {
        Ok(secs)
    } else {
        Err(SettingsError::InvalidSimulateEvery(secs))
    }
}

/// Next target on the sidebar slider: multiples of 5 within 5..=30
pub fn step_target_reps(current: u32, up: bool) -> u32 {
    let snapped = (current / TARGET_REPS_STEP) * TARGET_REPS_STEP;
    let next = if up {
        snapped + TARGET_REPS_STEP
    } else if snapped == current {
        snapped.saturating_sub(TARGET_REPS_STEP)
    } else {
        snapped
    };
    next.clamp(MIN_TARGET_REPS, MAX_TARGET_REPS)
}

/// Next confidence on the sidebar slider: 0.1 steps within 0.5..=0.9
pub fn step_confidence(current: f64, up: bool) -> f64 {
    let tenths = (current * 10.0).round() as i64;
    let next = if up { tenths + 1 } else { tenths - 1 };
    (next.clamp(5, 9) as f64) / 10.0
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<(), ConfigError>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    /// Missing, unreadable, or invalid files fall back to defaults
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "no config file, using defaults");
                return Config::default();
            }
        };

        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => match cfg.validate() {
                Ok(()) => cfg,
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "config out of range, using defaults");
                    Config::default()
                }
            },
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "config unreadable, using defaults");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<(), ConfigError> {
        cfg.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
