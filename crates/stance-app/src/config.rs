//! Application configuration.

use serde::{Deserialize, Serialize};
use stance_core::{Error, Result, TrackingMode};
use stance_eval::PoseThresholds;
use stance_render::RenderConfig;
use std::path::{Path, PathBuf};

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StanceConfig {
    /// Skeleton source configuration
    pub sensor: SensorConfig,

    /// Reference pose tolerances
    pub thresholds: PoseThresholds,

    /// Overlay surface and stroke sizes
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Seated or standing skeleton tracking
    pub tracking_mode: TrackingMode,

    /// Recorded skeleton frames, one JSON object per line
    pub replay_path: PathBuf,

    /// Frames buffered between the source and the pipeline
    pub frame_queue_size: usize,

    /// Delay between replayed frames (milliseconds); 0 replays unpaced
    pub frame_interval_ms: u64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            tracking_mode: TrackingMode::Standing,
            replay_path: PathBuf::from("recordings/session.jsonl"),
            frame_queue_size: 30,
            frame_interval_ms: 33,
        }
    }
}

impl StanceConfig {
    /// Load configuration from file, with `STANCE_` environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> std::result::Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }

    /// Load from environment variables
    pub fn from_env() -> std::result::Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }

    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;
        self.render
            .validate()
            .map_err(|e| Error::Config(e.to_string()))?;

        if self.sensor.frame_queue_size == 0 {
            return Err(Error::Config("sensor.frame_queue_size must be at least 1".into()));
        }

        Ok(())
    }
}

/// `STANCE_` prefix, `__` between nested keys
fn environment() -> config::Environment {
    config::Environment::with_prefix("STANCE")
        .prefix_separator("_")
        .separator("__")
}
