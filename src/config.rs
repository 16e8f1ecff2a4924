//! Configuration parsing and management for Kagami

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, KagamiError};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub receiver: ReceiverConfig,
    pub tuning: RetargetTuning,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            receiver: ReceiverConfig::default(),
            tuning: RetargetTuning::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, KagamiError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::ReadFile(format!("{}: {}", path.as_ref().display(), e))
        })?;

        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(s: &str) -> Result<Self, KagamiError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()).into())
    }

    /// Load configuration from default paths
    pub fn load() -> Result<Self, KagamiError> {
        let paths = [
            PathBuf::from("config.toml"),
            PathBuf::from("config/default.toml"),
        ];

        for path in &paths {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), KagamiError> {
        if self.receiver.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "receiver.port".to_string(),
                message: "Port must be greater than 0".to_string(),
            }
            .into());
        }

        if self.tuning.gaze_distance <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "tuning.gaze_distance".to_string(),
                message: "Gaze distance must be positive".to_string(),
            }
            .into());
        }

        if self.tuning.blink_yaw_suppression < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "tuning.blink_yaw_suppression".to_string(),
                message: "Yaw suppression gain must be non-negative".to_string(),
            }
            .into());
        }

        if !(0.0..=4.0).contains(&self.tuning.head_sensitivity) {
            return Err(ConfigError::InvalidValue {
                field: "tuning.head_sensitivity".to_string(),
                message: "Head sensitivity must be between 0.0 and 4.0".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Solve-result receiver settings (JSON over UDP)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiverConfig {
    /// Address to listen on
    pub listen_address: String,
    /// UDP port the external solver sends packets to
    pub port: u16,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            listen_address: "127.0.0.1".to_string(),
            port: 39540,
        }
    }
}

/// Retargeting tuning parameters.
///
/// The per-bone damping table is a design-time constant (see
/// `retarget::tables`); only the knobs that are genuinely tunable live here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetargetTuning {
    /// Overall head rotation multiplier
    #[serde(default = "default_1_0")]
    pub head_sensitivity: f32,

    /// Forward distance of the projected look-at point (meters)
    #[serde(default = "default_gaze_distance")]
    pub gaze_distance: f32,

    /// Head height used to anchor the look-at point (meters)
    #[serde(default = "default_head_height")]
    pub head_height: f32,

    /// Gain for suppressing asymmetric blink signal under head yaw.
    /// Larger values distrust winks sooner as the head turns.
    #[serde(default = "default_blink_yaw_suppression")]
    pub blink_yaw_suppression: f32,
}

fn default_1_0() -> f32 {
    1.0
}

fn default_gaze_distance() -> f32 {
    5.0
}

fn default_head_height() -> f32 {
    1.6
}

fn default_blink_yaw_suppression() -> f32 {
    2.0
}

impl Default for RetargetTuning {
    fn default() -> Self {
        Self {
            head_sensitivity: default_1_0(),
            gaze_distance: default_gaze_distance(),
            head_height: default_head_height(),
            blink_yaw_suppression: default_blink_yaw_suppression(),
        }
    }
}
