//! Simulation settings
//!
//! Defaults come from [`crate::consts`]. Web builds read
//! overrides from LocalStorage; the native runner reads a JSON file.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Bounds;

/// Reasons a settings value cannot drive a simulation
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    Parse(String),
    Io { path: String, message: String },
    TooManyBalls { count: u32, max: u32 },
    NonPositiveRadius { radius: f32 },
    RadiusRange { min: i32, max: i32 },
    NegativeSpeed { speed: i32 },
    BallTooLarge { radius: i32, width: f32, height: f32 },
    HunterTooLarge { radius: f32, width: f32, height: f32 },
    InvalidStep { step: f32 },
    FadeAlphaRange { alpha: f32 },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid settings json: {msg}"),
            Self::Io { path, message } => write!(f, "cannot read settings {path}: {message}"),
            Self::TooManyBalls { count, max } => {
                write!(f, "ball count {count} exceeds the limit of {max}")
            }
            Self::NonPositiveRadius { radius } => {
                write!(f, "radius must be positive, got {radius}")
            }
            Self::RadiusRange { min, max } => {
                write!(f, "ball radius range is empty: min {min} > max {max}")
            }
            Self::NegativeSpeed { speed } => {
                write!(f, "ball speed limit must be >= 0, got {speed}")
            }
            Self::BallTooLarge {
                radius,
                width,
                height,
            } => write!(
                f,
                "ball radius {radius} does not fit a {width}x{height} canvas"
            ),
            Self::HunterTooLarge {
                radius,
                width,
                height,
            } => write!(
                f,
                "hunter radius {radius} does not fit a {width}x{height} canvas"
            ),
            Self::InvalidStep { step } => write!(f, "hunter step must be finite, got {step}"),
            Self::FadeAlphaRange { alpha } => {
                write!(f, "fade alpha must be within [0, 1], got {alpha}")
            }
        }
    }
}

impl std::error::Error for SettingsError {}

/// Tuning for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Balls ===
    /// Balls spawned at startup
    pub ball_count: u32,
    pub ball_radius_min: i32,
    pub ball_radius_max: i32,
    /// Velocity components are drawn from [-max, max]
    pub ball_speed_max: i32,

    // === Hunter ===
    pub hunter_radius: f32,
    /// Distance moved per key press
    pub hunter_step: f32,
    pub hunter_line_width: f32,

    // === Rendering ===
    /// Opacity of the per-frame black overlay
    pub fade_alpha: f32,

    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ball_count: BALL_COUNT,
            ball_radius_min: BALL_RADIUS_MIN,
            ball_radius_max: BALL_RADIUS_MAX,
            ball_speed_max: BALL_SPEED_MAX,

            hunter_radius: HUNTER_RADIUS,
            hunter_step: HUNTER_STEP,
            hunter_line_width: HUNTER_LINE_WIDTH,

            fade_alpha: FADE_ALPHA,

            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        serde_json::from_str(json).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Check that every spawn range is non-empty for a canvas of this size
    pub fn validate(&self, bounds: Bounds) -> Result<(), SettingsError> {
        if self.ball_count > MAX_BALL_COUNT {
            return Err(SettingsError::TooManyBalls {
                count: self.ball_count,
                max: MAX_BALL_COUNT,
            });
        }
        if self.ball_radius_min <= 0 {
            return Err(SettingsError::NonPositiveRadius {
                radius: self.ball_radius_min as f32,
            });
        }
        if self.ball_radius_min > self.ball_radius_max {
            return Err(SettingsError::RadiusRange {
                min: self.ball_radius_min,
                max: self.ball_radius_max,
            });
        }
        if self.ball_speed_max < 0 {
            return Err(SettingsError::NegativeSpeed {
                speed: self.ball_speed_max,
            });
        }
        let diameter = self.ball_radius_max as f32 * 2.0;
        if diameter > bounds.width || diameter > bounds.height {
            return Err(SettingsError::BallTooLarge {
                radius: self.ball_radius_max,
                width: bounds.width,
                height: bounds.height,
            });
        }

        if !(self.hunter_radius > 0.0) {
            return Err(SettingsError::NonPositiveRadius {
                radius: self.hunter_radius,
            });
        }
        let diameter = self.hunter_radius * 2.0;
        if diameter >= bounds.width || diameter >= bounds.height {
            return Err(SettingsError::HunterTooLarge {
                radius: self.hunter_radius,
                width: bounds.width,
                height: bounds.height,
            });
        }
        if !self.hunter_step.is_finite() {
            return Err(SettingsError::InvalidStep {
                step: self.hunter_step,
            });
        }

        if !(0.0..=1.0).contains(&self.fade_alpha) {
            return Err(SettingsError::FadeAlphaRange {
                alpha: self.fade_alpha,
            });
        }
        Ok(())
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "ball_hunt_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Read settings from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|e| SettingsError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
