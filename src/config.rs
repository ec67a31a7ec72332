//! Configuration management
//!
//! Screen geometry, smoothing, scroll step and detector settings. Everything
//! has a default, so an empty JSON object is a valid config file.

use crate::error::{GestureError, GestureResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub screen: ScreenConfig,
    pub pointer: PointerConfig,
    pub scroll: ScrollConfig,
    pub detector: DetectorConfig,
    pub pipeline: PipelineConfig,
}

/// Target screen size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScreenConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Pointer smoothing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PointerConfig {
    /// Smoothing divisor `k`. 1 tracks the hand exactly; larger values lag more.
    pub smoothing: f64,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self { smoothing: 3.0 }
    }
}

/// Scroll step emitted per scroll command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollConfig {
    pub amount: i32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self { amount: 40 }
    }
}

/// Settings handed to the hand detector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetectorConfig {
    pub max_hands: usize,
    /// Score a hand needs to be picked up when none was seen on the previous frame
    pub min_detection_confidence: f64,
    /// Lower bar for a hand that was present on the previous frame
    pub min_tracking_confidence: f64,
    /// Flip landmarks horizontally for sources that are not already mirrored
    pub mirror: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            max_hands: 1,
            min_detection_confidence: 0.8,
            min_tracking_confidence: 0.8,
            mirror: false,
        }
    }
}

/// Frame loop settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PipelineConfig {
    /// Capacity of the bounded queue between detector and engine
    pub queue_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { queue_capacity: 4 }
    }
}

impl Config {
    /// Returns the first out-of-range field, if any.
    pub fn validate(&self) -> GestureResult<()> {
        if self.screen.width == 0 || self.screen.height == 0 {
            return Err(GestureError::Config(format!(
                "screen size must be non-zero, got {}x{}",
                self.screen.width, self.screen.height
            )));
        }
        if !self.pointer.smoothing.is_finite() || self.pointer.smoothing < 1.0 {
            return Err(GestureError::Config(format!(
                "smoothing must be >= 1, got {}",
                self.pointer.smoothing
            )));
        }
        if self.scroll.amount <= 0 {
            return Err(GestureError::Config(format!(
                "scroll amount must be > 0, got {}",
                self.scroll.amount
            )));
        }
        if self.detector.max_hands == 0 {
            return Err(GestureError::Config("max_hands must be > 0".to_string()));
        }
        for (name, value) in [
            ("min_detection_confidence", self.detector.min_detection_confidence),
            ("min_tracking_confidence", self.detector.min_tracking_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(GestureError::Config(format!(
                    "{} must be in [0, 1], got {}",
                    name, value
                )));
            }
        }
        if self.pipeline.queue_capacity == 0 {
            return Err(GestureError::Config(
                "queue_capacity must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> GestureResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> GestureResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn to_json(&self) -> GestureResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
