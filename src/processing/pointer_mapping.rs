//! Hand position to screen pointer mapping
//!
//! Maps the palm reference point from frame pixels onto the screen and
//! applies exponential smoothing so detector jitter does not shake the
//! pointer. The mapper keeps the last smoothed position between frames.

use crate::capture::hand::{FrameSize, PixelPoint};
use crate::config::ScreenConfig;
use serde::{Deserialize, Serialize};

/// Default smoothing divisor
pub const DEFAULT_SMOOTHING: f64 = 3.0;

/// Position in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Nearest whole pixel
    pub fn rounded(&self) -> (i32, i32) {
        (self.x.round() as i32, self.y.round() as i32)
    }
}

/// Linear interpolation of `value` from `[0, from]` onto `[0, to]`, clamped to the ends
pub fn interpolate(value: f64, from: f64, to: f64) -> f64 {
    if from <= 0.0 {
        return 0.0;
    }
    (value / from).clamp(0.0, 1.0) * to
}

/// Maps frame pixel positions to smoothed screen positions
#[derive(Debug, Clone)]
pub struct PointerMapper {
    screen: ScreenConfig,
    smoothing: f64,
    previous: ScreenPoint,
}

impl PointerMapper {
    /// Create a mapper whose smoothed position starts at the screen origin
    pub fn new(screen: ScreenConfig, smoothing: f64) -> Self {
        Self {
            screen,
            smoothing: smoothing.max(1.0),
            previous: ScreenPoint::default(),
        }
    }

    /// Last emitted smoothed position
    pub fn position(&self) -> ScreenPoint {
        self.previous
    }

    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    /// Screen position the hand points at, before smoothing
    pub fn target(&self, hand: PixelPoint, frame: FrameSize) -> ScreenPoint {
        ScreenPoint {
            x: interpolate(hand.x as f64, frame.width as f64, self.screen.width as f64),
            y: interpolate(hand.y as f64, frame.height as f64, self.screen.height as f64),
        }
    }

    /// Advance one frame toward the hand position and return the new smoothed point
    pub fn update(&mut self, hand: PixelPoint, frame: FrameSize) -> ScreenPoint {
        let target = self.target(hand, frame);
        let smoothed = ScreenPoint {
            x: self.previous.x + (target.x - self.previous.x) / self.smoothing,
            y: self.previous.y + (target.y - self.previous.y) / self.smoothing,
        };
        self.previous = smoothed;
        smoothed
    }
}
