//! Hand landmark capture
//!
//! Data model for per-frame hand observations and the detector boundary that
//! produces them. The pose model itself lives outside this crate; the replay
//! detector feeds recorded landmark traces through the same interface.

pub mod detector;
pub mod types;

pub use detector::{HandDetector, LandmarkTrace, ReplayDetector, TraceFrame, TraceHand};
pub use types::{
    DetectedFrame, FrameSize, HandLandmarks, HandObservation, Handedness, Landmark, LandmarkId,
    PixelPoint, LANDMARK_COUNT,
};
