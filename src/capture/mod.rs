//! Capture-side data
//!
//! Hand landmark observations and the detectors that produce them.

pub mod hand;

pub use hand::{DetectedFrame, HandDetector, HandObservation, ReplayDetector};
