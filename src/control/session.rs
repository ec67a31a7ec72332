//! Gesture session
//!
//! Owns the state that survives between frames (smoothed pointer position
//! and action latches) and runs classify, map and decide for one frame at a
//! time. Frames must be fed in capture order.

use crate::capture::hand::{DetectedFrame, LandmarkId};
use crate::config::Config;
use crate::processing::{
    classify_fingers, ActionCommand, ActionLatches, FingerState, GestureEngine, GestureInput,
    PointerMapper, ScreenPoint,
};
use serde::{Deserialize, Serialize};

/// What the session saw and decided for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameOutcome {
    pub sequence: u64,
    /// `None` when no hand was detected
    pub fingers: Option<FingerState>,
    pub pointer: Option<ScreenPoint>,
    pub command: ActionCommand,
}

impl FrameOutcome {
    pub fn hand_detected(&self) -> bool {
        self.fingers.is_some()
    }
}

pub struct GestureSession {
    mapper: PointerMapper,
    engine: GestureEngine,
    frames: u64,
}

impl GestureSession {
    pub fn new(config: &Config) -> Self {
        Self {
            mapper: PointerMapper::new(config.screen, config.pointer.smoothing),
            engine: GestureEngine::new(),
            frames: 0,
        }
    }

    /// Process one detected frame.
    ///
    /// Only the first hand is used. Without a hand the pointer state is left
    /// untouched so tracking resumes without a jump.
    pub fn process_frame(&mut self, frame: &DetectedFrame) -> FrameOutcome {
        self.frames += 1;

        let Some(hand) = frame.hands.first() else {
            return FrameOutcome {
                sequence: frame.sequence,
                fingers: None,
                pointer: None,
                command: ActionCommand::None,
            };
        };
        if frame.hands.len() > 1 {
            tracing::trace!(
                "Frame {}: ignoring {} extra hands",
                frame.sequence,
                frame.hands.len() - 1
            );
        }

        let fingers = classify_fingers(&hand.landmarks, frame.size);
        let reference = hand.landmarks.pixel(LandmarkId::REFERENCE, frame.size);
        let pointer = self.mapper.update(reference, frame.size);

        tracing::debug!(
            "Frame {}: fingers {} ({} open), pointer ({:.0}, {:.0})",
            frame.sequence,
            fingers,
            fingers.open_count(),
            pointer.x,
            pointer.y
        );

        let command = self.engine.decide(&GestureInput {
            fingers,
            pointer,
            reference_y: reference.y,
            frame_height: frame.size.height,
        });

        FrameOutcome {
            sequence: frame.sequence,
            fingers: Some(fingers),
            pointer: Some(pointer),
            command,
        }
    }

    pub fn pointer(&self) -> ScreenPoint {
        self.mapper.position()
    }

    pub fn latches(&self) -> ActionLatches {
        self.engine.latches()
    }

    /// Frames processed so far, with or without a hand
    pub fn frames_processed(&self) -> u64 {
        self.frames
    }
}
