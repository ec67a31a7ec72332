use crate::capture::hand::types::{
    DetectedFrame, FrameSize, HandLandmarks, HandObservation, Handedness, Landmark,
};
use crate::config::DetectorConfig;
use crate::error::{GestureError, GestureResult};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::Path;

/// Source of per-frame hand observations.
///
/// Implementations wrap a camera plus pose model, or a recorded trace.
/// `Ok(None)` means the stream has ended.
pub trait HandDetector: Send {
    fn detect(&mut self) -> GestureResult<Option<DetectedFrame>>;
}

/// Hand entry as stored in a trace file. Landmark count is checked on replay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceHand {
    #[serde(default)]
    pub handedness: Handedness,
    #[serde(default = "default_score")]
    pub score: f64,
    pub landmarks: Vec<Landmark>,
}

fn default_score() -> f64 {
    1.0
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceFrame {
    #[serde(default)]
    pub hands: Vec<TraceHand>,
}

/// Recorded landmark stream
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandmarkTrace {
    pub frame_width: u32,
    pub frame_height: u32,
    pub frames: Vec<TraceFrame>,
}

impl LandmarkTrace {
    pub fn load(path: &Path) -> GestureResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let trace: Self = serde_json::from_str(&content)?;
        if trace.frame_width == 0 || trace.frame_height == 0 {
            return Err(GestureError::InvalidFrame(format!(
                "trace frame size must be non-zero, got {}x{}",
                trace.frame_width, trace.frame_height
            )));
        }
        Ok(trace)
    }
}

/// Replays a recorded trace as if it came from a live detector
pub struct ReplayDetector {
    size: FrameSize,
    frames: VecDeque<TraceFrame>,
    config: DetectorConfig,
    sequence: u64,
    tracking: bool,
}

impl ReplayDetector {
    pub fn new(trace: LandmarkTrace, config: DetectorConfig) -> Self {
        Self {
            size: FrameSize::new(trace.frame_width, trace.frame_height),
            frames: trace.frames.into(),
            config,
            sequence: 0,
            tracking: false,
        }
    }

    pub fn from_file(path: &Path, config: DetectorConfig) -> GestureResult<Self> {
        let trace = LandmarkTrace::load(path)?;
        tracing::info!(
            "Loaded landmark trace {} ({} frames, {}x{})",
            path.display(),
            trace.frames.len(),
            trace.frame_width,
            trace.frame_height
        );
        Ok(Self::new(trace, config))
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    /// Confidence a hand must reach. A hand seen on the previous frame is
    /// being tracked and only has to clear the tracking threshold.
    fn min_confidence(&self) -> f64 {
        if self.tracking {
            self.config.min_tracking_confidence
        } else {
            self.config.min_detection_confidence
        }
    }

    /// Only the first kept hand must be well formed; a malformed extra hand
    /// is dropped so it cannot cost the frame its primary hand.
    fn convert(&self, hands: Vec<TraceHand>) -> GestureResult<Vec<HandObservation>> {
        let min_confidence = self.min_confidence();
        let mut observations = Vec::with_capacity(hands.len().min(self.config.max_hands));
        for hand in hands {
            if hand.score < min_confidence {
                tracing::trace!(
                    "Dropping hand below confidence ({:.2} < {:.2})",
                    hand.score,
                    min_confidence
                );
                continue;
            }
            if observations.len() == self.config.max_hands {
                break;
            }
            let mut landmarks = match HandLandmarks::try_from(hand.landmarks) {
                Ok(landmarks) => landmarks,
                Err(e) if observations.is_empty() => return Err(e),
                Err(e) => {
                    tracing::warn!("Dropping extra hand {}: {}", observations.len(), e);
                    continue;
                }
            };
            if self.config.mirror {
                landmarks = landmarks.mirrored();
            }
            observations.push(HandObservation {
                handedness: hand.handedness,
                score: hand.score,
                landmarks,
            });
        }
        Ok(observations)
    }
}

impl HandDetector for ReplayDetector {
    fn detect(&mut self) -> GestureResult<Option<DetectedFrame>> {
        let Some(frame) = self.frames.pop_front() else {
            return Ok(None);
        };
        let sequence = self.sequence;
        self.sequence += 1;

        let hands = self.convert(frame.hands);
        self.tracking = matches!(&hands, Ok(hands) if !hands.is_empty());
        let hands = hands?;

        Ok(Some(DetectedFrame {
            sequence,
            size: self.size,
            hands,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::hand::types::{LandmarkId, LANDMARK_COUNT};

    fn hand(score: f64, count: usize) -> TraceHand {
        TraceHand {
            handedness: Handedness::Right,
            score,
            landmarks: vec![Landmark::new(0.25, 0.5); count],
        }
    }

    fn trace(frames: Vec<TraceFrame>) -> LandmarkTrace {
        LandmarkTrace {
            frame_width: 640,
            frame_height: 480,
            frames,
        }
    }

    #[test]
    fn test_replay_yields_frames_in_order_then_ends() {
        let mut detector = ReplayDetector::new(
            trace(vec![TraceFrame::default(), TraceFrame { hands: vec![hand(0.9, LANDMARK_COUNT)] }]),
            DetectorConfig::default(),
        );

        let first = detector.detect().unwrap().unwrap();
        assert_eq!(first.sequence, 0);
        assert!(first.hands.is_empty());

        let second = detector.detect().unwrap().unwrap();
        assert_eq!(second.sequence, 1);
        assert_eq!(second.size, FrameSize::new(640, 480));
        assert_eq!(second.hands.len(), 1);

        assert!(detector.detect().unwrap().is_none());
    }

    #[test]
    fn test_low_confidence_hands_are_dropped() {
        let mut detector = ReplayDetector::new(
            trace(vec![TraceFrame { hands: vec![hand(0.5, LANDMARK_COUNT)] }]),
            DetectorConfig::default(),
        );
        let frame = detector.detect().unwrap().unwrap();
        assert!(frame.hands.is_empty());
    }

    #[test]
    fn test_max_hands_limits_observations() {
        let mut detector = ReplayDetector::new(
            trace(vec![TraceFrame {
                hands: vec![hand(0.9, LANDMARK_COUNT), hand(0.95, LANDMARK_COUNT)],
            }]),
            DetectorConfig::default(),
        );
        let frame = detector.detect().unwrap().unwrap();
        assert_eq!(frame.hands.len(), 1);
        assert_eq!(frame.hands[0].score, 0.9);
    }

    #[test]
    fn test_malformed_frame_errors_but_stream_continues() {
        let mut detector = ReplayDetector::new(
            trace(vec![
                TraceFrame { hands: vec![hand(0.9, 5)] },
                TraceFrame { hands: vec![hand(0.9, LANDMARK_COUNT)] },
            ]),
            DetectorConfig::default(),
        );

        assert!(matches!(
            detector.detect(),
            Err(GestureError::MalformedLandmarks { actual: 5, .. })
        ));
        let next = detector.detect().unwrap().unwrap();
        assert_eq!(next.sequence, 1);
        assert_eq!(next.hands.len(), 1);
    }

    #[test]
    fn test_malformed_extra_hand_keeps_first_hand() {
        let config = DetectorConfig {
            max_hands: 2,
            ..DetectorConfig::default()
        };
        let mut detector = ReplayDetector::new(
            trace(vec![TraceFrame {
                hands: vec![hand(0.9, LANDMARK_COUNT), hand(0.9, 3)],
            }]),
            config,
        );

        let frame = detector.detect().unwrap().unwrap();
        assert_eq!(frame.hands.len(), 1);
        assert_eq!(frame.hands[0].score, 0.9);
    }

    #[test]
    fn test_malformed_first_hand_fails_frame_with_two_hands_allowed() {
        let config = DetectorConfig {
            max_hands: 2,
            ..DetectorConfig::default()
        };
        let mut detector = ReplayDetector::new(
            trace(vec![TraceFrame {
                hands: vec![hand(0.9, 3), hand(0.9, LANDMARK_COUNT)],
            }]),
            config,
        );

        assert!(matches!(
            detector.detect(),
            Err(GestureError::MalformedLandmarks { actual: 3, .. })
        ));
    }

    #[test]
    fn test_tracked_hand_uses_tracking_confidence() {
        let config = DetectorConfig {
            min_detection_confidence: 0.8,
            min_tracking_confidence: 0.5,
            ..DetectorConfig::default()
        };
        let mut detector = ReplayDetector::new(
            trace(vec![
                TraceFrame { hands: vec![hand(0.6, LANDMARK_COUNT)] },
                TraceFrame { hands: vec![hand(0.9, LANDMARK_COUNT)] },
                TraceFrame { hands: vec![hand(0.6, LANDMARK_COUNT)] },
                TraceFrame::default(),
                TraceFrame { hands: vec![hand(0.6, LANDMARK_COUNT)] },
            ]),
            config,
        );

        let counts: Vec<usize> = (0..5)
            .map(|_| detector.detect().unwrap().unwrap().hands.len())
            .collect();
        // Not tracked, detected, tracked, lost, not tracked again
        assert_eq!(counts, vec![0, 1, 1, 0, 0]);
    }

    #[test]
    fn test_mirror_option_flips_landmarks() {
        let config = DetectorConfig {
            mirror: true,
            ..DetectorConfig::default()
        };
        let mut detector = ReplayDetector::new(
            trace(vec![TraceFrame { hands: vec![hand(0.9, LANDMARK_COUNT)] }]),
            config,
        );
        let frame = detector.detect().unwrap().unwrap();
        let wrist = frame.hands[0].landmarks.get(LandmarkId::Wrist);
        assert!((wrist.x - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_load_trace_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        let json = serde_json::to_string(&trace(vec![TraceFrame::default()])).unwrap();
        std::fs::write(&path, json).unwrap();

        let detector = ReplayDetector::from_file(&path, DetectorConfig::default()).unwrap();
        assert_eq!(detector.remaining(), 1);
    }

    #[test]
    fn test_load_trace_rejects_zero_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        std::fs::write(&path, r#"{"frameWidth": 0, "frameHeight": 480, "frames": []}"#).unwrap();

        assert!(matches!(
            LandmarkTrace::load(&path),
            Err(GestureError::InvalidFrame(_))
        ));
    }
}
