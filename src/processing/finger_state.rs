//! Finger open/closed classification
//!
//! Works in pixel space so the anti-jitter margin means the same thing at
//! every landmark. The thumb is judged on the horizontal axis because the
//! camera view is mirrored; the other four fingers on the vertical axis.

use crate::capture::hand::{FrameSize, HandLandmarks, LandmarkId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pixels a fingertip must clear its reference joint by to count as open
pub const OPEN_MARGIN_PX: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    pub fn tip(self) -> LandmarkId {
        match self {
            Finger::Thumb => LandmarkId::ThumbTip,
            Finger::Index => LandmarkId::IndexTip,
            Finger::Middle => LandmarkId::MiddleTip,
            Finger::Ring => LandmarkId::RingTip,
            Finger::Pinky => LandmarkId::PinkyTip,
        }
    }

    /// Joint the tip is compared against (IP for the thumb, PIP otherwise)
    pub fn joint(self) -> LandmarkId {
        match self {
            Finger::Thumb => LandmarkId::ThumbIp,
            Finger::Index => LandmarkId::IndexPip,
            Finger::Middle => LandmarkId::MiddlePip,
            Finger::Ring => LandmarkId::RingPip,
            Finger::Pinky => LandmarkId::PinkyPip,
        }
    }
}

/// Open (`true`) or closed per finger, ordered thumb to pinky
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FingerState([bool; 5]);

impl FingerState {
    pub fn new(open: [bool; 5]) -> Self {
        Self(open)
    }

    pub fn from_open(fingers: &[Finger]) -> Self {
        let mut open = [false; 5];
        for finger in fingers {
            open[*finger as usize] = true;
        }
        Self(open)
    }

    pub fn is_open(&self, finger: Finger) -> bool {
        self.0[finger as usize]
    }

    pub fn open_count(&self) -> usize {
        self.0.iter().filter(|open| **open).count()
    }

    /// True when exactly these fingers are open and no others
    pub fn only(&self, fingers: &[Finger]) -> bool {
        *self == Self::from_open(fingers)
    }

    pub fn as_array(&self) -> [bool; 5] {
        self.0
    }
}

impl fmt::Display for FingerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits: Vec<&str> = self.0.iter().map(|open| if *open { "1" } else { "0" }).collect();
        write!(f, "[{}]", bits.join(", "))
    }
}

/// Classify each finger of one hand as open or closed
pub fn classify_fingers(hand: &HandLandmarks, frame: FrameSize) -> FingerState {
    let mut open = [false; 5];
    for finger in Finger::ALL {
        let tip = hand.pixel(finger.tip(), frame);
        let joint = hand.pixel(finger.joint(), frame);
        open[finger as usize] = match finger {
            Finger::Thumb => tip.x > joint.x + OPEN_MARGIN_PX,
            _ => tip.y < joint.y - OPEN_MARGIN_PX,
        };
    }
    FingerState(open)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::hand::{Landmark, LANDMARK_COUNT};

    const FRAME: FrameSize = FrameSize {
        width: 1000,
        height: 1000,
    };

    /// Every point at the frame centre: all fingers closed
    fn neutral() -> [Landmark; LANDMARK_COUNT] {
        [Landmark::new(0.5, 0.5); LANDMARK_COUNT]
    }

    fn set(points: &mut [Landmark; LANDMARK_COUNT], id: LandmarkId, x: f64, y: f64) {
        points[id.index()] = Landmark::new(x, y);
    }

    #[test]
    fn test_neutral_hand_is_closed() {
        let state = classify_fingers(&HandLandmarks::new(neutral()), FRAME);
        assert_eq!(state, FingerState::default());
        assert_eq!(state.open_count(), 0);
    }

    #[test]
    fn test_thumb_margin_boundary() {
        // 1000 px wide: 0.001 per pixel. IP at x=500.
        let mut points = neutral();
        set(&mut points, LandmarkId::ThumbIp, 0.5, 0.5);

        set(&mut points, LandmarkId::ThumbTip, 0.510, 0.5);
        let at_margin = classify_fingers(&HandLandmarks::new(points), FRAME);
        assert!(!at_margin.is_open(Finger::Thumb));

        set(&mut points, LandmarkId::ThumbTip, 0.5115, 0.5);
        let past_margin = classify_fingers(&HandLandmarks::new(points), FRAME);
        assert!(past_margin.is_open(Finger::Thumb));
    }

    #[test]
    fn test_thumb_uses_horizontal_axis_only() {
        let mut points = neutral();
        set(&mut points, LandmarkId::ThumbTip, 0.5, 0.1);
        let state = classify_fingers(&HandLandmarks::new(points), FRAME);
        assert!(!state.is_open(Finger::Thumb));
    }

    #[test]
    fn test_finger_margin_boundary() {
        for finger in [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky] {
            let mut points = neutral();
            set(&mut points, finger.joint(), 0.5, 0.5);

            set(&mut points, finger.tip(), 0.5, 0.4905);
            let at_margin = classify_fingers(&HandLandmarks::new(points), FRAME);
            assert!(!at_margin.is_open(finger), "{:?} open at margin", finger);

            set(&mut points, finger.tip(), 0.5, 0.4885);
            let past_margin = classify_fingers(&HandLandmarks::new(points), FRAME);
            assert!(past_margin.is_open(finger), "{:?} closed past margin", finger);
            assert!(past_margin.only(&[finger]));
        }
    }

    #[test]
    fn test_finger_below_joint_is_closed() {
        let mut points = neutral();
        set(&mut points, LandmarkId::IndexTip, 0.5, 0.7);
        let state = classify_fingers(&HandLandmarks::new(points), FRAME);
        assert!(!state.is_open(Finger::Index));
    }

    #[test]
    fn test_classification_is_pure() {
        let mut points = neutral();
        set(&mut points, LandmarkId::IndexTip, 0.5, 0.3);
        set(&mut points, LandmarkId::MiddleTip, 0.5, 0.3);
        let hand = HandLandmarks::new(points);

        let first = classify_fingers(&hand, FRAME);
        let second = classify_fingers(&hand, FRAME);
        assert_eq!(first, second);
        assert!(first.only(&[Finger::Index, Finger::Middle]));
    }

    #[test]
    fn test_margin_scales_with_frame_size() {
        // 12 px above the joint on a 100 px tall frame, 1.2 px on a 10 px frame
        let mut points = neutral();
        set(&mut points, LandmarkId::RingTip, 0.5, 0.38);
        let hand = HandLandmarks::new(points);

        assert!(classify_fingers(&hand, FrameSize::new(100, 100)).is_open(Finger::Ring));
        assert!(!classify_fingers(&hand, FrameSize::new(10, 10)).is_open(Finger::Ring));
    }

    #[test]
    fn test_display_format() {
        let state = FingerState::from_open(&[Finger::Index, Finger::Pinky]);
        assert_eq!(state.to_string(), "[0, 1, 0, 0, 1]");
    }
}
