use crate::error::GestureError;
use serde::{Deserialize, Serialize};

/// Number of landmarks in one hand observation.
pub const LANDMARK_COUNT: usize = 21;

/// Anatomical landmark positions, indexed the way hand-pose detectors emit them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandmarkId {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexMcp = 5,
    IndexPip = 6,
    IndexDip = 7,
    IndexTip = 8,
    MiddleMcp = 9,
    MiddlePip = 10,
    MiddleDip = 11,
    MiddleTip = 12,
    RingMcp = 13,
    RingPip = 14,
    RingDip = 15,
    RingTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

impl LandmarkId {
    /// Stable palm point used as the hand's position for pointer mapping.
    pub const REFERENCE: LandmarkId = LandmarkId::MiddleMcp;

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Which hand the detector believes it saw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    Left,
    #[default]
    Right,
}

/// One normalized anatomical point, each axis in [0, 1] relative to the frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Position in whole pixels. Truncates toward zero like an integer cast.
    pub fn to_pixel(&self, frame: FrameSize) -> PixelPoint {
        PixelPoint {
            x: (self.x * frame.width as f64) as i32,
            y: (self.y * frame.height as f64) as i32,
        }
    }
}

/// Integer pixel position inside a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

/// Pixel dimensions of a captured frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Exactly 21 landmarks for one hand.
///
/// The only way to build one from detector output is `TryFrom<Vec<Landmark>>`,
/// so a wrong point count is rejected up front instead of being classified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Landmark>", into = "Vec<Landmark>")]
pub struct HandLandmarks([Landmark; LANDMARK_COUNT]);

impl HandLandmarks {
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        Self(points)
    }

    pub fn get(&self, id: LandmarkId) -> Landmark {
        self.0[id.index()]
    }

    pub fn pixel(&self, id: LandmarkId, frame: FrameSize) -> PixelPoint {
        self.get(id).to_pixel(frame)
    }

    pub fn as_slice(&self) -> &[Landmark] {
        &self.0
    }

    /// Flip horizontally, as if the camera image had been mirrored.
    pub fn mirrored(&self) -> Self {
        let mut points = self.0;
        for point in points.iter_mut() {
            point.x = 1.0 - point.x;
        }
        Self(points)
    }
}

impl TryFrom<Vec<Landmark>> for HandLandmarks {
    type Error = GestureError;

    fn try_from(points: Vec<Landmark>) -> Result<Self, Self::Error> {
        let actual = points.len();
        let array: [Landmark; LANDMARK_COUNT] =
            points
                .try_into()
                .map_err(|_| GestureError::MalformedLandmarks {
                    expected: LANDMARK_COUNT,
                    actual,
                })?;
        Ok(Self(array))
    }
}

impl From<HandLandmarks> for Vec<Landmark> {
    fn from(hand: HandLandmarks) -> Self {
        hand.0.to_vec()
    }
}

/// One detected hand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandObservation {
    #[serde(default)]
    pub handedness: Handedness,
    /// Detection confidence in [0, 1]
    #[serde(default = "full_confidence")]
    pub score: f64,
    pub landmarks: HandLandmarks,
}

fn full_confidence() -> f64 {
    1.0
}

impl HandObservation {
    pub fn new(landmarks: HandLandmarks) -> Self {
        Self {
            handedness: Handedness::default(),
            score: 1.0,
            landmarks,
        }
    }
}

/// Detector output for a single captured frame
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedFrame {
    /// Capture order, starting at 0
    pub sequence: u64,
    pub size: FrameSize,
    pub hands: Vec<HandObservation>,
}
