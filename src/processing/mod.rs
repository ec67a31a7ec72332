//! Per-frame gesture processing
//!
//! Finger classification, pointer mapping and the gesture decision engine.
//! Each stage can be driven on its own with synthetic landmarks.

pub mod finger_state;
pub mod gesture;
pub mod pointer_mapping;

pub use finger_state::{classify_fingers, Finger, FingerState, OPEN_MARGIN_PX};
pub use gesture::{ActionCommand, ActionKind, ActionLatches, GestureEngine, GestureInput};
pub use pointer_mapping::{PointerMapper, ScreenPoint};
