//! Gesture decision engine
//!
//! Turns the per-frame finger state into at most one pointer action. Clicks
//! are edge-triggered: each has a latch that is set when the action fires and
//! only cleared once the pose is left, so a held pose fires once. Scrolling
//! is continuous and fires every frame the open hand is held.
//!
//! | open fingers           | action                          |
//! |------------------------|---------------------------------|
//! | none (fist)            | move pointer, clear all latches |
//! | index only             | click                           |
//! | index + middle only    | double click                    |
//! | any four               | right click                     |
//! | all five               | scroll up / down by hand height |

use crate::processing::finger_state::{Finger, FingerState};
use crate::processing::pointer_mapping::ScreenPoint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pointer action for the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ActionCommand {
    /// Absolute screen position in pixels
    MoveTo { x: i32, y: i32 },
    Click,
    DoubleClick,
    RightClick,
    ScrollUp,
    ScrollDown,
    None,
}

impl ActionCommand {
    pub fn move_to(point: ScreenPoint) -> Self {
        let (x, y) = point.rounded();
        ActionCommand::MoveTo { x, y }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ActionCommand::None)
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            ActionCommand::MoveTo { .. } => ActionKind::MoveTo,
            ActionCommand::Click => ActionKind::Click,
            ActionCommand::DoubleClick => ActionKind::DoubleClick,
            ActionCommand::RightClick => ActionKind::RightClick,
            ActionCommand::ScrollUp => ActionKind::ScrollUp,
            ActionCommand::ScrollDown => ActionKind::ScrollDown,
            ActionCommand::None => ActionKind::None,
        }
    }
}

/// Payload-free discriminant of [`ActionCommand`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    MoveTo,
    Click,
    DoubleClick,
    RightClick,
    ScrollUp,
    ScrollDown,
    None,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::MoveTo => write!(f, "move-to"),
            ActionKind::Click => write!(f, "click"),
            ActionKind::DoubleClick => write!(f, "double-click"),
            ActionKind::RightClick => write!(f, "right-click"),
            ActionKind::ScrollUp => write!(f, "scroll-up"),
            ActionKind::ScrollDown => write!(f, "scroll-down"),
            ActionKind::None => write!(f, "none"),
        }
    }
}

/// "Already fired for the current pose" flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionLatches {
    pub click: bool,
    pub double_click: bool,
    pub right_click: bool,
    pub scroll: bool,
}

impl ActionLatches {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn any(&self) -> bool {
        self.click || self.double_click || self.right_click || self.scroll
    }
}

/// Everything the engine needs to know about one frame
#[derive(Debug, Clone, Copy)]
pub struct GestureInput {
    pub fingers: FingerState,
    /// Smoothed pointer position for this frame
    pub pointer: ScreenPoint,
    /// Raw vertical pixel position of the palm reference point
    pub reference_y: i32,
    pub frame_height: u32,
}

/// Edge-triggered gesture state machine
#[derive(Debug, Clone, Default)]
pub struct GestureEngine {
    latches: ActionLatches,
}

impl GestureEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latches(&self) -> ActionLatches {
        self.latches
    }

    /// Decide this frame's action and update the latches
    pub fn decide(&mut self, input: &GestureInput) -> ActionCommand {
        let fingers = input.fingers;
        let open = fingers.open_count();

        if open == 0 {
            self.latches.clear();
            return ActionCommand::move_to(input.pointer);
        }

        let mut command = ActionCommand::None;

        if fingers.only(&[Finger::Index]) {
            if !self.latches.click {
                self.latches.click = true;
                command = ActionCommand::Click;
            }
        } else {
            self.latches.click = false;
        }

        if fingers.only(&[Finger::Index, Finger::Middle]) {
            if !self.latches.double_click {
                self.latches.double_click = true;
                command = ActionCommand::DoubleClick;
            }
        } else {
            self.latches.double_click = false;
        }

        if open == 4 {
            if !self.latches.right_click {
                self.latches.right_click = true;
                command = ActionCommand::RightClick;
            }
        } else {
            self.latches.right_click = false;
        }

        if open == 5 {
            self.latches.scroll = true;
            command = if input.reference_y < (input.frame_height / 2) as i32 {
                ActionCommand::ScrollUp
            } else {
                ActionCommand::ScrollDown
            };
        } else {
            self.latches.scroll = false;
        }

        command
    }
}
