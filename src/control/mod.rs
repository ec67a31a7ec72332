//! Frame-by-frame control
//!
//! The session that owns cross-frame state, the dispatcher boundary for
//! performing actions, and the loop that ties a detector to both.

pub mod dispatcher;
pub mod frame_loop;
pub mod session;

pub use dispatcher::{ActionDispatcher, LoggingDispatcher, RecordingDispatcher};
pub use frame_loop::{FrameLoop, FrameLoopStats};
pub use session::{FrameOutcome, GestureSession};
