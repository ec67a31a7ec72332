//! Action dispatcher boundary
//!
//! The engine hands each non-empty command to an [`ActionDispatcher`]. OS
//! pointer injection lives behind this trait outside the crate; the two
//! implementations here record commands for tests or log them for replays.

use crate::error::{GestureError, GestureResult};
use crate::processing::ActionCommand;
use parking_lot::Mutex as ParkingMutex;
use std::sync::Arc;

/// Receives pointer actions and performs them.
///
/// A failed dispatch is dropped by the caller; the next frame carries on.
pub trait ActionDispatcher: Send {
    fn dispatch(&mut self, command: &ActionCommand) -> GestureResult<()>;
}

/// Keeps every dispatched command in memory.
///
/// Clones share the same buffer, so a handle kept by a test sees what the
/// session dispatched.
#[derive(Debug, Clone, Default)]
pub struct RecordingDispatcher {
    commands: Arc<ParkingMutex<Vec<ActionCommand>>>,
    fail_next: Arc<ParkingMutex<usize>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<ActionCommand> {
        self.commands.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.commands.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.lock().is_empty()
    }

    pub fn clear(&self) {
        self.commands.lock().clear();
    }

    /// Make the next `count` dispatches fail without recording
    pub fn fail_next(&self, count: usize) {
        *self.fail_next.lock() = count;
    }
}

impl ActionDispatcher for RecordingDispatcher {
    fn dispatch(&mut self, command: &ActionCommand) -> GestureResult<()> {
        let mut fail_next = self.fail_next.lock();
        if *fail_next > 0 {
            *fail_next -= 1;
            return Err(GestureError::Dispatch(format!(
                "injected failure for {}",
                command.kind()
            )));
        }
        self.commands.lock().push(*command);
        Ok(())
    }
}

/// Logs each action instead of injecting it
#[derive(Debug, Clone)]
pub struct LoggingDispatcher {
    scroll_amount: i32,
}

impl LoggingDispatcher {
    pub fn new(scroll_amount: i32) -> Self {
        Self { scroll_amount }
    }
}

impl ActionDispatcher for LoggingDispatcher {
    fn dispatch(&mut self, command: &ActionCommand) -> GestureResult<()> {
        match command {
            ActionCommand::MoveTo { x, y } => tracing::trace!("move pointer to ({}, {})", x, y),
            ActionCommand::Click => tracing::info!("click"),
            ActionCommand::DoubleClick => tracing::info!("double click"),
            ActionCommand::RightClick => tracing::info!("right click"),
            ActionCommand::ScrollUp => tracing::info!("scroll {}", self.scroll_amount),
            ActionCommand::ScrollDown => tracing::info!("scroll {}", -self.scroll_amount),
            ActionCommand::None => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_dispatcher_shares_buffer_across_clones() {
        let handle = RecordingDispatcher::new();
        let mut dispatcher = handle.clone();

        dispatcher.dispatch(&ActionCommand::Click).unwrap();
        dispatcher.dispatch(&ActionCommand::ScrollDown).unwrap();

        assert_eq!(
            handle.commands(),
            vec![ActionCommand::Click, ActionCommand::ScrollDown]
        );
        handle.clear();
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn test_injected_failures_are_not_recorded() {
        let mut dispatcher = RecordingDispatcher::new();
        dispatcher.fail_next(1);

        assert!(matches!(
            dispatcher.dispatch(&ActionCommand::Click),
            Err(GestureError::Dispatch(_))
        ));
        dispatcher.dispatch(&ActionCommand::Click).unwrap();
        assert_eq!(dispatcher.len(), 1);
    }

    #[test]
    fn test_logging_dispatcher_accepts_everything() {
        let mut dispatcher = LoggingDispatcher::new(40);
        for command in [
            ActionCommand::MoveTo { x: 1, y: 2 },
            ActionCommand::Click,
            ActionCommand::ScrollUp,
            ActionCommand::None,
        ] {
            assert!(dispatcher.dispatch(&command).is_ok());
        }
    }
}
