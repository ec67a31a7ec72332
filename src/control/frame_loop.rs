//! Capture → engine → dispatch loop
//!
//! Pulls frames from a [`HandDetector`], runs them through a
//! [`GestureSession`] and forwards commands to an [`ActionDispatcher`].
//! Bad frames and failed dispatches are logged and skipped. The loop stops
//! when the detector runs dry, when the stop flag is raised, or after too
//! many detector errors in a row.

use crate::capture::hand::{DetectedFrame, HandDetector};
use crate::config::Config;
use crate::control::dispatcher::ActionDispatcher;
use crate::control::session::{FrameOutcome, GestureSession};
use crate::error::{GestureError, GestureResult};
use crate::processing::ActionKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Consecutive detector errors tolerated before the loop gives up
pub const MAX_CONSECUTIVE_DETECTOR_ERRORS: usize = 30;

/// Counters for one run of the loop
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameLoopStats {
    pub frames: u64,
    pub skipped: u64,
    pub without_hand: u64,
    pub out_of_order: u64,
    pub dispatch_failures: u64,
    pub commands: BTreeMap<ActionKind, u64>,
}

impl FrameLoopStats {
    pub fn count(&self, kind: ActionKind) -> u64 {
        self.commands.get(&kind).copied().unwrap_or(0)
    }
}

pub struct FrameLoop {
    session: GestureSession,
    dispatcher: Box<dyn ActionDispatcher>,
    stop: Arc<AtomicBool>,
    queue_capacity: usize,
    next_sequence: u64,
    consecutive_errors: usize,
    stats: FrameLoopStats,
}

impl FrameLoop {
    pub fn new(config: &Config, dispatcher: Box<dyn ActionDispatcher>) -> Self {
        Self {
            session: GestureSession::new(config),
            dispatcher,
            stop: Arc::new(AtomicBool::new(false)),
            queue_capacity: config.pipeline.queue_capacity.max(1),
            next_sequence: 0,
            consecutive_errors: 0,
            stats: FrameLoopStats::default(),
        }
    }

    /// Flag that stops the loop between frames once set
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        self.stop.clone()
    }

    pub fn session(&self) -> &GestureSession {
        &self.session
    }

    pub fn stats(&self) -> &FrameLoopStats {
        &self.stats
    }

    fn should_stop(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    /// Run detect, process and dispatch on the calling thread until the stream ends
    pub fn run(&mut self, detector: &mut dyn HandDetector) -> GestureResult<FrameLoopStats> {
        while !self.should_stop() {
            match detector.detect() {
                Ok(Some(frame)) => {
                    self.consecutive_errors = 0;
                    self.handle_frame(&frame);
                }
                Ok(None) => break,
                Err(e) => self.record_detector_error(e)?,
            }
        }
        self.finish()
    }

    /// Run the detector on a blocking thread and feed frames through a bounded queue.
    ///
    /// Frames are processed one at a time in capture order; a frame whose
    /// sequence number is behind the last processed one is dropped.
    pub async fn run_queued<D>(&mut self, mut detector: D) -> GestureResult<FrameLoopStats>
    where
        D: HandDetector + 'static,
    {
        let (tx, mut rx) = mpsc::channel::<GestureResult<DetectedFrame>>(self.queue_capacity);
        let stop = self.stop.clone();

        let producer = tokio::task::spawn_blocking(move || {
            while !stop.load(Ordering::SeqCst) {
                let Some(item) = detector.detect().transpose() else {
                    break;
                };
                if tx.blocking_send(item).is_err() {
                    break;
                }
            }
            tracing::debug!("Detector thread finished");
        });

        let mut result = Ok(());
        while let Some(item) = rx.recv().await {
            if self.should_stop() {
                break;
            }
            match item {
                Ok(frame) => {
                    self.consecutive_errors = 0;
                    self.handle_frame(&frame);
                }
                Err(e) => {
                    if let Err(fatal) = self.record_detector_error(e) {
                        result = Err(fatal);
                        break;
                    }
                }
            }
        }
        drop(rx);

        if let Err(e) = producer.await {
            tracing::warn!("Detector thread panicked: {}", e);
        }
        result?;
        self.finish()
    }

    fn handle_frame(&mut self, frame: &DetectedFrame) {
        if frame.sequence < self.next_sequence {
            tracing::warn!(
                "Dropping out-of-order frame {} (expected >= {})",
                frame.sequence,
                self.next_sequence
            );
            self.stats.out_of_order += 1;
            return;
        }
        self.next_sequence = frame.sequence + 1;

        let outcome = self.session.process_frame(frame);
        self.stats.frames += 1;
        if !outcome.hand_detected() {
            self.stats.without_hand += 1;
        }
        self.dispatch(&outcome);
    }

    fn dispatch(&mut self, outcome: &FrameOutcome) {
        let command = outcome.command;
        *self.stats.commands.entry(command.kind()).or_insert(0) += 1;
        if command.is_none() {
            return;
        }
        if let Err(e) = self.dispatcher.dispatch(&command) {
            tracing::warn!("Frame {}: dropping {}: {}", outcome.sequence, command.kind(), e);
            self.stats.dispatch_failures += 1;
        }
    }

    fn record_detector_error(&mut self, error: GestureError) -> GestureResult<()> {
        self.stats.skipped += 1;
        self.consecutive_errors += 1;
        tracing::warn!("Skipping frame: {}", error);
        if self.consecutive_errors >= MAX_CONSECUTIVE_DETECTOR_ERRORS {
            return Err(GestureError::Detector(format!(
                "{} consecutive detector errors, last: {}",
                self.consecutive_errors, error
            )));
        }
        Ok(())
    }

    fn finish(&self) -> GestureResult<FrameLoopStats> {
        tracing::info!(
            "Frame loop finished (frames={}, skipped={}, without_hand={}, dispatch_failures={})",
            self.stats.frames,
            self.stats.skipped,
            self.stats.without_hand,
            self.stats.dispatch_failures
        );
        Ok(self.stats.clone())
    }
}
