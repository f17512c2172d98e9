//! Frame callback that logs each playback frame.
//!
//! For every month shown, computes the subject's snapshot and logs the
//! policy total, the way a map view would recolor on each frame.

use stringency_engine::playback::{Frame, FrameCallback};
use stringency_engine::{AggregationEngine, EventSource};
use tracing::info;

/// Logs the active-policy total for every frame.
pub struct FrameLogger<'a> {
    engine: &'a AggregationEngine,
    source: &'a dyn EventSource,
    subject: &'a str,
}

impl<'a> FrameLogger<'a> {
    /// Create a logger for `subject`'s frames.
    pub const fn new(
        engine: &'a AggregationEngine,
        source: &'a dyn EventSource,
        subject: &'a str,
    ) -> Self {
        Self {
            engine,
            source,
            subject,
        }
    }
}

impl FrameCallback for FrameLogger<'_> {
    fn on_frame(&mut self, frame: &Frame) {
        let snapshot = self.engine.snapshot(self.source, self.subject, frame.month);
        info!(
            subject = self.subject,
            month = %frame.month,
            frame = frame.index.saturating_add(1),
            of = frame.total_frames,
            total = snapshot.total(),
            "Frame"
        );
    }
}
