//! Map playback over a subject's timeline.
//!
//! The dashboard animates the map by stepping through the timeline one
//! month at a time. This module provides the shared control state and the
//! async loop that drives it:
//!
//! - **Pause/resume**: the loop parks between frames until resumed
//! - **Variable speed**: the frame interval is adjustable while playing
//! - **Looping**: optionally restart from the first month
//! - **Stop**: wakes the loop out of a pause or a frame wait immediately
//!
//! All control fields are atomics so a UI task can flip them while the
//! loop is sleeping, without locks.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use stringency_types::MonthKey;
use tokio::sync::Notify;
use tokio::time::Duration;
use tracing::{info, warn};

use crate::config::{MIN_FRAME_INTERVAL_MS, PlaybackConfig};

/// Errors that can occur when starting playback.
#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    /// There are no months to play.
    #[error("cannot play back an empty timeline")]
    EmptyTimeline,
}

/// Reason playback ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEndReason {
    /// The last month was shown and looping was off.
    Completed,
    /// A stop was requested.
    Stopped,
}

/// One step of playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Position of `month` within the timeline.
    pub index: usize,
    /// The month being shown.
    pub month: MonthKey,
    /// Number of months in the timeline.
    pub total_frames: usize,
}

/// Summary of a finished playback run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackResult {
    /// Why the loop returned.
    pub end_reason: PlaybackEndReason,
    /// Frames handed to the callback, counting repeats when looping.
    pub frames_emitted: u64,
    /// The last month shown, if any frame was emitted.
    pub last_month: Option<MonthKey>,
}

/// Receives each frame as it is shown.
pub trait FrameCallback: Send {
    /// Called once per frame, before the frame interval elapses.
    fn on_frame(&mut self, frame: &Frame);
}

/// Shared playback control state.
///
/// Wrapped in [`Arc`] and shared between the playback loop and whatever
/// drives it (a UI, a signal handler, a test).
#[derive(Debug)]
pub struct PlaybackControl {
    paused: AtomicBool,
    resume_notify: Notify,
    stop_requested: AtomicBool,
    stop_notify: Notify,
    frame_interval_ms: AtomicU64,
    loop_playback: AtomicBool,
}

impl PlaybackControl {
    /// Create control state from configuration.
    pub fn new(config: &PlaybackConfig) -> Self {
        Self {
            paused: AtomicBool::new(false),
            resume_notify: Notify::new(),
            stop_requested: AtomicBool::new(false),
            stop_notify: Notify::new(),
            frame_interval_ms: AtomicU64::new(config.frame_interval_ms.max(MIN_FRAME_INTERVAL_MS)),
            loop_playback: AtomicBool::new(config.loop_playback),
        }
    }

    // -----------------------------------------------------------------------
    // Pause / Resume
    // -----------------------------------------------------------------------

    /// Whether playback is paused.
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// Pause after the current frame.
    pub fn pause(&self) {
        self.paused.store(true, Ordering::Release);
    }

    /// Resume and wake the loop.
    pub fn resume(&self) {
        self.paused.store(false, Ordering::Release);
        self.resume_notify.notify_one();
    }

    /// Wait until playback is no longer paused or a stop is requested.
    pub async fn wait_if_paused(&self) {
        while self.is_paused() && !self.is_stop_requested() {
            self.resume_notify.notified().await;
        }
    }

    // -----------------------------------------------------------------------
    // Stop
    // -----------------------------------------------------------------------

    /// Request playback to stop. Wakes the loop if it is paused or waiting
    /// for the next frame.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
        self.stop_notify.notify_one();
        self.resume_notify.notify_one();
    }

    /// Whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    /// Resolve once a stop has been requested.
    pub async fn stopped(&self) {
        while !self.is_stop_requested() {
            self.stop_notify.notified().await;
        }
    }

    // -----------------------------------------------------------------------
    // Speed / Looping
    // -----------------------------------------------------------------------

    /// Current frame interval in milliseconds.
    pub fn frame_interval_ms(&self) -> u64 {
        self.frame_interval_ms.load(Ordering::Acquire)
    }

    /// Set the frame interval. Must be at least [`MIN_FRAME_INTERVAL_MS`].
    ///
    /// Returns the previous interval, or `None` if `ms` was rejected.
    pub fn set_frame_interval_ms(&self, ms: u64) -> Option<u64> {
        if ms < MIN_FRAME_INTERVAL_MS {
            return None;
        }
        Some(self.frame_interval_ms.swap(ms, Ordering::AcqRel))
    }

    /// Whether playback restarts after the last month.
    pub fn loops(&self) -> bool {
        self.loop_playback.load(Ordering::Acquire)
    }

    /// Turn looping on or off.
    pub fn set_loop(&self, enabled: bool) {
        self.loop_playback.store(enabled, Ordering::Release);
    }
}

/// Step through `timeline`, one frame per interval, until it finishes or a
/// stop is requested.
///
/// The interval is re-read before every wait, so speed changes take effect
/// on the next frame. There is no wait after the final frame of a
/// non-looping run.
///
/// # Errors
///
/// Returns [`PlaybackError::EmptyTimeline`] if `timeline` has no months.
pub async fn run_playback(
    timeline: &[MonthKey],
    control: &Arc<PlaybackControl>,
    callback: &mut dyn FrameCallback,
) -> Result<PlaybackResult, PlaybackError> {
    let (Some(&first), Some(&last)) = (timeline.first(), timeline.last()) else {
        return Err(PlaybackError::EmptyTimeline);
    };
    let total_frames = timeline.len();

    info!(
        first = %first,
        last = %last,
        frames = total_frames,
        frame_interval_ms = control.frame_interval_ms(),
        loop_playback = control.loops(),
        "Playback starting"
    );

    let mut result = PlaybackResult {
        end_reason: PlaybackEndReason::Completed,
        frames_emitted: 0,
        last_month: None,
    };
    let mut frames = timeline.iter().copied().enumerate();

    loop {
        if control.is_paused() {
            info!("Playback paused");
            control.wait_if_paused().await;
            info!("Playback resumed");
        }

        if control.is_stop_requested() {
            result.end_reason = PlaybackEndReason::Stopped;
            return Ok(result);
        }

        let Some((index, month)) = frames.next() else {
            return Ok(result);
        };

        callback.on_frame(&Frame {
            index,
            month,
            total_frames,
        });
        result.frames_emitted = result.frames_emitted.saturating_add(1);
        result.last_month = Some(month);

        if frames.len() == 0 {
            if !control.loops() {
                return Ok(result);
            }
            frames = timeline.iter().copied().enumerate();
        }

        let interval = Duration::from_millis(control.frame_interval_ms());
        tokio::select! {
            () = tokio::time::sleep(interval) => {}
            () = control.stopped() => {}
        }
    }
}

/// Log how a playback run ended.
pub fn log_playback_end(result: &PlaybackResult) {
    match result.last_month {
        Some(month) => info!(
            reason = ?result.end_reason,
            frames = result.frames_emitted,
            last_month = %month,
            "Playback ended"
        ),
        None => warn!(reason = ?result.end_reason, "Playback ended before any frame"),
    }
}
