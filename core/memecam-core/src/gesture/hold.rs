//! Hold-to-confirm debouncing of the per-frame gesture boolean.
//!
//! A single positive frame means nothing; the gesture must stay present for a
//! continuous run of at least the configured threshold before a capture may
//! fire. Any negative frame drops the hold back to idle. Three phases:
//! idle → holding → confirmed, with confirmed terminal for the session.
//!
//! Time is always passed in explicitly so tests control the clock.

use std::time::{Duration, Instant};

use tracing::debug;

/// Default hold duration before a capture fires. Earlier revisions of the
/// flow used 3 seconds; treat this as tunable, not fixed.
pub const DEFAULT_HOLD_THRESHOLD: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Holding { since: Instant },
    Confirmed,
}

/// What one observed frame means for the hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldProgress {
    /// Gesture absent; any hold in progress was dropped.
    Absent,
    /// Gesture present but not yet held long enough. `remaining` drives the
    /// user-facing countdown.
    Holding { remaining: Duration },
    /// The hold lasted the full threshold; capture should fire.
    Confirmed,
}

/// Debounces per-frame classifications into a single confirmation.
#[derive(Debug, Clone)]
pub struct HoldConfirmer {
    threshold: Duration,
    phase: Phase,
}

impl HoldConfirmer {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            phase: Phase::Idle,
        }
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    pub fn is_confirmed(&self) -> bool {
        self.phase == Phase::Confirmed
    }

    /// Feeds one frame's classification at the given instant.
    ///
    /// Once confirmed the confirmer stays confirmed; callers are expected to
    /// stop observing after confirmation (the session's stopped flag enforces
    /// this in the capture loop).
    pub fn observe_at(&mut self, present: bool, now: Instant) -> HoldProgress {
        match (self.phase, present) {
            (Phase::Confirmed, _) => HoldProgress::Confirmed,
            (_, false) => {
                if matches!(self.phase, Phase::Holding { .. }) {
                    debug!("gesture dropped, resetting hold");
                }
                self.phase = Phase::Idle;
                HoldProgress::Absent
            }
            (Phase::Idle, true) => {
                self.phase = Phase::Holding { since: now };
                HoldProgress::Holding {
                    remaining: self.threshold,
                }
            }
            (Phase::Holding { since }, true) => {
                let elapsed = now.duration_since(since);
                if elapsed >= self.threshold {
                    debug!(?elapsed, "hold confirmed");
                    self.phase = Phase::Confirmed;
                    HoldProgress::Confirmed
                } else {
                    HoldProgress::Holding {
                        remaining: self.threshold - elapsed,
                    }
                }
            }
        }
    }

    /// Drops back to idle, ready for a fresh hold.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }
}

impl Default for HoldConfirmer {
    fn default() -> Self {
        Self::new(DEFAULT_HOLD_THRESHOLD)
    }
}
