//! The frame loop: per-tick glue between the classifier, the hold confirmer,
//! and the flow machine.
//!
//! The host drives this once per display refresh while the camera is live.
//! Cancellation is cooperative: stopping the session flips a flag the loop
//! consults at the top of every tick, and leaving the camera state ends the
//! loop without firing a capture.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use crate::flow::{FlowMachine, FlowSurface};
use crate::gesture::{classify_frame, ClassifierConfig, FrameDetection, HoldConfirmer, HoldProgress, TargetGesture};
use crate::types::StateId;

/// One video frame's pixel buffer.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }
}

/// The confirmed frame, held in memory for editing. Overwritten on retry,
/// never queued or versioned.
#[derive(Debug, Clone)]
pub struct Capture {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
    pub captured_at: DateTime<Utc>,
}

impl Capture {
    fn from_frame(frame: &Frame) -> Self {
        Self {
            width: frame.width,
            height: frame.height,
            pixels: frame.pixels.clone(),
            captured_at: Utc::now(),
        }
    }
}

/// Per camera-activation detection state: the hold confirmer plus the stopped
/// flag that is the loop's sole cancellation mechanism.
#[derive(Debug, Clone)]
pub struct GestureSession {
    hold: HoldConfirmer,
    stopped: bool,
}

impl GestureSession {
    pub fn new(threshold: Duration) -> Self {
        Self {
            hold: HoldConfirmer::new(threshold),
            stopped: false,
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Cancels the session. Takes effect on the next tick; there is no hard
    /// preemption.
    pub fn stop(&mut self) {
        if !self.stopped {
            debug!("gesture session stopped");
        }
        self.stopped = true;
    }

    /// Re-arms for a fresh activation (camera restart or retry).
    pub fn reset(&mut self) {
        self.hold.reset();
        self.stopped = false;
    }

    pub fn observe_at(&mut self, present: bool, now: Instant) -> HoldProgress {
        self.hold.observe_at(present, now)
    }
}

/// What one tick of the loop decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The session is stopped or the flow left the camera state; the host
    /// must end the loop. No capture fired.
    Stopped,
    /// Still watching. `remaining` is `Some` while a hold is in progress and
    /// feeds the on-screen countdown.
    Watching { remaining: Option<Duration> },
    /// The hold confirmed: the frame was captured and the machine moved to
    /// [`StateId::GestureDetected`].
    Captured,
}

/// Owns the session, the classification settings, and the latest capture.
#[derive(Debug, Clone)]
pub struct CaptureLoop {
    session: GestureSession,
    target: TargetGesture,
    classifier: ClassifierConfig,
    capture: Option<Capture>,
}

impl CaptureLoop {
    pub fn new(target: TargetGesture, threshold: Duration, classifier: ClassifierConfig) -> Self {
        Self {
            session: GestureSession::new(threshold),
            target,
            classifier,
            capture: None,
        }
    }

    pub fn target(&self) -> TargetGesture {
        self.target
    }

    pub fn session(&self) -> &GestureSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GestureSession {
        &mut self.session
    }

    /// The latest confirmed capture, if any.
    pub fn capture(&self) -> Option<&Capture> {
        self.capture.as_ref()
    }

    pub fn take_capture(&mut self) -> Option<Capture> {
        self.capture.take()
    }

    /// Re-arms the session for another attempt. The previous capture stays
    /// available until the next confirmation overwrites it.
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Processes one video frame.
    ///
    /// Order per tick: liveness checks, classify, feed the hold confirmer,
    /// and on confirmation snapshot the frame, stop the session, and
    /// transition the machine to [`StateId::GestureDetected`].
    pub fn tick<S: FlowSurface>(
        &mut self,
        machine: &mut FlowMachine<S>,
        frame: &Frame,
        detection: &FrameDetection,
        now: Instant,
    ) -> TickOutcome {
        if self.session.is_stopped() {
            return TickOutcome::Stopped;
        }
        // User navigated away (stop camera, back, ...): end without firing.
        if machine.current() != StateId::CameraRunning {
            self.session.stop();
            return TickOutcome::Stopped;
        }

        let present = classify_frame(detection, self.target, &self.classifier);
        match self.session.observe_at(present, now) {
            HoldProgress::Absent => TickOutcome::Watching { remaining: None },
            HoldProgress::Holding { remaining } => TickOutcome::Watching {
                remaining: Some(remaining),
            },
            HoldProgress::Confirmed => {
                info!(target = %self.target, "hold confirmed, capturing frame");
                self.capture = Some(Capture::from_frame(frame));
                self.session.stop();
                if let Err(err) = machine.transition(StateId::GestureDetected) {
                    error!(error = %err, "capture fired but transition failed");
                }
                TickOutcome::Captured
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::flow::{FlowSurface, StateTable};
    use crate::gesture::landmarks::{HandDetection, HandLandmarks, Point, LANDMARK_COUNT};
    use crate::gesture::Landmark;
    use crate::prefs::ModalPrefs;
    use crate::types::{EnterAction, ModalId, Slot, ViewType, Widget};

    struct NullSurface;

    impl FlowSurface for NullSurface {
        fn apply_view(&mut self, _view: ViewType) {}
        fn set_messages(&mut self, _top: &str, _bottom: &str) {}
        fn hide_all(&mut self) {}
        fn show_widget(&mut self, _slot: Slot, _widget: Widget) -> Result<()> {
            Ok(())
        }
        fn open_modal(&mut self, _modal: ModalId) -> Result<()> {
            Ok(())
        }
        fn run_action(&mut self, _action: EnterAction) {}
    }

    fn camera_machine() -> FlowMachine<NullSurface> {
        let mut m = FlowMachine::new(StateTable::standard(), NullSurface, ModalPrefs::default());
        m.start();
        m.transition(StateId::CameraRunning).unwrap();
        m
    }

    fn thumbs_up_detection() -> FrameDetection {
        let mut points = vec![Point::new(0.5, 0.5); LANDMARK_COUNT];
        points[Landmark::ThumbMcp.index()] = Point::new(0.5, 0.6);
        points[Landmark::ThumbIp.index()] = Point::new(0.5, 0.5);
        points[Landmark::ThumbTip.index()] = Point::new(0.5, 0.4);
        for (tip, pip) in [
            (Landmark::IndexTip, Landmark::IndexPip),
            (Landmark::MiddleTip, Landmark::MiddlePip),
            (Landmark::RingTip, Landmark::RingPip),
            (Landmark::PinkyTip, Landmark::PinkyPip),
        ] {
            points[pip.index()] = Point::new(0.5, 0.5);
            points[tip.index()] = Point::new(0.5, 0.55);
        }
        FrameDetection::single(HandDetection {
            landmarks: HandLandmarks::new(points),
            confidence: 0.9,
        })
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_hold_then_capture() {
        let mut machine = camera_machine();
        let mut cap = CaptureLoop::new(
            TargetGesture::ThumbsUp,
            ms(2000),
            ClassifierConfig::default(),
        );
        let frame = Frame::new(640, 480, vec![0u8; 16]);
        let detection = thumbs_up_detection();
        let t0 = Instant::now();

        assert_eq!(
            cap.tick(&mut machine, &frame, &detection, t0),
            TickOutcome::Watching {
                remaining: Some(ms(2000))
            }
        );
        assert_eq!(
            cap.tick(&mut machine, &frame, &detection, t0 + ms(1000)),
            TickOutcome::Watching {
                remaining: Some(ms(1000))
            }
        );
        assert_eq!(
            cap.tick(&mut machine, &frame, &detection, t0 + ms(2000)),
            TickOutcome::Captured
        );
        assert_eq!(machine.current(), StateId::GestureDetected);
        assert!(cap.session().is_stopped());
        let capture = cap.capture().expect("capture present");
        assert_eq!((capture.width, capture.height), (640, 480));
    }

    #[test]
    fn test_absent_frames_keep_watching() {
        let mut machine = camera_machine();
        let mut cap = CaptureLoop::new(
            TargetGesture::ThumbsUp,
            ms(2000),
            ClassifierConfig::default(),
        );
        let frame = Frame::default();
        let outcome = cap.tick(&mut machine, &frame, &FrameDetection::empty(), Instant::now());
        assert_eq!(outcome, TickOutcome::Watching { remaining: None });
        assert_eq!(machine.current(), StateId::CameraRunning);
    }

    #[test]
    fn test_cancel_mid_hold_fires_no_capture() {
        let mut machine = camera_machine();
        let mut cap = CaptureLoop::new(
            TargetGesture::ThumbsUp,
            ms(2000),
            ClassifierConfig::default(),
        );
        let frame = Frame::default();
        let detection = thumbs_up_detection();
        let t0 = Instant::now();

        cap.tick(&mut machine, &frame, &detection, t0);
        cap.session_mut().stop();
        assert_eq!(
            cap.tick(&mut machine, &frame, &detection, t0 + ms(5000)),
            TickOutcome::Stopped
        );
        assert!(cap.capture().is_none());
        assert_eq!(machine.current(), StateId::CameraRunning);
    }

    #[test]
    fn test_leaving_camera_state_stops_loop() {
        let mut machine = camera_machine();
        let mut cap = CaptureLoop::new(
            TargetGesture::ThumbsUp,
            ms(2000),
            ClassifierConfig::default(),
        );
        let frame = Frame::default();
        let detection = thumbs_up_detection();
        let t0 = Instant::now();

        cap.tick(&mut machine, &frame, &detection, t0);
        machine.transition(StateId::CameraStopped).unwrap();
        assert_eq!(
            cap.tick(&mut machine, &frame, &detection, t0 + ms(5000)),
            TickOutcome::Stopped
        );
        assert!(cap.capture().is_none());
        assert!(cap.session().is_stopped());
    }

    #[test]
    fn test_reset_allows_retry_and_overwrites_capture() {
        let mut machine = camera_machine();
        let mut cap = CaptureLoop::new(TargetGesture::ThumbsUp, ms(100), ClassifierConfig::default());
        let detection = thumbs_up_detection();
        let t0 = Instant::now();

        cap.tick(&mut machine, &Frame::new(10, 10, vec![1]), &detection, t0);
        cap.tick(
            &mut machine,
            &Frame::new(10, 10, vec![1]),
            &detection,
            t0 + ms(100),
        );
        assert_eq!(cap.capture().unwrap().pixels, vec![1]);

        // Retry: back to the camera, re-arm, capture again.
        machine.transition(StateId::CameraRunning).unwrap();
        cap.reset();
        cap.tick(&mut machine, &Frame::new(10, 10, vec![2]), &detection, t0 + ms(200));
        cap.tick(
            &mut machine,
            &Frame::new(10, 10, vec![2]),
            &detection,
            t0 + ms(300),
        );
        assert_eq!(cap.capture().unwrap().pixels, vec![2]);
    }
}
