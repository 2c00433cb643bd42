//! End-to-end flow: welcome screen through gesture-confirmed capture.

use std::time::{Duration, Instant};

use memecam_core::gesture::landmarks::{HandDetection, HandLandmarks, Point, LANDMARK_COUNT};
use memecam_core::gesture::Landmark;
use memecam_core::{
    ButtonId, CaptureLoop, ClassifierConfig, FlowMachine, FlowSurface, Frame, FrameDetection,
    ModalId, ModalPrefs, Result, Slot, StateId, StateTable, TargetGesture, TickOutcome, ViewType,
    Widget,
};

/// Minimal surface that tracks the camera on/off side effects and which
/// modals were actually displayed.
#[derive(Default)]
struct TestSurface {
    camera_on: bool,
    displayed_modals: Vec<ModalId>,
    view: Option<ViewType>,
}

impl FlowSurface for TestSurface {
    fn apply_view(&mut self, view: ViewType) {
        self.view = Some(view);
    }

    fn set_messages(&mut self, _top: &str, _bottom: &str) {}

    fn hide_all(&mut self) {}

    fn show_widget(&mut self, _slot: Slot, _widget: Widget) -> Result<()> {
        Ok(())
    }

    fn open_modal(&mut self, modal: ModalId) -> Result<()> {
        self.displayed_modals.push(modal);
        Ok(())
    }

    fn run_action(&mut self, action: memecam_core::EnterAction) {
        match action {
            memecam_core::EnterAction::StartCamera => self.camera_on = true,
            memecam_core::EnterAction::StopCamera => self.camera_on = false,
            _ => {}
        }
    }
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
fn create_to_capture_scenario() {
    let mut machine = FlowMachine::new(
        StateTable::standard(),
        TestSurface::default(),
        ModalPrefs::default(),
    );
    machine.start();
    assert_eq!(machine.current(), StateId::Initial);

    // Click "Create": the create modal opens and the machine waits.
    machine.press(ButtonId::Create);
    assert_eq!(machine.current(), StateId::Create);
    assert_eq!(machine.surface().displayed_modals, vec![ModalId::Create]);

    // User dismisses the modal: auto-advance to the declared next state, the
    // camera starts as an on-enter effect.
    machine.on_modal_closed(ModalId::Create);
    assert_eq!(machine.current(), StateId::CameraRunning);
    assert!(machine.surface().camera_on);
    assert_eq!(machine.surface().view, Some(ViewType::CameraLive));

    // Two seconds of continuous gesture frames at ~60fps cadence.
    let mut cap = CaptureLoop::new(TargetGesture::ThumbsUp, ms(2000), ClassifierConfig::default());
    let frame = Frame::new(640, 480, vec![7u8; 64]);
    let detection = thumbs_up_detection();
    let t0 = Instant::now();

    let mut captured = false;
    for i in 0..=125 {
        let now = t0 + ms(i * 16);
        match cap.tick(&mut machine, &frame, &detection, now) {
            TickOutcome::Watching { .. } => {}
            TickOutcome::Captured => {
                captured = true;
                break;
            }
            TickOutcome::Stopped => panic!("loop stopped early"),
        }
    }
    assert!(captured, "two seconds of held gesture should capture");
    assert_eq!(machine.current(), StateId::GestureDetected);
    assert_eq!(machine.surface().view, Some(ViewType::CapturedStill));

    // The captured buffer is exposed for editing.
    let capture = cap.capture().expect("capture available");
    assert_eq!((capture.width, capture.height), (640, 480));
    assert_eq!(capture.pixels, vec![7u8; 64]);

    // A stray further tick does not fire again.
    assert_eq!(
        cap.tick(&mut machine, &frame, &detection, t0 + ms(5000)),
        TickOutcome::Stopped
    );
}

#[test]
fn skip_preference_goes_straight_to_camera() {
    let mut prefs = ModalPrefs::default();
    prefs.set_skip(ModalId::Create, true);
    let mut machine = FlowMachine::new(StateTable::standard(), TestSurface::default(), prefs);
    machine.start();

    machine.press(ButtonId::Create);
    assert_eq!(machine.current(), StateId::CameraRunning);
    // The modal was never displayed.
    assert!(machine.surface().displayed_modals.is_empty());
    assert!(machine.surface().camera_on);
}

#[test]
fn gesture_dropped_mid_hold_never_captures() {
    let mut machine = FlowMachine::new(
        StateTable::standard(),
        TestSurface::default(),
        ModalPrefs::default(),
    );
    machine.start();
    machine.transition(StateId::CameraRunning).unwrap();

    let mut cap = CaptureLoop::new(TargetGesture::ThumbsUp, ms(2000), ClassifierConfig::default());
    let frame = Frame::default();
    let held = thumbs_up_detection();
    let t0 = Instant::now();

    // 1.5s of hold, a dropped frame, another 1.5s: combined time exceeds the
    // threshold but no continuous run does.
    cap.tick(&mut machine, &frame, &held, t0);
    cap.tick(&mut machine, &frame, &held, t0 + ms(1500));
    cap.tick(&mut machine, &frame, &FrameDetection::empty(), t0 + ms(1600));
    cap.tick(&mut machine, &frame, &held, t0 + ms(1700));
    let outcome = cap.tick(&mut machine, &frame, &held, t0 + ms(3200));

    assert_eq!(outcome, TickOutcome::Watching { remaining: Some(ms(500)) });
    assert!(cap.capture().is_none());
    assert_eq!(machine.current(), StateId::CameraRunning);
}

#[test]
fn stop_camera_cancels_the_session() {
    let mut machine = FlowMachine::new(
        StateTable::standard(),
        TestSurface::default(),
        ModalPrefs::default(),
    );
    machine.start();
    machine.transition(StateId::CameraRunning).unwrap();

    let mut cap = CaptureLoop::new(TargetGesture::ThumbsUp, ms(2000), ClassifierConfig::default());
    let frame = Frame::default();
    let held = thumbs_up_detection();
    let t0 = Instant::now();

    cap.tick(&mut machine, &frame, &held, t0);
    machine.press(ButtonId::StopCamera);
    assert_eq!(machine.current(), StateId::CameraStopped);
    assert!(!machine.surface().camera_on);

    assert_eq!(
        cap.tick(&mut machine, &frame, &held, t0 + ms(3000)),
        TickOutcome::Stopped
    );
    assert!(cap.capture().is_none());
}

#[test]
fn publish_fan_out_after_capture() {
    let mut machine = FlowMachine::new(
        StateTable::standard(),
        TestSurface::default(),
        ModalPrefs::default(),
    );
    machine.start();
    machine.transition(StateId::GestureDetected).unwrap();

    // Save opens its modal, then lands on the saved screen.
    machine.press(ButtonId::Save);
    assert_eq!(machine.current(), StateId::Save);
    machine.on_modal_closed(ModalId::Save);
    assert_eq!(machine.current(), StateId::SaveMode);

    // From there Upload, then Back to the welcome screen.
    machine.press(ButtonId::Upload);
    machine.on_modal_closed(ModalId::Upload);
    assert_eq!(machine.current(), StateId::UploadMode);
    machine.press(ButtonId::Back);
    assert_eq!(machine.current(), StateId::Initial);
}
