//! Scripted console run of the Memecam capture flow.
//!
//! Stands in for a real page host: renders to the log instead of a DOM,
//! synthesizes detector output instead of running inference, and advances a
//! virtual clock instead of waiting on a display refresh. Useful for
//! exercising the whole flow end to end from a terminal.

use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use memecam_core::gesture::landmarks::{HandDetection, HandLandmarks, Point, LANDMARK_COUNT};
use memecam_core::gesture::Landmark;
use memecam_core::{
    ButtonId, CaptureLoop, EnterAction, FlowMachine, FlowSurface, Frame, FrameDetection,
    MemecamConfig, ModalId, ModalPrefs, Result, Slot, StateId, StateTable, TargetGesture,
    TickOutcome, ViewType, Widget,
};

/// Frame cadence of the simulated display, ~60fps.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Parser)]
#[command(name = "memecam", about = "Scripted console run of the Memecam capture flow")]
struct Args {
    /// Hold duration in milliseconds before the capture fires.
    #[arg(long)]
    hold_ms: Option<u64>,

    /// Target gesture: thumbs_up or middle_finger.
    #[arg(long)]
    gesture: Option<String>,

    /// Honor "do not show again" for every modal instead of simulating a
    /// dismissal.
    #[arg(long)]
    skip_modals: bool,

    /// Leading frames with no hand in view before the gesture appears.
    #[arg(long, default_value_t = 30)]
    lead_frames: u64,
}

/// Renders the flow to the log.
#[derive(Default)]
struct ConsoleSurface {
    camera_on: bool,
}

impl FlowSurface for ConsoleSurface {
    fn apply_view(&mut self, view: ViewType) {
        info!(?view, "view surface");
    }

    fn set_messages(&mut self, top: &str, bottom: &str) {
        if !top.is_empty() {
            info!(message = top, "top message");
        }
        if !bottom.is_empty() {
            info!(message = bottom, "bottom message");
        }
    }

    fn hide_all(&mut self) {}

    fn show_widget(&mut self, slot: Slot, widget: Widget) -> Result<()> {
        info!(?slot, %widget, "widget shown");
        Ok(())
    }

    fn open_modal(&mut self, modal: ModalId) -> Result<()> {
        info!(%modal, "modal displayed");
        Ok(())
    }

    fn run_action(&mut self, action: EnterAction) {
        info!(%action, "on-enter action");
        match action {
            EnterAction::StartCamera => self.camera_on = true,
            EnterAction::StopCamera => self.camera_on = false,
            _ => {}
        }
    }
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    let mut config = MemecamConfig::load();
    if let Some(hold_ms) = args.hold_ms {
        config.hold_threshold_ms = hold_ms;
    }
    if let Some(gesture) = args.gesture.as_deref() {
        match TargetGesture::from_str(gesture) {
            Some(target) => config.target_gesture = target,
            None => {
                error!(gesture, "unknown gesture (expected thumbs_up or middle_finger)");
                return ExitCode::FAILURE;
            }
        }
    }

    let mut prefs = ModalPrefs::load();
    if args.skip_modals {
        for modal in [
            ModalId::Read,
            ModalId::Create,
            ModalId::Save,
            ModalId::Upload,
            ModalId::Send,
            ModalId::Share,
            ModalId::Donate,
        ] {
            prefs.set_skip(modal, true);
        }
    }

    info!(
        target = %config.target_gesture,
        hold_ms = config.hold_threshold_ms,
        "starting scripted session"
    );

    let mut machine = FlowMachine::new(StateTable::standard(), ConsoleSurface::default(), prefs);
    machine.start();

    // The visitor clicks "Create" and dismisses the intro modal.
    machine.press(ButtonId::Create);
    if let Some(modal) = machine.pending_modal() {
        info!(%modal, "dismissing modal");
        machine.on_modal_closed(modal);
    }

    if machine.current() != StateId::CameraRunning || !machine.surface().camera_on {
        error!(state = %machine.current(), "expected the camera to be running");
        return ExitCode::FAILURE;
    }

    let mut cap = CaptureLoop::new(
        config.target_gesture,
        config.hold_threshold(),
        config.classifier(),
    );
    let frame = Frame::new(640, 480, vec![0u8; 640 * 480 * 4]);
    let held = synthetic_detection(config.target_gesture);
    let empty = FrameDetection::empty();

    let hold_frames = config.hold_threshold().as_millis() as u64 / FRAME_INTERVAL.as_millis() as u64;
    let total_frames = args.lead_frames + hold_frames + 10;
    let t0 = Instant::now();

    let mut captured = false;
    for i in 0..=total_frames {
        let now = t0 + FRAME_INTERVAL * i as u32;
        let detection = if i < args.lead_frames { &empty } else { &held };
        match cap.tick(&mut machine, &frame, detection, now) {
            TickOutcome::Watching { remaining: Some(remaining) } if i % 15 == 0 => {
                info!(remaining_ms = remaining.as_millis() as u64, "holding gesture");
            }
            TickOutcome::Watching { .. } => {}
            TickOutcome::Captured => {
                captured = true;
                break;
            }
            TickOutcome::Stopped => {
                error!("capture loop stopped before confirmation");
                return ExitCode::FAILURE;
            }
        }
    }

    if !captured {
        error!("gesture never confirmed");
        return ExitCode::FAILURE;
    }

    let capture = cap.capture().expect("capture after confirmation");
    info!(
        width = capture.width,
        height = capture.height,
        captured_at = %capture.captured_at,
        "frame captured"
    );

    // Save the meme and return to the welcome screen.
    machine.press(ButtonId::Save);
    if let Some(modal) = machine.pending_modal() {
        machine.on_modal_closed(modal);
    }
    machine.press(ButtonId::Back);
    info!(state = %machine.current(), "session complete");
    ExitCode::SUCCESS
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Landmarks a real detector would produce for a cleanly held gesture.
fn synthetic_detection(target: TargetGesture) -> FrameDetection {
    let mut points = vec![Point::new(0.5, 0.5); LANDMARK_COUNT];
    match target {
        TargetGesture::ThumbsUp => {
            set(&mut points, Landmark::ThumbMcp, 0.6);
            set(&mut points, Landmark::ThumbIp, 0.5);
            set(&mut points, Landmark::ThumbTip, 0.4);
            for (tip, pip) in [
                (Landmark::IndexTip, Landmark::IndexPip),
                (Landmark::MiddleTip, Landmark::MiddlePip),
                (Landmark::RingTip, Landmark::RingPip),
                (Landmark::PinkyTip, Landmark::PinkyPip),
            ] {
                set(&mut points, pip, 0.5);
                set(&mut points, tip, 0.55);
            }
        }
        TargetGesture::MiddleFinger => {
            set(&mut points, Landmark::MiddlePip, 0.5);
            set(&mut points, Landmark::MiddleTip, 0.3);
            set(&mut points, Landmark::IndexPip, 0.5);
            set(&mut points, Landmark::IndexTip, 0.6);
        }
    }
    FrameDetection::single(HandDetection {
        landmarks: HandLandmarks::new(points),
        confidence: 0.9,
    })
}

fn set(points: &mut [Point], landmark: Landmark, y: f32) {
    points[landmark.index()] = Point::new(0.5, y);
}
