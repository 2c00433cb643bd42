//! # memecam-core
//!
//! Core library for Memecam: a webcam meme flow where a visitor performs a
//! hand gesture, holds it long enough to confirm intent, and the confirmed
//! frame becomes the meme they edit and publish.
//!
//! ## Design Principles
//!
//! - **Synchronous**: No async runtime dependency. Hosts drive the machine
//!   from their own event loop and tick the capture loop per display refresh.
//! - **Not thread-safe**: Single UI thread assumed; hosts provide their own
//!   synchronization if they need it.
//! - **Graceful degradation**: Unknown states, missing modals, and missing
//!   render targets are logged and recovered, never fatal to the page.
//! - **Host-agnostic**: Rendering and side effects go through the
//!   [`FlowSurface`] trait; inference stays in the host's detector.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use memecam_core::{FlowMachine, ModalPrefs, StateTable};
//!
//! let mut machine = FlowMachine::new(StateTable::standard(), surface, ModalPrefs::load());
//! machine.start();
//! machine.press(ButtonId::Create);
//! ```

// Public modules
pub mod capture;
pub mod config;
pub mod error;
pub mod flow;
pub mod gesture;
pub mod prefs;
pub mod types;

// Re-export commonly used items at crate root
pub use capture::{Capture, CaptureLoop, Frame, GestureSession, TickOutcome};
pub use config::MemecamConfig;
pub use error::{MemecamError, Result};
pub use flow::{FlowMachine, FlowState, FlowSurface, StateTable};
pub use gesture::{
    classify_frame, ClassifierConfig, FrameDetection, HandDetection, HandLandmarks, HoldConfirmer,
    HoldProgress, TargetGesture,
};
pub use prefs::ModalPrefs;
pub use types::{
    ButtonId, ControlId, EnterAction, ModalId, Slot, StateId, ViewType, Widget,
};
