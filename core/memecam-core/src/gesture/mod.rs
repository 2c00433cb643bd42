//! Gesture Hold Confirmation
//!
//! The external detector reports hand landmarks per frame; this module
//! reduces each frame to a boolean ("is the target gesture present?") and
//! debounces that boolean into a hold-to-confirm decision.
//!
//! # Module Structure
//!
//! - [`landmarks`]: landmark data types as delivered by the detector
//! - [`classify`]: frame boolean, including the multi-hand rejection rule
//! - [`hold`]: the idle → holding → confirmed debounce

pub mod classify;
pub mod hold;
pub mod landmarks;

pub use classify::{classify_frame, ClassifierConfig, TargetGesture};
pub use hold::{HoldConfirmer, HoldProgress, DEFAULT_HOLD_THRESHOLD};
pub use landmarks::{FrameDetection, HandDetection, HandLandmarks, Landmark, Point, LANDMARK_COUNT};
