//! Hand landmark data as delivered by the external detector.
//!
//! Coordinates are normalized image coordinates: x grows rightward, y grows
//! downward, so a fingertip *above* its joint has a *smaller* y. The core
//! never runs inference itself; hosts feed in whatever their detector
//! produced, one [`FrameDetection`] per video frame.

use serde::{Deserialize, Serialize};

/// Number of landmarks the detector reports per hand.
pub const LANDMARK_COUNT: usize = 21;

/// A normalized 2D landmark position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Named landmark indices for the joints the classifier consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landmark {
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexPip,
    IndexTip,
    MiddlePip,
    MiddleTip,
    RingPip,
    RingTip,
    PinkyPip,
    PinkyTip,
}

impl Landmark {
    /// Index into the 21-point landmark array.
    pub fn index(&self) -> usize {
        match self {
            Landmark::ThumbMcp => 2,
            Landmark::ThumbIp => 3,
            Landmark::ThumbTip => 4,
            Landmark::IndexPip => 6,
            Landmark::IndexTip => 8,
            Landmark::MiddlePip => 10,
            Landmark::MiddleTip => 12,
            Landmark::RingPip => 14,
            Landmark::RingTip => 16,
            Landmark::PinkyPip => 18,
            Landmark::PinkyTip => 20,
        }
    }
}

/// The landmark set for a single detected hand.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HandLandmarks {
    points: Vec<Point>,
}

impl HandLandmarks {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Whether the detector delivered a complete landmark set.
    pub fn is_complete(&self) -> bool {
        self.points.len() >= LANDMARK_COUNT
    }

    pub fn get(&self, landmark: Landmark) -> Option<Point> {
        self.points.get(landmark.index()).copied()
    }
}

/// One detected hand: its landmarks plus the detector's confidence score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HandDetection {
    pub landmarks: HandLandmarks,
    pub confidence: f32,
}

/// Everything the detector found in one video frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameDetection {
    pub hands: Vec<HandDetection>,
}

impl FrameDetection {
    /// A frame with no hands at all.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(hand: HandDetection) -> Self {
        Self { hands: vec![hand] }
    }
}
