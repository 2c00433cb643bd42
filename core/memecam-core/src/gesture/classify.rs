//! Per-frame gesture classification over hand landmarks.
//!
//! Reduces a [`FrameDetection`] to a single boolean: is the target gesture
//! present on this frame? Ambiguous frames are rejected outright — more than
//! one hand in view counts as absent, so a crowd of hands can never trigger a
//! capture. The boolean feeds the hold confirmer; flicker suppression happens
//! there, not here.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::landmarks::{FrameDetection, HandLandmarks, Landmark, Point};

/// Which gesture a page is hunting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetGesture {
    #[default]
    ThumbsUp,
    MiddleFinger,
}

impl TargetGesture {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetGesture::ThumbsUp => "thumbs_up",
            TargetGesture::MiddleFinger => "middle_finger",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "thumbs_up" => Some(TargetGesture::ThumbsUp),
            "middle_finger" => Some(TargetGesture::MiddleFinger),
            _ => None,
        }
    }
}

impl std::fmt::Display for TargetGesture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geometry tolerances for the finger-extension checks, in normalized image
/// units. Tuning varied across revisions of the source material, so these are
/// configuration rather than constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Detections scoring below this count as absent.
    pub min_confidence: f32,
    /// How far a fingertip must rise above its PIP joint to count as
    /// extended.
    pub extension_tolerance: f32,
    /// How far a fingertip must drop below its PIP joint to count as folded.
    pub fold_tolerance: f32,
    /// When tip and PIP are this close vertically the finger is treated as
    /// obscured and assumed folded.
    pub obscured_threshold: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.5,
            extension_tolerance: 0.05,
            fold_tolerance: 0.025,
            obscured_threshold: 0.03,
        }
    }
}

/// Classifies one frame's detections against the target gesture.
///
/// Rejection rules, applied before any geometry:
/// - zero hands: absent
/// - more than one hand: absent (ambiguous frame, even if one hand matches)
/// - confidence below the cutoff: absent
/// - incomplete landmark set: absent
pub fn classify_frame(
    detection: &FrameDetection,
    target: TargetGesture,
    config: &ClassifierConfig,
) -> bool {
    let hand = match detection.hands.as_slice() {
        [hand] => hand,
        [] => return false,
        hands => {
            debug!(count = hands.len(), "rejecting ambiguous multi-hand frame");
            return false;
        }
    };

    if hand.confidence < config.min_confidence {
        debug!(confidence = hand.confidence, "rejecting low-confidence hand");
        return false;
    }
    if !hand.landmarks.is_complete() {
        return false;
    }

    match target {
        TargetGesture::MiddleFinger => middle_finger_held(&hand.landmarks, config),
        TargetGesture::ThumbsUp => thumbs_up_held(&hand.landmarks, config),
    }
}

/// Middle finger clearly extended while the index finger is folded. An index
/// finger whose tip sits almost on its PIP joint is treated as obscured by
/// the middle finger and counts as folded.
fn middle_finger_held(landmarks: &HandLandmarks, config: &ClassifierConfig) -> bool {
    let Some((middle_tip, middle_pip)) = pair(landmarks, Landmark::MiddleTip, Landmark::MiddlePip)
    else {
        return false;
    };
    let Some((index_tip, index_pip)) = pair(landmarks, Landmark::IndexTip, Landmark::IndexPip)
    else {
        return false;
    };

    let middle_extended = middle_tip.y < middle_pip.y - config.extension_tolerance;

    let index_gap = index_tip.y - index_pip.y;
    let index_folded = if index_gap.abs() < config.obscured_threshold {
        // Tip roughly level with the joint: obscured, assume folded.
        true
    } else {
        index_tip.y > index_pip.y + config.fold_tolerance
    };

    middle_extended && index_folded
}

/// Thumb extended upward through both segments while the four fingers stay
/// curled.
fn thumbs_up_held(landmarks: &HandLandmarks, config: &ClassifierConfig) -> bool {
    let Some(thumb_tip) = landmarks.get(Landmark::ThumbTip) else {
        return false;
    };
    let Some(thumb_ip) = landmarks.get(Landmark::ThumbIp) else {
        return false;
    };
    let Some(thumb_mcp) = landmarks.get(Landmark::ThumbMcp) else {
        return false;
    };

    let thumb_extended = thumb_tip.y < thumb_ip.y - config.extension_tolerance
        && thumb_ip.y < thumb_mcp.y - config.extension_tolerance;
    if !thumb_extended {
        return false;
    }

    let fingers = [
        (Landmark::IndexTip, Landmark::IndexPip),
        (Landmark::MiddleTip, Landmark::MiddlePip),
        (Landmark::RingTip, Landmark::RingPip),
        (Landmark::PinkyTip, Landmark::PinkyPip),
    ];
    fingers.iter().all(|&(tip, pip)| {
        match pair(landmarks, tip, pip) {
            Some((tip, pip)) => tip.y >= pip.y,
            None => false,
        }
    })
}

fn pair(landmarks: &HandLandmarks, a: Landmark, b: Landmark) -> Option<(Point, Point)> {
    Some((landmarks.get(a)?, landmarks.get(b)?))
}
