//! Hand-gesture input types.
//!
//! A detector (MediaPipe-style) runs on its own schedule and publishes whole
//! frames of hand detections into a single latest-value slot; the engine
//! consumes whatever is newest once per rendered frame. Absence of a frame
//! is a valid steady state, never an error.

use glam::Vec2;
use smallvec::SmallVec;

/// Number of landmarks per detected hand (MediaPipe hand topology).
pub const LANDMARK_COUNT: usize = 21;

// Landmark indices used by the engine.
pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
pub const INDEX_KNUCKLE: usize = 5;
pub const MIDDLE_KNUCKLE: usize = 9;
pub const RING_KNUCKLE: usize = 13;
pub const PINKY_KNUCKLE: usize = 17;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandSide {
    Left,
    Right,
}

/// One detected hand: ordered normalized landmarks in [0,1]x[0,1] detector
/// space (unmirrored) plus the detector's side label.
#[derive(Clone, Debug)]
pub struct HandDetection {
    pub side: HandSide,
    pub landmarks: [Vec2; LANDMARK_COUNT],
}

impl HandDetection {
    /// Thumb-tip to index-fingertip distance in normalized screen space.
    /// Drives the pinch-to-scale mapping.
    pub fn pinch_distance(&self) -> f32 {
        self.landmarks[THUMB_TIP].distance(self.landmarks[INDEX_TIP])
    }

    /// Centroid of the wrist and the four base knuckles; a stable palm
    /// anchor that jitters less than any single landmark.
    pub fn palm_centroid(&self) -> Vec2 {
        let sum = self.landmarks[WRIST]
            + self.landmarks[INDEX_KNUCKLE]
            + self.landmarks[MIDDLE_KNUCKLE]
            + self.landmarks[RING_KNUCKLE]
            + self.landmarks[PINKY_KNUCKLE];
        sum / 5.0
    }
}

/// All detections from one detector pass. Zero hands is a valid frame and
/// is distinct from "no new frame arrived".
#[derive(Clone, Debug, Default)]
pub struct GestureFrame {
    pub hands: SmallVec<[HandDetection; 2]>,
}

/// Normalize a pinch distance into [0,1] against a calibration band.
/// Values at or outside the band clamp to its edges.
#[inline]
pub fn pinch_normalized(distance: f32, low: f32, high: f32) -> f32 {
    ((distance - low) / (high - low)).clamp(0.0, 1.0)
}

/// Single-slot latest-value cell shared between an input producer and the
/// frame loop. Producers overwrite; the loop takes. No queueing, no
/// backpressure.
#[derive(Debug, Default)]
pub struct InputSlot<T> {
    value: Option<T>,
}

impl<T> InputSlot<T> {
    pub fn publish(&mut self, value: T) {
        self.value = Some(value);
    }

    pub fn take(&mut self) -> Option<T> {
        self.value.take()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }
}
