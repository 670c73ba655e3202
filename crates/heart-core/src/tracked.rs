//! Hand-tracked heart state.
//!
//! Each tracked heart follows its hand through one-pole low-pass filters on
//! position and scale; no velocity state is carried. A hide timer makes the
//! heart vanish after a burst and derives the visibility flag.

use crate::config::EngineConfig;
use crate::gesture::{pinch_normalized, HandDetection};
use crate::particles::Color;
use crate::projection::Projector;
use glam::Vec3;

#[derive(Clone, Debug)]
pub struct TrackedObject {
    pub target_position: Vec3,
    pub smoothed_position: Vec3,
    pub target_scale: f32,
    pub smoothed_scale: f32,
    /// Position at the end of the previous frame, for trail displacement.
    pub previous_position: Vec3,
    /// Distance debt owed to the trail emitter.
    pub trail_accumulator: f32,
    /// Seconds until the heart reappears; 0 means visible.
    hide_timer: f32,
    pub color: Color,
}

impl TrackedObject {
    pub fn new(position: Vec3, scale: f32, color: Color) -> Self {
        Self {
            target_position: position,
            smoothed_position: position,
            target_scale: scale,
            smoothed_scale: scale,
            previous_position: position,
            trail_accumulator: 0.0,
            hide_timer: 0.0,
            color,
        }
    }

    #[inline]
    pub fn visible(&self) -> bool {
        self.hide_timer <= 0.0
    }

    #[inline]
    pub fn hide_for(&mut self, seconds: f32) {
        self.hide_timer = seconds.max(0.0);
    }

    /// Update targets from one hand reading: pinch distance maps into the
    /// configured scale range, the palm centroid projects onto the gesture
    /// plane. A projection miss holds the previous target.
    pub fn apply_gesture(
        &mut self,
        hand: &HandDetection,
        projector: &Projector,
        config: &EngineConfig,
    ) {
        let pinch = pinch_normalized(hand.pinch_distance(), config.pinch_low, config.pinch_high);
        self.target_scale = config.scale_for(pinch);
        let centroid = hand.palm_centroid();
        if let Some(world) = projector.screen_to_world(centroid.x, centroid.y) {
            self.target_position = world;
        }
    }

    /// Relax the scale target to the neutral size (idle-hand behavior in
    /// the dual configuration).
    pub fn relax_scale(&mut self, config: &EngineConfig) {
        self.target_scale = config.neutral_scale;
    }

    /// Advance timers and smoothing by one frame. The smoothing factor is
    /// applied exactly once per rendered frame.
    pub fn step(&mut self, dt: f32, alpha: f32) {
        self.hide_timer = (self.hide_timer - dt).max(0.0);
        self.smoothed_position = self
            .smoothed_position
            .lerp(self.target_position, alpha);
        self.smoothed_scale += (self.target_scale - self.smoothed_scale) * alpha;
    }

    /// Pin the trail baseline to the current position and drop any banked
    /// distance, so no spurious trail spans a hide-then-show transition.
    pub fn pin_trail(&mut self) {
        self.previous_position = self.smoothed_position;
        self.trail_accumulator = 0.0;
    }

    /// Current size relative to the neutral size, clamped to a band. Used
    /// to scale burst particles so bigger hearts burst bigger.
    pub fn relative_scale(&self, neutral: f32, lo: f32, hi: f32) -> f32 {
        (self.smoothed_scale / neutral).clamp(lo, hi)
    }
}
