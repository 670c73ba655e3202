//! The per-frame simulation loop.
//!
//! `HeartEngine` owns all simulation state explicitly: tracked hearts,
//! particle pool, trail emitter, burst controller, ambient drifters, and
//! the latest-value input slots the adapters write into. The host drives it
//! with `frame(dt)` once per rendered frame and reads the resulting
//! transforms out; adapters (gesture detector, microphone) push on their
//! own schedule and never block the loop.

use crate::ambient::AmbientField;
use crate::burst::BurstController;
use crate::config::EngineConfig;
use crate::constants::{
    DT_CLAMP_SEC, HEART_COLOR_LEFT, HEART_COLOR_RIGHT, TRAIL_BACK_OFFSET, TRAIL_BACK_SPEED,
    TRAIL_SPACING,
};
use crate::geometry::HeartTemplate;
use crate::gesture::{GestureFrame, HandSide, InputSlot};
use crate::particles::ParticleSystem;
use crate::projection::Projector;
use crate::tracked::TrackedObject;
use crate::trail::TrailEmitter;
use anyhow::Context;
use glam::Vec3;
use rand::prelude::*;
use std::sync::Arc;

pub struct HeartEngine {
    config: EngineConfig,
    pub projector: Projector,
    template: Arc<HeartTemplate>,
    objects: Vec<TrackedObject>,
    particles: ParticleSystem,
    trail: TrailEmitter,
    bursts: BurstController,
    ambient: AmbientField,
    // Jitter RNG for trail/burst velocity shaping; the particle pool and
    // ambient field carry their own, derived from the same base seed.
    rng: StdRng,
    gesture_slot: InputSlot<GestureFrame>,
    audio_level: f32,
}

impl HeartEngine {
    /// Build an engine with the given configuration. Fails only when the
    /// heart template cannot be generated; there is no point proceeding to
    /// render undefined geometry.
    pub fn new(config: EngineConfig, seed: u64) -> anyhow::Result<Self> {
        let template = Arc::new(
            HeartTemplate::generate().context("failed to generate heart template geometry")?,
        );
        log::info!(
            "heart template ready ({} vertices, {} hearts tracked)",
            template.vertices.len(),
            config.heart_count
        );

        let mut objects = Vec::with_capacity(config.heart_count);
        let starts = [
            (Vec3::new(-0.6, 0.0, config.plane_z), HEART_COLOR_LEFT),
            (Vec3::new(0.6, 0.0, config.plane_z), HEART_COLOR_RIGHT),
        ];
        for (pos, color) in starts.iter().take(config.heart_count.clamp(1, 2)) {
            objects.push(TrackedObject::new(*pos, config.neutral_scale, *color));
        }

        let particles = ParticleSystem::new(
            config.max_particles,
            config.opacity_falloff,
            derive_seed(seed, 1),
        );
        let projector = Projector::new(config.plane_z);
        Ok(Self {
            projector,
            template,
            objects,
            particles,
            trail: TrailEmitter::new(TRAIL_SPACING, TRAIL_BACK_OFFSET, TRAIL_BACK_SPEED),
            bursts: BurstController::new(),
            ambient: AmbientField::new(derive_seed(seed, 2)),
            rng: StdRng::seed_from_u64(derive_seed(seed, 0)),
            gesture_slot: InputSlot::default(),
            audio_level: 0.0,
            config,
        })
    }

    /// Adapter entry point: overwrite the pending gesture frame. Called from
    /// the detector's schedule; the frame loop consumes it on its next tick.
    pub fn publish_gesture(&mut self, frame: GestureFrame) {
        self.gesture_slot.publish(frame);
    }

    /// Adapter entry point: latest rolling-RMS loudness estimate.
    pub fn set_audio_level(&mut self, level: f32) {
        self.audio_level = level.max(0.0);
    }

    /// Advance the whole simulation by one frame. `dt` is clamped so a
    /// single slow frame cannot produce a jarring integration step.
    pub fn frame(&mut self, dt: f32) {
        let dt = dt.clamp(0.0, DT_CLAMP_SEC);

        if let Some(frame) = self.gesture_slot.take() {
            self.apply_gesture_frame(&frame);
        }

        self.bursts.tick(dt);
        for obj in &mut self.objects {
            obj.step(dt, self.config.smoothing_alpha);
        }

        for obj in &mut self.objects {
            if obj.visible() {
                let (acc, _) = self.trail.emit(
                    &mut self.particles,
                    &mut self.rng,
                    obj.smoothed_position,
                    obj.previous_position,
                    obj.trail_accumulator,
                    obj.color,
                );
                obj.trail_accumulator = acc;
                obj.previous_position = obj.smoothed_position;
            } else {
                obj.pin_trail();
            }
        }

        self.ambient.step(dt);

        // Blow check precedes fusion; independent cooldowns, so both may
        // fire within the same frame.
        self.bursts.check_blow(
            self.audio_level,
            &mut self.objects,
            &mut self.particles,
            &mut self.rng,
            &self.config,
        );
        self.bursts.check_fusion(
            &mut self.objects,
            &mut self.particles,
            &mut self.rng,
            &self.config,
        );

        self.particles.advance(dt);
    }

    fn apply_gesture_frame(&mut self, frame: &GestureFrame) {
        if frame.hands.is_empty() {
            if self.config.relax_scale_on_idle {
                for obj in &mut self.objects {
                    obj.relax_scale(&self.config);
                }
            }
            return;
        }
        for hand in &frame.hands {
            let index = if self.objects.len() >= 2 {
                match hand.side {
                    HandSide::Left => 0,
                    HandSide::Right => 1,
                }
            } else {
                0
            };
            if let Some(obj) = self.objects.get_mut(index) {
                obj.apply_gesture(hand, &self.projector, &self.config);
            }
        }
    }

    // ---------------- read-only surface for the render driver ----------------

    #[inline]
    pub fn template(&self) -> &Arc<HeartTemplate> {
        &self.template
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn objects(&self) -> &[TrackedObject] {
        &self.objects
    }

    #[inline]
    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    #[inline]
    pub fn ambient(&self) -> &AmbientField {
        &self.ambient
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.bursts.score()
    }

    #[inline]
    pub fn audio_level(&self) -> f32 {
        self.audio_level
    }
}

/// Derive independent subsystem seeds from one base seed so runs are
/// reproducible but subsystems do not share a stream.
#[inline]
fn derive_seed(seed: u64, index: u64) -> u64 {
    seed ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Wall-clock frame timer; works on both native and wasm targets via the
/// `instant` shim. Deltas are reported raw; `HeartEngine::frame` applies
/// the stability clamp.
pub struct FrameTimer {
    last: instant::Instant,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self {
            last: instant::Instant::now(),
        }
    }

    /// Seconds since the previous tick.
    pub fn tick(&mut self) -> f32 {
        let now = instant::Instant::now();
        let dt = (now - self.last).as_secs_f32();
        self.last = now;
        dt
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}
