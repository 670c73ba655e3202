//! Cooldown-gated burst events: breath-triggered blows and the two-heart
//! fusion. Each trigger owns an independent cooldown; the blow check runs
//! before the fusion check every frame and both may fire in the same frame.

use crate::config::EngineConfig;
use crate::constants::{
    BURST_COOLDOWN_SEC, BURST_HIDE_SEC, BURST_SHRINK_FACTOR, BURST_SIZE_MUL_MAX,
    BURST_SIZE_MUL_MIN, FUSION_SCORE_INCREMENT, FUSION_SIZE_MUL_MAX, FUSION_SIZE_MUL_MIN,
    MERGE_COOLDOWN_MARGIN, MERGE_DISTANCE, MERGE_HIDE_SEC,
};
use crate::particles::{Color, ParticleSystem};
use crate::tracked::TrackedObject;
use glam::Vec3;
use rand::prelude::*;

#[derive(Debug, Default)]
pub struct BurstController {
    burst_cooldown: f32,
    merge_cooldown: f32,
    score: u32,
}

impl BurstController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Monotonic fusion score, incremented only by fusion events.
    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn tick(&mut self, dt: f32) {
        self.burst_cooldown = (self.burst_cooldown - dt).max(0.0);
        self.merge_cooldown = (self.merge_cooldown - dt).max(0.0);
    }

    /// Blow burst: loudness over the threshold while re-armed bursts every
    /// tracked heart, hides it, and shrinks its scale target so it returns
    /// smaller. Returns whether a burst fired.
    pub fn check_blow(
        &mut self,
        audio_level: f32,
        objects: &mut [TrackedObject],
        particles: &mut ParticleSystem,
        rng: &mut StdRng,
        config: &EngineConfig,
    ) -> bool {
        if audio_level <= config.blow_threshold || self.burst_cooldown > 0.0 {
            return false;
        }
        self.burst_cooldown = BURST_COOLDOWN_SEC;
        log::debug!("blow burst at level {audio_level:.3}");
        for obj in objects.iter_mut() {
            let size_mul =
                obj.relative_scale(config.neutral_scale, BURST_SIZE_MUL_MIN, BURST_SIZE_MUL_MAX);
            radial_burst(
                particles,
                rng,
                obj.smoothed_position,
                obj.color,
                config.burst_count,
                size_mul,
            );
            obj.hide_for(BURST_HIDE_SEC);
            obj.target_scale = config.neutral_scale * BURST_SHRINK_FACTOR;
        }
        true
    }

    /// Fusion burst: both hearts visible and close while re-armed produces
    /// one two-color burst at their midpoint, hides both, and scores. The
    /// cooldown outlasts the hide time so respawn cannot retrigger.
    pub fn check_fusion(
        &mut self,
        objects: &mut [TrackedObject],
        particles: &mut ParticleSystem,
        rng: &mut StdRng,
        config: &EngineConfig,
    ) -> bool {
        if !config.fusion_enabled || objects.len() < 2 || self.merge_cooldown > 0.0 {
            return false;
        }
        let (a, b) = match objects {
            [a, b, ..] => (a, b),
            _ => return false,
        };
        if !a.visible() || !b.visible() {
            return false;
        }
        let dist = a.smoothed_position.distance(b.smoothed_position);
        if dist >= MERGE_DISTANCE {
            return false;
        }

        let mid = (a.smoothed_position + b.smoothed_position) * 0.5;
        let size_mul = ((a.smoothed_scale / config.neutral_scale
            + b.smoothed_scale / config.neutral_scale)
            * 0.5)
            .clamp(FUSION_SIZE_MUL_MIN, FUSION_SIZE_MUL_MAX);
        log::debug!("fusion burst at {mid} (distance {dist:.3})");
        radial_burst(particles, rng, mid, a.color, config.burst_count, size_mul);
        radial_burst(particles, rng, mid, b.color, config.burst_count, size_mul);
        a.hide_for(MERGE_HIDE_SEC);
        b.hide_for(MERGE_HIDE_SEC);
        self.score += FUSION_SCORE_INCREMENT;
        self.merge_cooldown = MERGE_HIDE_SEC + MERGE_COOLDOWN_MARGIN;
        true
    }
}

/// Spawn `count` particles in a radial cone with an upward bias. Spawns
/// beyond the pool cap are dropped by the pool itself.
pub fn radial_burst(
    particles: &mut ParticleSystem,
    rng: &mut StdRng,
    origin: Vec3,
    color: Color,
    count: usize,
    size_mul: f32,
) {
    for _ in 0..count {
        let angle = rng.gen::<f32>() * std::f32::consts::TAU;
        let radial = 0.65 + rng.gen::<f32>() * 1.25;
        let up = 0.2 + rng.gen::<f32>() * 0.7 + rng.gen::<f32>() * 0.45;
        let vel = Vec3::new(angle.cos() * radial, up, angle.sin() * radial) * 1.35;
        particles.spawn(origin, vel, color, size_mul);
    }
}
