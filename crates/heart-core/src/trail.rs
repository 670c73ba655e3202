//! Distance-gated trail emission.
//!
//! Frame-to-frame displacement of a tracked heart is banked into a distance
//! accumulator; every `spacing` world units of travel spawns one particle
//! slightly behind the direction of motion. Gating on distance rather than
//! time keeps the spatial density of the trail independent of frame rate.

use crate::particles::{Color, ParticleSystem};
use glam::Vec3;
use rand::prelude::*;

#[derive(Clone, Debug)]
pub struct TrailEmitter {
    /// World units of travel per spawned particle.
    pub spacing: f32,
    /// How far behind the direction of travel particles appear.
    pub back_offset: f32,
    /// Velocity component opposing the direction of travel.
    pub back_speed: f32,
}

impl TrailEmitter {
    pub fn new(spacing: f32, back_offset: f32, back_speed: f32) -> Self {
        Self {
            spacing,
            back_offset,
            back_speed,
        }
    }

    /// Bank this frame's displacement and spawn any particles the
    /// accumulator now covers. Returns the remaining accumulator and the
    /// number of particles spawned (capacity rejections still drain the
    /// accumulator so a full pool does not bank an emission debt).
    pub fn emit(
        &self,
        particles: &mut ParticleSystem,
        rng: &mut StdRng,
        current: Vec3,
        previous: Vec3,
        mut accumulator: f32,
        color: Color,
    ) -> (f32, usize) {
        let delta = current - previous;
        let moved = delta.length();
        accumulator += moved;

        if moved <= 1e-6 {
            // Zero displacement never crosses the threshold on its own.
            return (accumulator, 0);
        }

        let dir = delta / moved;
        let mut spawned = 0;
        while accumulator > self.spacing {
            accumulator -= self.spacing;
            let spawn_pos = current - dir * self.back_offset;
            let vel = Vec3::new(
                (rng.gen::<f32>() - 0.5) * 0.02,
                0.02 + rng.gen::<f32>() * 0.04,
                (rng.gen::<f32>() - 0.5) * 0.015,
            ) - dir * self.back_speed;
            if particles.spawn(spawn_pos, vel, color, 1.0) {
                spawned += 1;
            }
        }
        (accumulator, spawned)
    }
}
