//! Bounded pool of short-lived decorative hearts.
//!
//! Trail and burst particles are the same thing: a position, a constant
//! velocity, a randomized lifetime, and derived scale/opacity curves. The
//! pool enforces a hard inclusive cap; spawn requests at capacity are
//! silently dropped, which is deliberate and load-shedding, not an error.

use crate::constants::{
    PARTICLE_BASE_SCALE_MIN, PARTICLE_BASE_SCALE_SPAN, PARTICLE_SHRINK, PARTICLE_TTL_MIN,
    PARTICLE_TTL_SPAN,
};
use glam::Vec3;
use rand::prelude::*;

/// Linear RGB tint cloned into each particle at spawn. Per-particle color
/// state is exclusive so fading one particle never affects another.
pub type Color = [f32; 3];

#[derive(Clone, Debug)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub rotation: Vec3,
    pub color: Color,
    pub base_scale: f32,
    age: f32,
    ttl: f32,
}

impl Particle {
    /// Fraction of the lifetime elapsed, clamped to [0,1].
    #[inline]
    pub fn life_fraction(&self) -> f32 {
        (self.age / self.ttl).clamp(0.0, 1.0)
    }

    /// Current render scale; particles shrink as they age.
    #[inline]
    pub fn scale(&self) -> f32 {
        (self.base_scale * (1.0 - PARTICLE_SHRINK * self.life_fraction())).max(0.001)
    }

    /// Current opacity under the configured falloff exponent.
    #[inline]
    pub fn opacity(&self, falloff: f32) -> f32 {
        (1.0 - self.life_fraction()).powf(falloff)
    }

    #[inline]
    fn expired(&self) -> bool {
        self.age >= self.ttl
    }
}

pub struct ParticleSystem {
    particles: Vec<Particle>,
    cap: usize,
    /// Opacity falloff exponent: 1.0 linear, 2.0 squared.
    pub falloff: f32,
    rng: StdRng,
}

impl ParticleSystem {
    pub fn new(cap: usize, falloff: f32, seed: u64) -> Self {
        Self {
            particles: Vec::with_capacity(cap),
            cap,
            falloff,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Spawn one particle, or silently reject when the pool is full.
    /// Returns whether a particle was actually created.
    pub fn spawn(&mut self, position: Vec3, velocity: Vec3, color: Color, size_mul: f32) -> bool {
        if self.particles.len() >= self.cap {
            return false;
        }
        let base = PARTICLE_BASE_SCALE_MIN + self.rng.gen::<f32>() * PARTICLE_BASE_SCALE_SPAN;
        let ttl = PARTICLE_TTL_MIN + self.rng.gen::<f32>() * PARTICLE_TTL_SPAN;
        let rotation = Vec3::new(
            (self.rng.gen::<f32>() - 0.5) * 0.4,
            (self.rng.gen::<f32>() - 0.5) * 0.6,
            (self.rng.gen::<f32>() - 0.5) * 0.6,
        );
        self.particles.push(Particle {
            position,
            velocity,
            rotation,
            color,
            base_scale: base * size_mul,
            age: 0.0,
            ttl,
        });
        true
    }

    /// Integrate every live particle and retire the ones whose lifetime
    /// elapsed this frame. Removal order is unspecified.
    pub fn advance(&mut self, dt: f32) {
        let mut i = 0;
        while i < self.particles.len() {
            let p = &mut self.particles[i];
            p.age += dt;
            if p.expired() {
                self.particles.swap_remove(i);
                continue;
            }
            p.position += p.velocity * dt;
            p.rotation.x += dt * 0.6;
            p.rotation.y += dt * 0.8;
            i += 1;
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}
