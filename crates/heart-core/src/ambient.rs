//! Ambient drifter hearts: small pastel hearts that wander the background
//! and bounce off an invisible box. Purely decorative; they never interact
//! with tracking, bursts, or the score.

use crate::constants::{
    DRIFTER_BOUNCE_X, DRIFTER_BOUNCE_Y, DRIFTER_COLOR_LILAC, DRIFTER_COLOR_PINK,
    DRIFTER_SCALE_MIN, DRIFTER_SCALE_SPAN, DRIFTER_SPAWN_RATE_HZ, DRIFTER_SPAWN_X,
    DRIFTER_SPAWN_Y, DRIFTER_SPEED_X, DRIFTER_SPEED_Y, MAX_DRIFTERS,
};
use crate::particles::Color;
use glam::Vec3;
use rand::prelude::*;

#[derive(Clone, Debug)]
pub struct Drifter {
    pub position: Vec3,
    pub velocity: Vec3,
    pub scale: f32,
    pub spin: f32,
    pub color: Color,
}

pub struct AmbientField {
    drifters: Vec<Drifter>,
    rng: StdRng,
}

impl AmbientField {
    pub fn new(seed: u64) -> Self {
        Self {
            drifters: Vec::with_capacity(MAX_DRIFTERS),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Occasionally spawn a drifter (Poisson-ish, rate-limited per second)
    /// and advance the existing ones, reflecting off the bounce box.
    pub fn step(&mut self, dt: f32) {
        if self.drifters.len() < MAX_DRIFTERS && self.rng.gen::<f32>() < dt * DRIFTER_SPAWN_RATE_HZ
        {
            self.spawn();
        }
        for d in &mut self.drifters {
            d.position += d.velocity * dt;
            if d.position.x.abs() > DRIFTER_BOUNCE_X {
                d.velocity.x = -d.velocity.x;
            }
            if d.position.y.abs() > DRIFTER_BOUNCE_Y {
                d.velocity.y = -d.velocity.y;
            }
            d.spin += dt * 0.6;
        }
    }

    fn spawn(&mut self) {
        let color = if self.rng.gen::<bool>() {
            DRIFTER_COLOR_PINK
        } else {
            DRIFTER_COLOR_LILAC
        };
        let position = Vec3::new(
            (self.rng.gen::<f32>() * 2.0 - 1.0) * DRIFTER_SPAWN_X,
            (self.rng.gen::<f32>() * 2.0 - 1.0) * DRIFTER_SPAWN_Y,
            0.0,
        );
        let velocity = Vec3::new(
            (self.rng.gen::<f32>() - 0.5) * DRIFTER_SPEED_X,
            (self.rng.gen::<f32>() - 0.5) * DRIFTER_SPEED_Y,
            0.0,
        );
        self.drifters.push(Drifter {
            position,
            velocity,
            scale: DRIFTER_SCALE_MIN + self.rng.gen::<f32>() * DRIFTER_SCALE_SPAN,
            spin: 0.0,
            color,
        });
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.drifters.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.drifters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Drifter> {
        self.drifters.iter()
    }
}
