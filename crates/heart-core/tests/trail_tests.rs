use glam::Vec3;
use heart_core::particles::ParticleSystem;
use heart_core::trail::TrailEmitter;
use rand::prelude::*;

const RED: [f32; 3] = [1.0, 0.18, 0.43];

fn setup() -> (TrailEmitter, ParticleSystem, StdRng) {
    (
        TrailEmitter::new(0.10, 0.14, 0.10),
        ParticleSystem::new(4096, 1.0, 5),
        StdRng::seed_from_u64(5),
    )
}

#[test]
fn emission_count_is_distance_gated_not_frame_gated() {
    // Moving 0.35 units in one frame or in seven frames must spawn the
    // same number of particles: floor(0.35 / 0.10) = 3.
    let (trail, mut particles, mut rng) = setup();
    let (_, spawned) = trail.emit(
        &mut particles,
        &mut rng,
        Vec3::new(0.35, 0.0, 0.0),
        Vec3::ZERO,
        0.0,
        RED,
    );
    assert_eq!(spawned, 3, "single-frame move of 0.35");

    let (trail, mut particles, mut rng) = setup();
    let mut acc = 0.0;
    let mut total = 0;
    let mut prev = Vec3::ZERO;
    for i in 1..=7 {
        let curr = Vec3::new(0.05 * i as f32, 0.0, 0.0);
        let (new_acc, spawned) = trail.emit(&mut particles, &mut rng, curr, prev, acc, RED);
        acc = new_acc;
        total += spawned;
        prev = curr;
    }
    assert_eq!(total, 3, "same distance split over seven frames");
}

#[test]
fn accumulator_carries_between_frames() {
    let (trail, mut particles, mut rng) = setup();
    // 0.05 banked, then 0.08 more: floor(0.13 / 0.10) = 1.
    let (acc, spawned) = trail.emit(
        &mut particles,
        &mut rng,
        Vec3::new(0.08, 0.0, 0.0),
        Vec3::ZERO,
        0.05,
        RED,
    );
    assert_eq!(spawned, 1);
    assert!((acc - 0.03).abs() < 1e-5, "remainder stays banked, got {acc}");
}

#[test]
fn zero_displacement_spawns_nothing() {
    let (trail, mut particles, mut rng) = setup();
    let pos = Vec3::new(0.3, -0.2, 0.0);
    // Even with a large banked accumulator, a stationary object emits no
    // trail.
    let (acc, spawned) = trail.emit(&mut particles, &mut rng, pos, pos, 0.5, RED);
    assert_eq!(spawned, 0);
    assert!(particles.is_empty());
    assert!((acc - 0.5).abs() < 1e-6);
}

#[test]
fn particles_spawn_behind_the_direction_of_travel() {
    let (trail, mut particles, mut rng) = setup();
    let (_, spawned) = trail.emit(
        &mut particles,
        &mut rng,
        Vec3::new(0.2, 0.0, 0.0),
        Vec3::ZERO,
        0.0,
        RED,
    );
    assert_eq!(spawned, 1);
    let p = particles.iter().next().unwrap();
    assert!(
        (p.position.x - 0.06).abs() < 1e-5,
        "spawn offset behind +x travel, got {}",
        p.position.x
    );
    assert!(
        p.velocity.x < 0.0,
        "trail velocity opposes the direction of travel"
    );
}

#[test]
fn full_pool_drains_the_accumulator_without_error() {
    let trail = TrailEmitter::new(0.10, 0.14, 0.10);
    let mut particles = ParticleSystem::new(0, 1.0, 5);
    let mut rng = StdRng::seed_from_u64(5);
    let (acc, spawned) = trail.emit(
        &mut particles,
        &mut rng,
        Vec3::new(0.35, 0.0, 0.0),
        Vec3::ZERO,
        0.0,
        RED,
    );
    assert_eq!(spawned, 0, "capacity rejection is silent");
    assert!(acc < 0.10, "distance debt must not pile up against a full pool");
}
