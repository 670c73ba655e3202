use glam::Vec3;
use heart_core::particles::ParticleSystem;

const PINK: [f32; 3] = [1.0, 0.2, 0.4];

#[test]
fn cap_is_inclusive_and_rejection_is_silent() {
    let mut sys = ParticleSystem::new(5, 1.0, 7);
    for i in 0..5 {
        assert!(
            sys.spawn(Vec3::ZERO, Vec3::ZERO, PINK, 1.0),
            "spawn {i} should succeed below the cap"
        );
    }
    assert_eq!(sys.len(), 5);
    // At capacity the spawn is a no-op, not an error.
    assert!(!sys.spawn(Vec3::ZERO, Vec3::ZERO, PINK, 1.0));
    assert_eq!(sys.len(), 5, "rejected spawn must not change the count");
}

#[test]
fn life_fraction_stays_in_unit_range() {
    let mut sys = ParticleSystem::new(64, 1.0, 1);
    for _ in 0..20 {
        sys.spawn(Vec3::ZERO, Vec3::new(0.1, 0.2, 0.0), PINK, 1.0);
    }
    for _ in 0..200 {
        sys.advance(0.01);
        for p in sys.iter() {
            let f = p.life_fraction();
            assert!((0.0..=1.0).contains(&f), "life fraction out of range: {f}");
        }
    }
}

#[test]
fn particles_retire_once_lifetime_elapses() {
    let mut sys = ParticleSystem::new(64, 1.0, 3);
    for _ in 0..10 {
        sys.spawn(Vec3::ZERO, Vec3::ZERO, PINK, 1.0);
    }
    // Lifetimes are randomized strictly below one second, so a single
    // one-second step retires everything.
    sys.advance(1.0);
    assert!(sys.is_empty(), "all particles should be retired");
}

#[test]
fn position_integrates_velocity() {
    let mut sys = ParticleSystem::new(4, 1.0, 11);
    sys.spawn(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), PINK, 1.0);
    sys.advance(0.01);
    let p = sys.iter().next().expect("particle alive");
    assert!((p.position.x - 0.01).abs() < 1e-6);
    assert_eq!(p.position.y, 0.0);
}

#[test]
fn scale_starts_at_base_and_shrinks() {
    let mut sys = ParticleSystem::new(4, 1.0, 13);
    sys.spawn(Vec3::ZERO, Vec3::ZERO, PINK, 2.0);
    let p = sys.iter().next().unwrap();
    let base = p.base_scale;
    assert!(
        (0.52..0.76).contains(&base),
        "base scale band times multiplier, got {base}"
    );
    assert!((p.scale() - base).abs() < 1e-6, "fresh particle at full size");

    sys.advance(0.2);
    let p = sys.iter().next().unwrap();
    assert!(p.scale() < base, "aged particle should have shrunk");
}

#[test]
fn opacity_falloff_exponent_squares_the_linear_curve() {
    let mut sys = ParticleSystem::new(4, 1.0, 17);
    sys.spawn(Vec3::ZERO, Vec3::ZERO, PINK, 1.0);
    sys.advance(0.25);
    let p = sys.iter().next().unwrap();
    let linear = p.opacity(1.0);
    let squared = p.opacity(2.0);
    assert!(linear > 0.0 && linear < 1.0);
    assert!(
        (squared - linear * linear).abs() < 1e-6,
        "exponent 2 should square the linear falloff"
    );
    assert!(squared < linear, "squared falloff fades faster");
}
