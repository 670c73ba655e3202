use glam::Vec3;
use heart_core::config::EngineConfig;
use heart_core::gesture::pinch_normalized;
use heart_core::projection::{ray_plane_z, Projector};

#[test]
fn center_of_screen_projects_to_plane_origin() {
    let proj = Projector::new(0.0);
    let p = proj.screen_to_world(0.5, 0.5).expect("center must project");
    assert!(p.x.abs() < 1e-4, "x: {}", p.x);
    assert!(p.y.abs() < 1e-4, "y: {}", p.y);
    assert!(p.z.abs() < 1e-4, "z: {}", p.z);
}

#[test]
fn projection_lands_on_the_configured_plane() {
    let proj = Projector::new(0.2);
    let p = proj.screen_to_world(0.3, 0.7).expect("must project");
    assert!((p.z - 0.2).abs() < 1e-4, "z: {}", p.z);
}

#[test]
fn mirror_correction_is_symmetric() {
    // A detector point at x=0.2 must land where an unmirrored x=0.8 would:
    // the two inputs are reflections, so their world x coordinates negate.
    let proj = Projector::new(0.0);
    let left = proj.screen_to_world(0.2, 0.5).unwrap();
    let right = proj.screen_to_world(0.8, 0.5).unwrap();
    assert!(
        (left.x + right.x).abs() < 1e-4,
        "expected mirrored x, got {} and {}",
        left.x,
        right.x
    );
    assert!((left.y - right.y).abs() < 1e-4);
}

#[test]
fn detector_x_increases_leftward_in_world_space() {
    // The mirror means a hand moving right in the unmirrored detector frame
    // moves left on screen.
    let proj = Projector::new(0.0);
    let mut prev = proj.screen_to_world(0.0, 0.5).unwrap().x;
    for i in 1..=10 {
        let x = proj.screen_to_world(i as f32 / 10.0, 0.5).unwrap().x;
        assert!(x < prev, "world x should decrease as detector x grows");
        prev = x;
    }
}

#[test]
fn screen_y_down_maps_to_world_y_down() {
    let proj = Projector::new(0.0);
    let top = proj.screen_to_world(0.5, 0.1).unwrap();
    let bottom = proj.screen_to_world(0.5, 0.9).unwrap();
    assert!(top.y > bottom.y, "screen y grows downward");
}

#[test]
fn parallel_and_backward_rays_miss() {
    let parallel = ray_plane_z(Vec3::new(0.0, 0.0, 4.0), Vec3::new(1.0, 0.0, 0.0), 0.0);
    assert!(parallel.is_none(), "parallel ray must not intersect");

    let backward = ray_plane_z(Vec3::new(0.0, 0.0, 4.0), Vec3::new(0.0, 0.0, 1.0), 0.0);
    assert!(backward.is_none(), "plane behind the origin must not hit");

    let forward = ray_plane_z(Vec3::new(0.0, 0.0, 4.0), Vec3::new(0.0, 0.0, -1.0), 0.0)
        .expect("straight-on hit");
    assert_eq!(forward, Vec3::ZERO);
}

#[test]
fn pinch_to_scale_is_monotonic_and_clamped() {
    let config = EngineConfig::dual();
    let scale_at = |d: f32| {
        config.scale_for(pinch_normalized(d, config.pinch_low, config.pinch_high))
    };

    // At or below the low calibration edge: minimum scale.
    assert!((scale_at(0.0) - config.scale_min).abs() < 1e-6);
    assert!((scale_at(config.pinch_low) - config.scale_min).abs() < 1e-6);
    // At or above the high edge: maximum scale.
    assert!((scale_at(config.pinch_high) - config.scale_max).abs() < 1e-6);
    assert!((scale_at(0.5) - config.scale_max).abs() < 1e-6);

    // Strictly increasing inside the band.
    let mut prev = scale_at(config.pinch_low);
    for i in 1..=16 {
        let d = config.pinch_low + (config.pinch_high - config.pinch_low) * i as f32 / 16.0;
        let s = scale_at(d);
        assert!(s > prev, "scale not increasing at pinch distance {d}");
        prev = s;
    }

    // Midpoint interpolates linearly.
    let mid = scale_at(0.5 * (config.pinch_low + config.pinch_high));
    let expect = 0.5 * (config.scale_min + config.scale_max);
    assert!((mid - expect).abs() < 1e-5);
}

#[test]
fn preset_neutral_scale_lies_inside_its_scale_band() {
    // The relaxed size doubles as the respawn target and the burst size
    // ratio reference, so it must be reachable by the pinch mapping.
    for config in [EngineConfig::dual(), EngineConfig::solo()] {
        assert!(
            config.neutral_scale >= config.scale_min
                && config.neutral_scale <= config.scale_max,
            "neutral scale {} outside [{}, {}]",
            config.neutral_scale,
            config.scale_min,
            config.scale_max
        );
    }
}
