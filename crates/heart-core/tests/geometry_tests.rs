use heart_core::ambient::AmbientField;
use heart_core::geometry::{heart_outline, HeartTemplate, HEART_DEPTH};
use heart_core::MAX_DRIFTERS;

#[test]
fn template_generation_produces_a_well_formed_mesh() {
    let template = HeartTemplate::generate().expect("default template");
    assert!(!template.vertices.is_empty());
    assert_eq!(template.indices.len() % 3, 0, "triangle list");

    let max_index = *template.indices.iter().max().unwrap() as usize;
    assert!(max_index < template.vertices.len(), "indices in range");

    let half = HEART_DEPTH * 0.5;
    for v in &template.vertices {
        for c in v.position {
            assert!(c.is_finite());
        }
        assert!(
            v.position[2].abs() <= half + 1e-6,
            "extrusion centered on z=0"
        );
    }
}

#[test]
fn outline_is_heart_shaped_and_bounded() {
    let outline = heart_outline(260);
    assert_eq!(outline.len(), 260);
    for p in &outline {
        assert!(p.x.abs() <= 0.8, "outline x out of range: {}", p.x);
        assert!(p.y.abs() <= 1.0, "outline y out of range: {}", p.y);
    }
    // The lobes put points on both sides of the y axis.
    assert!(outline.iter().any(|p| p.x > 0.3));
    assert!(outline.iter().any(|p| p.x < -0.3));
}

#[test]
fn degenerate_parameters_fail_generation() {
    assert!(HeartTemplate::with_resolution(2, HEART_DEPTH).is_err());
    assert!(HeartTemplate::with_resolution(64, 0.0).is_err());
    let err = HeartTemplate::with_resolution(1, HEART_DEPTH).unwrap_err();
    assert!(err.to_string().contains("degenerate"));
}

#[test]
fn drifters_stay_bounded_in_count_and_space() {
    let mut field = AmbientField::new(9);
    for _ in 0..600 {
        field.step(0.033);
        assert!(field.len() <= MAX_DRIFTERS);
        for d in field.iter() {
            assert!(d.position.x.abs() < 1.7, "x escaped: {}", d.position.x);
            assert!(d.position.y.abs() < 1.1, "y escaped: {}", d.position.y);
        }
    }
    assert!(
        !field.is_empty(),
        "twenty simulated seconds should spawn drifters"
    );
}
