use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::geom::{Vec3, uniform_cone_sample, uniform_sphere_sample};

#[test]
fn sphere_samples_have_unit_length() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    for _ in 0..2_000 {
        let v = uniform_sphere_sample(&mut rng).unwrap();
        assert!((v.length() - 1.0).abs() < 1e-12);
    }
}

#[test]
fn sphere_samples_cover_both_hemispheres() {
    let mut rng = StdRng::seed_from_u64(11);
    let samples: Vec<Vec3> = (0..500)
        .map(|_| uniform_sphere_sample(&mut rng).unwrap())
        .collect();
    for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
        assert!(samples.iter().any(|s| s.dot(axis) > 0.5));
        assert!(samples.iter().any(|s| s.dot(axis) < -0.5));
    }
    let mean = samples
        .iter()
        .fold(Vec3::ZERO, |acc, s| acc + *s)
        .mul_scalar(1.0 / samples.len() as f64);
    assert!(mean.length() < 0.15);
}

#[test]
fn cone_samples_stay_inside_cone() {
    let mut rng = StdRng::seed_from_u64(3);
    let axis = Vec3::new(1.0, -1.0, 0.5);
    let unit_axis = axis.normalized().unwrap();
    let spread = std::f64::consts::FRAC_1_SQRT_2;
    for _ in 0..1_000 {
        let s = uniform_cone_sample(&mut rng, axis, spread).unwrap();
        assert!((s.length() - 1.0).abs() < 1e-12);
        assert!(s.dot(unit_axis) >= 1.0 - spread);
    }
}

#[test]
fn full_spread_keeps_the_forward_hemisphere() {
    let mut rng = StdRng::seed_from_u64(42);
    let axis = Vec3::new(0.0, 0.0, -2.0);
    let samples: Vec<Vec3> = (0..400)
        .map(|_| uniform_cone_sample(&mut rng, axis, 1.0).unwrap())
        .collect();
    assert!(samples.iter().all(|s| s.z <= 0.0));
    assert!(samples.iter().any(|s| s.z > -0.1));
}

#[test]
fn oversized_spread_is_clamped_to_one() {
    let axis = Vec3::new(1.0, 2.0, 3.0);
    let mut wide = StdRng::seed_from_u64(5);
    let mut clamped = StdRng::seed_from_u64(5);
    for _ in 0..100 {
        assert_eq!(
            uniform_cone_sample(&mut wide, axis, 7.0).unwrap(),
            uniform_cone_sample(&mut clamped, axis, 1.0).unwrap()
        );
    }
}

#[test]
fn narrow_spread_still_terminates() {
    let mut rng = StdRng::seed_from_u64(99);
    let s = uniform_cone_sample(&mut rng, Vec3::Y, 0.002).unwrap();
    assert!(s.dot(Vec3::Y) >= 0.998);
}
