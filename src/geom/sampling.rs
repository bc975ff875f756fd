//! Stochastic direction samplers.
//!
//! Both samplers are rejection loops. They are bounded by
//! [`MAX_REJECTION_ATTEMPTS`] so that a broken generator or a non-finite
//! spread surfaces as [`SamplingError::Exhausted`] instead of hanging.

use rand::Rng;

use super::core::Vec3;

/// Upper bound on candidate draws for a single rejection-sampled value.
///
/// The narrowest accepted cone (`spread = 0.001`) keeps roughly one sphere
/// sample in two thousand, so this leaves several orders of magnitude of
/// headroom.
pub const MAX_REJECTION_ATTEMPTS: usize = 1_000_000;

/// Spreads below this return the cone axis itself.
pub const MIN_CONE_SPREAD: f64 = 0.001;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SamplingError {
    #[error("{sampler} found no acceptable sample after {attempts} attempts")]
    Exhausted {
        sampler: &'static str,
        attempts: usize,
    },
    #[error("cone axis has zero length")]
    DegenerateAxis,
}

/// Draws candidates until one satisfies `accept`, at most `max_attempts` times.
///
/// `draw` returns `None` for a candidate that cannot be used at all (for
/// example a zero vector that cannot be normalized); it counts as a rejected
/// attempt.
pub fn sample_until<T, D, A>(
    sampler: &'static str,
    max_attempts: usize,
    mut draw: D,
    mut accept: A,
) -> Result<T, SamplingError>
where
    D: FnMut() -> Result<Option<T>, SamplingError>,
    A: FnMut(&T) -> bool,
{
    for _ in 0..max_attempts {
        if let Some(candidate) = draw()? {
            if accept(&candidate) {
                return Ok(candidate);
            }
        }
    }
    log::warn!("{sampler}: giving up after {max_attempts} rejected samples");
    Err(SamplingError::Exhausted {
        sampler,
        attempts: max_attempts,
    })
}

/// Uniformly distributed unit vector.
///
/// Draws points in the `[-1, 1)` cube until one falls inside the unit ball,
/// then projects it onto the sphere. The projection happens inside the draw,
/// so every accepted sample is already unit length.
pub fn uniform_sphere_sample<R>(rng: &mut R) -> Result<Vec3, SamplingError>
where
    R: Rng + ?Sized,
{
    sample_until(
        "uniform_sphere_sample",
        MAX_REJECTION_ATTEMPTS,
        || {
            let candidate = Vec3::new(
                2.0 * rng.random::<f64>() - 1.0,
                2.0 * rng.random::<f64>() - 1.0,
                2.0 * rng.random::<f64>() - 1.0,
            );
            // points outside the ball or at its center are unusable draws
            Ok(if candidate.length() <= 1.0 {
                candidate.normalized()
            } else {
                None
            })
        },
        |_: &Vec3| true,
    )
}

/// Unit vector within the cone around `direction`.
///
/// `spread` is clamped to `[0, 1]` and accepted samples satisfy
/// `dot(sample, axis) >= 1 - spread`, i.e. the cone half-angle is
/// `acos(1 - spread)`. A spread below [`MIN_CONE_SPREAD`] returns the
/// normalized axis without consuming randomness.
pub fn uniform_cone_sample<R>(
    rng: &mut R,
    direction: Vec3,
    spread: f64,
) -> Result<Vec3, SamplingError>
where
    R: Rng + ?Sized,
{
    let axis = direction.normalized().ok_or(SamplingError::DegenerateAxis)?;
    let spread = spread.clamp(0.0, 1.0);

    if spread < MIN_CONE_SPREAD {
        return Ok(axis);
    }

    let min_alignment = 1.0 - spread;
    let mut cone_attempts = 0usize;
    sample_until(
        "uniform_cone_sample",
        MAX_REJECTION_ATTEMPTS,
        || {
            cone_attempts += 1;
            uniform_sphere_sample(rng).map(Some)
        },
        |sample: &Vec3| axis.dot(*sample) >= min_alignment,
    )
    .inspect(|_| {
        if cone_attempts > 1_000 {
            log::debug!(
                "uniform_cone_sample: accepted after {cone_attempts} attempts (spread {spread})"
            );
        }
    })
}
