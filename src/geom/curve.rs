use super::core::{Point3, Tolerance, Vec3};

/// Step used by [`tangent_on_spline`] for its forward difference.
pub const SPLINE_TANGENT_STEP: f64 = 1e-5;

pub trait Curve3 {
    fn point_at(&self, t: f64) -> Point3;

    #[must_use]
    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    #[must_use]
    fn derivative_at(&self, t: f64) -> Vec3 {
        let (a, b) = self.domain();
        let span = b - a;
        if !span.is_finite() || span == 0.0 {
            return Vec3::ZERO;
        }

        let h = 1e-6 * span.abs();
        let t0 = (t - h).max(a);
        let t1 = (t + h).min(b);
        if t1 == t0 {
            return Vec3::ZERO;
        }

        let p0 = self.point_at(t0);
        let p1 = self.point_at(t1);
        p1.sub_point(p0).mul_scalar(1.0 / (t1 - t0))
    }

    /// Returns the unit tangent vector at parameter `t`.
    /// Returns `None` if the derivative is zero or degenerate.
    #[must_use]
    fn tangent_at(&self, t: f64) -> Option<Vec3> {
        self.derivative_at(t).normalized()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Bézier curve of arbitrary degree
// ─────────────────────────────────────────────────────────────────────────────

/// Bézier curve whose degree is one less than its control point count.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BezierCurve3 {
    control_points: Vec<Point3>,
}

impl BezierCurve3 {
    #[must_use]
    pub fn new(control_points: Vec<Point3>) -> Self {
        Self { control_points }
    }

    #[must_use]
    pub fn control_points(&self) -> &[Point3] {
        &self.control_points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.control_points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.control_points.is_empty()
    }

    #[must_use]
    pub fn degree(&self) -> usize {
        self.control_points.len().saturating_sub(1)
    }

    #[must_use]
    pub fn first(&self) -> Option<Point3> {
        self.control_points.first().copied()
    }

    #[must_use]
    pub fn last(&self) -> Option<Point3> {
        self.control_points.last().copied()
    }

    /// The final two control points, in order. `None` below two points.
    #[must_use]
    pub fn last_two(&self) -> Option<(Point3, Point3)> {
        match self.control_points.as_slice() {
            [.., a, b] => Some((*a, *b)),
            _ => None,
        }
    }

    /// Replaces every control point by `f(point)`.
    #[must_use]
    pub fn map_points<F>(self, f: F) -> Self
    where
        F: FnMut(Point3) -> Point3,
    {
        Self::new(self.control_points.into_iter().map(f).collect())
    }
}

impl Curve3 for BezierCurve3 {
    fn point_at(&self, t: f64) -> Point3 {
        point_on_spline(&self.control_points, t)
    }

    /// Hodograph evaluation: `n * Σ (P[i+1] - P[i]) * B(n-1, i, t)`.
    fn derivative_at(&self, t: f64) -> Vec3 {
        let n = self.degree();
        if n == 0 {
            return Vec3::ZERO;
        }
        let t = t.clamp(0.0, 1.0);
        let degree = n as f64;
        self.control_points
            .windows(2)
            .enumerate()
            .fold(Vec3::ZERO, |acc, (i, pair)| {
                let weight = bernstein(n - 1, i, t) * degree;
                acc.add(pair[1].sub_point(pair[0]).mul_scalar(weight))
            })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Bernstein blending
// ─────────────────────────────────────────────────────────────────────────────

/// Binomial coefficient `C(n, k)`.
///
/// Evaluated exactly in integer arithmetic; only when the exact value no
/// longer fits in `u128` does it fall back to a floating product.
#[must_use]
pub fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut exact: u128 = 1;
    for i in 0..k {
        // exact == C(n, i) here, so the division below never truncates
        match exact.checked_mul((n - i) as u128) {
            Some(scaled) => exact = scaled / (i as u128 + 1),
            None => return binomial_approx(n, k),
        }
    }
    exact as f64
}

fn binomial_approx(n: usize, k: usize) -> f64 {
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

/// Bernstein basis polynomial `C(n, i) * (1 - t)^(n - i) * t^i`.
#[must_use]
pub fn bernstein(n: usize, i: usize, t: f64) -> f64 {
    if i > n {
        return 0.0;
    }
    binomial(n, i) * (1.0 - t).powi(exponent(n - i)) * t.powi(exponent(i))
}

fn exponent(power: usize) -> i32 {
    i32::try_from(power).unwrap_or(i32::MAX)
}

/// Evaluates the Bézier curve defined by `points` at `t` (clamped to `[0, 1]`).
///
/// A single point is a degree-0 curve and is returned unchanged; an empty
/// slice evaluates to the origin.
#[must_use]
pub fn point_on_spline(points: &[Point3], t: f64) -> Point3 {
    let t = t.clamp(0.0, 1.0);
    let n = points.len().saturating_sub(1);
    let sum = points
        .iter()
        .enumerate()
        .fold(Vec3::ZERO, |acc, (i, p)| {
            acc.add(p.to_vec3().mul_scalar(bernstein(n, i, t)))
        });
    sum.into()
}

/// Unit tangent by forward difference, with `t` kept at least one step away
/// from the end of the curve.
#[must_use]
pub fn tangent_on_spline(points: &[Point3], t: f64) -> Option<Vec3> {
    let t = t.clamp(0.0, 1.0 - SPLINE_TANGENT_STEP);
    let pre = point_on_spline(points, t);
    let post = point_on_spline(points, t + SPLINE_TANGENT_STEP);
    let delta = post.sub_point(pre);
    if Tolerance::ZERO_LENGTH.is_zero_vec3(delta) {
        return None;
    }
    delta.normalized()
}

/// Extrapolates one step past `v1` along `v0 -> v1`.
#[must_use]
pub fn next_tangent_sample(v0: Point3, v1: Point3) -> Point3 {
    v1.add_vec(v1.sub_point(v0))
}

/// Deterministic unit vector perpendicular to `reference`.
#[must_use]
pub fn orthogonal_unit_vector(reference: Vec3) -> Vec3 {
    let candidate = if reference.x.abs() < reference.y.abs() {
        Vec3::new(0.0, -reference.z, reference.y)
    } else {
        Vec3::new(-reference.z, 0.0, reference.x)
    };

    candidate.normalized().unwrap_or(Vec3::X)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binomial_small_values() {
        assert_eq!(binomial(0, 0), 1.0);
        assert_eq!(binomial(5, 0), 1.0);
        assert_eq!(binomial(5, 2), 10.0);
        assert_eq!(binomial(6, 3), 20.0);
        assert_eq!(binomial(3, 4), 0.0);
    }

    #[test]
    fn binomial_is_exact_for_large_rows() {
        // C(60, 30) = 118264581564861424, above 2^53
        assert_eq!(binomial(60, 30), 118_264_581_564_861_424_u64 as f64);
        assert_eq!(binomial(100, 3), 161_700.0);
    }

    #[test]
    fn bernstein_basis_is_partition_of_unity() {
        for n in 0..12 {
            for step in 0..=10 {
                let t = f64::from(step) / 10.0;
                let sum: f64 = (0..=n).map(|i| bernstein(n, i, t)).sum();
                assert!((sum - 1.0).abs() < 1e-12, "n={n} t={t} sum={sum}");
            }
        }
    }

    #[test]
    fn orthogonal_unit_vector_is_perpendicular() {
        for v in [Vec3::X, Vec3::Y, Vec3::Z, Vec3::new(0.3, -2.0, 0.7)] {
            let o = orthogonal_unit_vector(v);
            assert!(v.dot(o).abs() < 1e-12);
            assert!((o.length() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn last_two_requires_two_points() {
        let curve = BezierCurve3::new(vec![Point3::ORIGIN]);
        assert_eq!(curve.last_two(), None);

        let curve = BezierCurve3::new(vec![
            Point3::ORIGIN,
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
        ]);
        assert_eq!(
            curve.last_two(),
            Some((Point3::new(1.0, 0.0, 0.0), Point3::new(2.0, 1.0, 0.0)))
        );
    }
}
