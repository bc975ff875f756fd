use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Vec3
// ─────────────────────────────────────────────────────────────────────────────

/// Free direction or offset in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    /// Zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// Unit vector along the X axis.
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    /// Unit vector along the Y axis.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    /// Unit vector along the Z axis.
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    #[must_use]
    pub const fn length_squared(self) -> f64 {
        self.dot(self)
    }

    #[must_use]
    pub const fn dot(self, rhs: Self) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[must_use]
    pub const fn cross(self, rhs: Self) -> Self {
        Self {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    /// Unit vector in the same direction.
    ///
    /// Returns `None` for zero-length or non-finite input instead of dividing
    /// by zero; callers decide whether that is an error.
    #[must_use]
    pub fn normalized(self) -> Option<Self> {
        let len = self.length();
        if len.is_finite() && len > 0.0 {
            Some(Self::new(self.x / len, self.y / len, self.z / len))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn mul_scalar(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }

    /// Component-wise (Hadamard) product.
    #[must_use]
    pub const fn mul_components(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }

    #[must_use]
    pub const fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }

    #[must_use]
    pub const fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }

    /// Component-wise minimum.
    #[must_use]
    pub fn min(self, rhs: Self) -> Self {
        Self::new(self.x.min(rhs.x), self.y.min(rhs.y), self.z.min(rhs.z))
    }

    /// Component-wise maximum.
    #[must_use]
    pub fn max(self, rhs: Self) -> Self {
        Self::new(self.x.max(rhs.x), self.y.max(rhs.y), self.z.max(rhs.z))
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(v: Vec3) -> Self {
        v.to_array()
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Point3
// ─────────────────────────────────────────────────────────────────────────────

/// Position in world space. Path control points and gate centers are points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    /// The origin point (0, 0, 0).
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Position vector from the origin.
    #[must_use]
    pub const fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    #[must_use]
    pub const fn add_vec(self, v: Vec3) -> Self {
        Self::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }

    #[must_use]
    pub const fn sub_point(self, rhs: Self) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }

    /// Uniform scale about the origin.
    #[must_use]
    pub const fn scaled(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Default for Point3 {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl From<[f64; 3]> for Point3 {
    fn from(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

impl From<Point3> for [f64; 3] {
    fn from(p: Point3) -> Self {
        p.to_array()
    }
}

impl From<Vec3> for Point3 {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Point3> for Vec3 {
    fn from(p: Point3) -> Self {
        p.to_vec3()
    }
}

impl Add<Vec3> for Point3 {
    type Output = Self;
    fn add(self, rhs: Vec3) -> Self::Output {
        self.add_vec(rhs)
    }
}

impl Sub for Point3 {
    type Output = Vec3;
    fn sub(self, rhs: Self) -> Self::Output {
        self.sub_point(rhs)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Extremal merges
// ─────────────────────────────────────────────────────────────────────────────

/// Merges `value` into a running per-axis lower bound.
///
/// `None` means no bound has been seen yet, so the value itself becomes the
/// bound.
#[must_use]
pub fn minimize(bound: Option<Vec3>, value: Vec3) -> Vec3 {
    bound.map_or(value, |b| b.min(value))
}

/// Merges `value` into a running per-axis upper bound. See [`minimize`].
#[must_use]
pub fn maximize(bound: Option<Vec3>, value: Vec3) -> Vec3 {
    bound.map_or(value, |b| b.max(value))
}

/// Largest value of a scalar list, `None` when the list is empty.
#[must_use]
pub fn nary_maximum(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

// ─────────────────────────────────────────────────────────────────────────────
// BBox
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub min: Point3,
    pub max: Point3,
}

impl BBox {
    #[must_use]
    pub const fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Axis-aligned bounds of a point stream, seeded with its first point.
    #[must_use]
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3>,
    {
        let (min, max) = points.into_iter().fold((None, None), |(lo, hi), p| {
            let v = p.to_vec3();
            (Some(minimize(lo, v)), Some(maximize(hi, v)))
        });
        Some(Self::new(min?.into(), max?.into()))
    }

    /// Size (dimensions) of the bounding box.
    #[must_use]
    pub fn size(self) -> Vec3 {
        self.max.sub_point(self.min)
    }

    /// Largest absolute coordinate over both corners, i.e. the half-extent of
    /// the smallest origin-centered cube containing the box.
    #[must_use]
    pub fn max_abs_coordinate(self) -> f64 {
        let corners = [
            self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z,
        ];
        let magnitudes: Vec<f64> = corners.iter().map(|c| c.abs()).collect();
        nary_maximum(&magnitudes).unwrap_or(0.0)
    }

    /// Check if a point is inside the bounding box (inclusive).
    #[must_use]
    pub fn contains_point(self, p: Point3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Origin-centered cube with the given half-extent.
    #[must_use]
    pub fn centered_cube(half_extent: f64) -> Self {
        Self::new(
            Point3::new(-half_extent, -half_extent, -half_extent),
            Point3::new(half_extent, half_extent, half_extent),
        )
    }

    /// Expand the bounding box by a scalar amount in all directions.
    #[must_use]
    pub fn expand_by(self, amount: f64) -> Self {
        Self::new(
            self.min.add_vec(Vec3::new(-amount, -amount, -amount)),
            self.max.add_vec(Vec3::new(amount, amount, amount)),
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tolerance
// ─────────────────────────────────────────────────────────────────────────────

/// Tolerance configuration for geometric comparisons.
///
/// - `Tolerance::DEFAULT` - general comparisons and straight-curve detection (1e-9)
/// - `Tolerance::ZERO_LENGTH` - degenerate vectors (1e-12)
/// - `Tolerance::LOOSE` - coarse comparisons, e.g. values read back from text (1e-6)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub eps: f64,
}

impl Tolerance {
    /// Default geometric tolerance (1e-9).
    pub const DEFAULT: Self = Self { eps: 1e-9 };
    /// Tolerance for detecting zero-length/degenerate vectors (1e-12).
    pub const ZERO_LENGTH: Self = Self { eps: 1e-12 };
    /// Loose tolerance for coarse comparisons (1e-6).
    pub const LOOSE: Self = Self { eps: 1e-6 };

    #[must_use]
    pub const fn new(eps: f64) -> Self {
        Self { eps }
    }

    #[must_use]
    pub const fn eps_squared(self) -> f64 {
        self.eps * self.eps
    }

    #[must_use]
    pub fn approx_eq_f64(self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.eps
    }

    #[must_use]
    pub fn approx_zero_f64(self, a: f64) -> bool {
        a.abs() <= self.eps
    }

    #[must_use]
    pub fn approx_eq_point3(self, a: Point3, b: Point3) -> bool {
        a.sub_point(b).length_squared() <= self.eps_squared()
    }

    #[must_use]
    pub fn approx_eq_vec3(self, a: Vec3, b: Vec3) -> bool {
        a.sub(b).length_squared() <= self.eps_squared()
    }

    /// Check if a vector is approximately zero (degenerate).
    #[must_use]
    pub fn is_zero_vec3(self, v: Vec3) -> bool {
        v.length_squared() <= self.eps_squared()
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_cross_follows_right_hand_rule() {
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
        assert_eq!(Vec3::Y.cross(Vec3::Z), Vec3::X);
        assert_eq!(Vec3::Z.cross(Vec3::X), Vec3::Y);
    }

    #[test]
    fn test_vec3_normalized() {
        let n = Vec3::new(3.0, 4.0, 0.0).normalized().unwrap();
        assert!((n.x - 0.6).abs() < 1e-12);
        assert!((n.y - 0.8).abs() < 1e-12);
        assert!((n.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_vec3_normalized_rejects_zero_and_nan() {
        assert!(Vec3::ZERO.normalized().is_none());
        assert!(Vec3::new(f64::NAN, 0.0, 0.0).normalized().is_none());
    }

    #[test]
    fn test_vec3_mul_components() {
        let v = Vec3::new(1.0, -2.0, 3.0).mul_components(Vec3::new(4.0, 5.0, -6.0));
        assert_eq!(v, Vec3::new(4.0, -10.0, -18.0));
    }

    #[test]
    fn test_minimize_without_bound_takes_value() {
        let v = Vec3::new(1.0, -2.0, 3.0);
        assert_eq!(minimize(None, v), v);
        assert_eq!(maximize(None, v), v);
    }

    #[test]
    fn test_minimize_maximize_keep_extremal_components() {
        let a = Vec3::new(1.0, 5.0, -3.0);
        let b = Vec3::new(2.0, -1.0, -4.0);
        assert_eq!(minimize(Some(a), b), Vec3::new(1.0, -1.0, -4.0));
        assert_eq!(maximize(Some(a), b), Vec3::new(2.0, 5.0, -3.0));
    }

    #[test]
    fn test_nary_maximum() {
        assert_eq!(nary_maximum(&[]), None);
        assert_eq!(nary_maximum(&[-3.0]), Some(-3.0));
        assert_eq!(nary_maximum(&[1.0, 7.5, -2.0, 7.0]), Some(7.5));
    }

    #[test]
    fn test_bbox_from_points() {
        let bbox = BBox::from_points([
            Point3::new(1.0, -2.0, 0.5),
            Point3::new(-4.0, 3.0, 0.0),
            Point3::new(0.0, 0.0, 2.0),
        ])
        .unwrap();

        assert_eq!(bbox.min, Point3::new(-4.0, -2.0, 0.0));
        assert_eq!(bbox.max, Point3::new(1.0, 3.0, 2.0));
        assert_eq!(bbox.size(), Vec3::new(5.0, 5.0, 2.0));
        assert_eq!(bbox.max_abs_coordinate(), 4.0);
    }

    #[test]
    fn test_bbox_from_no_points() {
        assert!(BBox::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_bbox_centered_cube_contains() {
        let cube = BBox::centered_cube(2.0);
        assert!(cube.contains_point(Point3::new(2.0, -2.0, 0.0)));
        assert!(!cube.contains_point(Point3::new(2.1, 0.0, 0.0)));
        assert!(cube.expand_by(0.5).contains_point(Point3::new(2.1, 0.0, 0.0)));
    }

    #[test]
    fn test_tolerance_vec3_comparison() {
        let tol = Tolerance::new(1e-9);
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(1.0 + 1e-10, 2.0, 3.0);
        let c = Vec3::new(1.0 + 1e-8, 2.0, 3.0);

        assert!(tol.approx_eq_vec3(a, b));
        assert!(!tol.approx_eq_vec3(a, c));
    }

    #[test]
    fn test_point_vec_conversions() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let v: Vec3 = p.into();
        assert_eq!(v, Vec3::new(1.0, 2.0, 3.0));
        let back: Point3 = v.into();
        assert_eq!(back, p);
        assert_eq!(p.scaled(2.0), Point3::new(2.0, 4.0, 6.0));
        assert_eq!((p + Vec3::X) - p, Vec3::X);
        assert_eq!(Vec3::X + Vec3::Y - Vec3::X, Vec3::Y);
    }
}
