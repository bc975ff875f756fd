mod core;
mod curve;
mod sampling;

pub use self::core::{BBox, Point3, Tolerance, Vec3, maximize, minimize, nary_maximum};
pub use curve::{
    BezierCurve3, Curve3, SPLINE_TANGENT_STEP, bernstein, binomial, next_tangent_sample,
    orthogonal_unit_vector, point_on_spline, tangent_on_spline,
};
pub use sampling::{
    MAX_REJECTION_ATTEMPTS, MIN_CONE_SPREAD, SamplingError, sample_until, uniform_cone_sample,
    uniform_sphere_sample,
};

#[cfg(test)]
mod tests;
