//! Gate placement along the stitched course.

use serde::{Deserialize, Serialize};

use crate::geom::{Point3, Tolerance, Vec3, orthogonal_unit_vector};

use super::config::LevelConfig;
use super::error::{LevelError, LevelResult};
use super::interval::{IntervalTable, sample_paths};
use super::path::PathSet;

/// Parameter offset between the three samples of one gate frame.
pub const SAMPLE_DELTA: f64 = 0.001;

/// One gate: its center plus half-extent vectors.
///
/// `right` and `up` are perpendicular, with lengths `gate_width / 2` and
/// `gate_height / 2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub center: Point3,
    pub right: Vec3,
    pub up: Vec3,
}

impl Gate {
    #[must_use]
    pub const fn new(center: Point3, right: Vec3, up: Vec3) -> Self {
        Self { center, right, up }
    }

    /// Flight direction through the gate.
    #[must_use]
    pub fn normal(&self) -> Option<Vec3> {
        self.up.cross(self.right).normalized()
    }

    /// The nine values of a gate-file line: center, right, up.
    #[must_use]
    pub fn to_values(&self) -> [f64; 9] {
        let [cx, cy, cz] = self.center.to_array();
        let [rx, ry, rz] = self.right.to_array();
        let [ux, uy, uz] = self.up.to_array();
        [cx, cy, cz, rx, ry, rz, ux, uy, uz]
    }

    #[must_use]
    pub fn from_values(values: [f64; 9]) -> Self {
        let [cx, cy, cz, rx, ry, rz, ux, uy, uz] = values;
        Self::new(
            Point3::new(cx, cy, cz),
            Vec3::new(rx, ry, rz),
            Vec3::new(ux, uy, uz),
        )
    }
}

/// Unit frame of a gate at global parameter `t`, before sizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateFrame {
    pub center: Point3,
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

/// Derives the local frame at `t` from three samples `t - δ`, `t`, `t + δ`.
///
/// Both tangent estimates are taken relative to the `t - δ` sample.
pub fn gate_frame(t: f64, paths: &PathSet, intervals: &IntervalTable) -> LevelResult<GateFrame> {
    let prev = sample_paths(t - SAMPLE_DELTA, paths, intervals);
    let curr = sample_paths(t, paths, intervals);
    let next = sample_paths(t + SAMPLE_DELTA, paths, intervals);

    let tan1 = curr
        .sub_point(prev)
        .normalized()
        .ok_or(LevelError::degenerate("gate tangent"))?;
    let tan2 = next
        .sub_point(prev)
        .normalized()
        .ok_or(LevelError::degenerate("gate secant"))?;

    let bend = tan2.cross(tan1);
    let right = if bend.length() <= Tolerance::DEFAULT.eps {
        orthogonal_unit_vector(tan1)
    } else {
        bend.normalized()
            .ok_or(LevelError::degenerate("gate right vector"))?
    };
    let up = right
        .cross(tan1)
        .normalized()
        .ok_or(LevelError::degenerate("gate up vector"))?;

    Ok(GateFrame {
        center: curr,
        forward: tan1,
        right,
        up,
    })
}

/// Builds a gate at `t`, with the frame scaled to the configured extents.
pub fn generate_gate(
    t: f64,
    paths: &PathSet,
    intervals: &IntervalTable,
    config: &LevelConfig,
) -> LevelResult<Gate> {
    let frame = gate_frame(t, paths, intervals)?;
    Ok(Gate::new(
        frame.center,
        frame.right.mul_scalar(config.gate_width / 2.0),
        frame.up.mul_scalar(config.gate_height / 2.0),
    ))
}

/// Global parameter of gate `index` out of `count`, kept `2δ` from both ends.
#[must_use]
pub fn gate_parameter(index: usize, count: usize) -> f64 {
    let t = if count == 0 {
        0.0
    } else {
        index as f64 / count as f64
    };
    t.clamp(2.0 * SAMPLE_DELTA, 1.0 - 2.0 * SAMPLE_DELTA)
}

/// Places `config.gate_count` gates at evenly spaced parameters.
pub fn build_gates(paths: &PathSet, config: &LevelConfig) -> LevelResult<Vec<Gate>> {
    let intervals = IntervalTable::for_paths(paths);
    (0..config.gate_count)
        .map(|index| {
            generate_gate(
                gate_parameter(index, config.gate_count),
                paths,
                &intervals,
                config,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::path::Path;

    fn curved() -> PathSet {
        PathSet::new(vec![
            Path::new(vec![
                Point3::ORIGIN,
                Point3::new(10.0, 0.0, 0.0),
                Point3::new(10.0, 10.0, 0.0),
                Point3::new(20.0, 10.0, 5.0),
            ]),
            Path::new(vec![
                Point3::new(20.0, 10.0, 5.0),
                Point3::new(30.0, 10.0, 10.0),
                Point3::new(30.0, 0.0, 20.0),
            ]),
        ])
    }

    fn straight() -> PathSet {
        PathSet::new(vec![Path::new(vec![
            Point3::ORIGIN,
            Point3::new(0.0, 3.0, 4.0),
            Point3::new(0.0, 6.0, 8.0),
        ])])
    }

    #[test]
    fn gate_parameters_are_clamped() {
        assert_eq!(gate_parameter(0, 4), 2.0 * SAMPLE_DELTA);
        assert_eq!(gate_parameter(2, 4), 0.5);
        assert_eq!(gate_parameter(4, 4), 1.0 - 2.0 * SAMPLE_DELTA);
    }

    #[test]
    fn frames_are_orthonormal() {
        let paths = curved();
        let table = IntervalTable::for_paths(&paths);
        let tol = Tolerance::new(1e-9);
        for step in 0..50 {
            let t = gate_parameter(step, 50);
            let frame = gate_frame(t, &paths, &table).unwrap();
            assert!(tol.approx_zero_f64(frame.right.dot(frame.forward)));
            assert!(tol.approx_zero_f64(frame.up.dot(frame.right)));
            assert!(tol.approx_zero_f64(frame.up.dot(frame.forward)));
            assert!(tol.approx_eq_f64(frame.right.length(), 1.0));
            assert!(tol.approx_eq_f64(frame.up.length(), 1.0));
        }
    }

    #[test]
    fn straight_course_uses_fallback_right_vector() {
        let paths = straight();
        let table = IntervalTable::for_paths(&paths);
        let frame = gate_frame(0.5, &paths, &table).unwrap();
        let tol = Tolerance::new(1e-9);
        assert!(tol.approx_eq_vec3(frame.forward, Vec3::new(0.0, 0.6, 0.8)));
        assert!(tol.approx_zero_f64(frame.right.dot(frame.forward)));
        assert!(tol.approx_zero_f64(frame.up.dot(frame.right)));
    }

    #[test]
    fn gate_extents_follow_config() {
        let paths = curved();
        let config = LevelConfig {
            gate_count: 7,
            gate_width: 8.0,
            gate_height: 3.0,
            ..LevelConfig::default()
        };
        let gates = build_gates(&paths, &config).unwrap();
        assert_eq!(gates.len(), 7);
        let tol = Tolerance::new(1e-9);
        for gate in &gates {
            assert!(tol.approx_eq_f64(gate.right.length(), 4.0));
            assert!(tol.approx_eq_f64(gate.up.length(), 1.5));
            assert!(gate.normal().is_some());
        }
    }

    #[test]
    fn no_gates_requested() {
        let config = LevelConfig {
            gate_count: 0,
            ..LevelConfig::default()
        };
        assert_eq!(build_gates(&curved(), &config), Ok(Vec::new()));
    }

    #[test]
    fn collapsed_course_is_degenerate() {
        let paths = PathSet::new(vec![Path::new(vec![Point3::ORIGIN; 3])]);
        let config = LevelConfig {
            gate_count: 2,
            ..LevelConfig::default()
        };
        assert_eq!(
            build_gates(&paths, &config),
            Err(LevelError::degenerate("gate tangent"))
        );
    }

    #[test]
    fn values_keep_component_order() {
        let gate = Gate::new(
            Point3::new(1.0, 2.0, 3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec3::new(7.0, 8.0, 9.0),
        );
        assert_eq!(
            gate.to_values(),
            [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]
        );
        assert_eq!(Gate::from_values(gate.to_values()), gate);
    }
}
