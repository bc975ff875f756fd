//! Random path synthesis.
//!
//! Each path is one Bézier segment. Consecutive paths are chained: a path
//! starts at the previous path's last control point and its second control
//! point extrapolates the previous path's final heading, so the stitched
//! curve keeps its direction across segment joins.

use rand::Rng;

use crate::geom::{
    BezierCurve3, Point3, next_tangent_sample, uniform_cone_sample, uniform_sphere_sample,
};

use super::config::LevelConfig;
use super::error::{LevelError, LevelResult};

/// One Bézier segment of the course.
pub type Path = BezierCurve3;

/// Ordered paths forming one continuous course.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathSet {
    paths: Vec<Path>,
}

impl PathSet {
    #[must_use]
    pub fn new(paths: Vec<Path>) -> Self {
        Self { paths }
    }

    #[must_use]
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Control point count summed over all paths (join points counted twice).
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.paths.iter().map(Path::len).sum()
    }

    /// Every control point of every path, in path order.
    pub fn points(&self) -> impl Iterator<Item = Point3> + '_ {
        self.paths
            .iter()
            .flat_map(|path| path.control_points().iter().copied())
    }

    /// Applies `f` to every control point of every path.
    #[must_use]
    pub fn map_points<F>(self, mut f: F) -> Self
    where
        F: FnMut(Point3) -> Point3,
    {
        Self::new(
            self.paths
                .into_iter()
                .map(|path| path.map_points(&mut f))
                .collect(),
        )
    }
}

impl From<Vec<Path>> for PathSet {
    fn from(paths: Vec<Path>) -> Self {
        Self::new(paths)
    }
}

/// Generates `config.path_count` chained paths.
///
/// The first path leaves the origin toward a uniformly random direction.
pub fn generate_paths<R>(config: &LevelConfig, rng: &mut R) -> LevelResult<PathSet>
where
    R: Rng + ?Sized,
{
    let mut paths = Vec::with_capacity(config.path_count);
    let mut start = Point3::ORIGIN;
    let mut heading: Point3 = uniform_sphere_sample(rng)?.into();

    for index in 0..config.path_count {
        let point_count =
            rng.random_range(config.path_control_point_min..=config.path_control_point_max);
        let path = generate_path(
            rng,
            point_count,
            start,
            heading,
            config.path_control_point_spread,
        )?;
        log::debug!("path {index}: {point_count} control points");

        let (before_last, last) = path
            .last_two()
            .ok_or(LevelError::degenerate("path chaining"))?;
        start = last;
        heading = next_tangent_sample(before_last, last);
        paths.push(path);
    }

    Ok(PathSet::new(paths))
}

/// Builds one path of `point_count` control points.
///
/// The first two points are `start` and `first` as given. Every further
/// point is a cone sample around the direction of the previous two points;
/// the sampled unit vector itself becomes the control point.
pub fn generate_path<R>(
    rng: &mut R,
    point_count: usize,
    start: Point3,
    first: Point3,
    spread: f64,
) -> LevelResult<Path>
where
    R: Rng + ?Sized,
{
    let mut points = Vec::with_capacity(point_count.max(2));
    points.push(start);
    points.push(first);

    let mut prev = start;
    let mut curr = first;
    for _ in 2..point_count {
        let next: Point3 = uniform_cone_sample(rng, curr.sub_point(prev), spread)?.into();
        prev = curr;
        curr = next;
        points.push(next);
    }

    Ok(Path::new(points))
}
