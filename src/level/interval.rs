//! Global parameterization of a [`PathSet`].
//!
//! All paths together share one parameter `t ∈ [0, 1]`. Each path owns a
//! sub-range proportional to its control point count, with the point shared
//! at every join counted once.

use crate::geom::{Point3, point_on_spline};

use super::path::{Path, PathSet};

/// Sub-range `[start, end)` of the global parameter owned by one path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSpan {
    pub path_index: usize,
    pub start: f64,
    pub end: f64,
}

impl PathSpan {
    /// Maps a global `t` inside this span to the path's local `[0, 1]`.
    #[must_use]
    pub fn local_t(&self, t: f64) -> f64 {
        let width = self.end - self.start;
        if width <= 0.0 {
            return 0.0;
        }
        ((t - self.start) / width).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct IntervalTable {
    spans: Vec<PathSpan>,
}

impl IntervalTable {
    /// Builds the table from per-path control point counts.
    #[must_use]
    pub fn from_lengths(lengths: &[usize]) -> Self {
        let Some(shared) = lengths.len().checked_sub(1) else {
            return Self::default();
        };
        let total = lengths.iter().sum::<usize>().saturating_sub(shared);
        if total == 0 {
            return Self::default();
        }
        let total = total as f64;

        let mut spans = Vec::with_capacity(lengths.len());
        let mut cumulative = 0usize;
        let mut start = 0.0;
        for (path_index, len) in lengths.iter().enumerate() {
            cumulative += len;
            let end = cumulative.saturating_sub(path_index) as f64 / total;
            spans.push(PathSpan {
                path_index,
                start,
                end,
            });
            start = end;
        }

        Self { spans }
    }

    #[must_use]
    pub fn for_paths(paths: &PathSet) -> Self {
        let lengths: Vec<usize> = paths.paths().iter().map(Path::len).collect();
        let table = Self::from_lengths(&lengths);
        log::debug!("interval table: {:?}", table.spans);
        table
    }

    #[must_use]
    pub fn spans(&self) -> &[PathSpan] {
        &self.spans
    }

    /// First span whose end lies beyond `t`.
    #[must_use]
    pub fn locate(&self, t: f64) -> Option<&PathSpan> {
        self.spans.iter().find(|span| t < span.end)
    }
}

/// Evaluates the stitched course at global parameter `t`.
///
/// `t` is clamped to `[0, 1]`. A `t` at or past the last span end evaluates
/// the last path at its end point. An empty path set evaluates to the origin.
#[must_use]
pub fn sample_paths(t: f64, paths: &PathSet, intervals: &IntervalTable) -> Point3 {
    let t = t.clamp(0.0, 1.0);
    let all = paths.paths();
    match intervals.locate(t) {
        Some(span) => all.get(span.path_index).map_or(Point3::ORIGIN, |path| {
            point_on_spline(path.control_points(), span.local_t(t))
        }),
        None => all
            .last()
            .map_or(Point3::ORIGIN, |path| point_on_spline(path.control_points(), 1.0)),
    }
}
