//! Generation parameters.
//!
//! A [`LevelConfig`] is built once (defaults, optionally a RON file, then
//! command-line overrides), validated, and passed by reference to every
//! pipeline stage.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Control point counts above this are rejected; higher-degree Bézier
/// segments add nothing but numerical noise.
pub const MAX_CONTROL_POINTS: usize = 64;

/// Smallest control point count that still gives a path a start, a heading
/// and one curvature-defining point.
pub const MIN_CONTROL_POINTS: usize = 3;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("world size must be positive")]
    WorldSize,
    #[error("world margin {margin} must be smaller than world size {size}")]
    MarginTooLarge { margin: u32, size: u32 },
    #[error("gate {dimension} must be a positive finite number, got {value}")]
    GateExtent { dimension: &'static str, value: f64 },
    #[error("path count must be at least 1")]
    NoPaths,
    #[error("minimum control point count is {min}, at least {} required", MIN_CONTROL_POINTS)]
    TooFewControlPoints { min: usize },
    #[error("minimum control point count {min} exceeds maximum {max}")]
    ControlPointRange { min: usize, max: usize },
    #[error("maximum control point count {max} exceeds the limit of {}", MAX_CONTROL_POINTS)]
    TooManyControlPoints { max: usize },
    #[error("control point spread must lie in [0, 1], got {0}")]
    Spread(f64),
    #[error("cannot read config {path}: {message}")]
    Read { path: String, message: String },
    #[error("cannot parse config: {0}")]
    Parse(String),
    #[error("cannot serialize config: {0}")]
    Serialize(String),
}

/// Parameters of one generated level.
///
/// World dimensions are half-extents: the level fits inside the
/// origin-centered cube `[-world_size, world_size]^3`, with the outermost
/// control point at `world_size - world_margin`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LevelConfig {
    pub world_size: u32,
    pub world_margin: u32,
    pub gate_count: usize,
    pub gate_width: f64,
    pub gate_height: f64,
    pub path_count: usize,
    pub path_control_point_min: usize,
    pub path_control_point_max: usize,
    pub path_control_point_spread: f64,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            world_size: 10_000,
            world_margin: 4_000,
            gate_count: 100,
            gate_width: 10.0,
            gate_height: 5.0,
            path_count: 3,
            path_control_point_min: 3,
            path_control_point_max: 7,
            path_control_point_spread: std::f64::consts::FRAC_1_SQRT_2,
        }
    }
}

impl LevelConfig {
    /// Parses a RON document. Missing fields keep their defaults.
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        ron::from_str(source).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Reads a RON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|err| ConfigError::Read {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        let config: Self =
            ron::de::from_reader(file).map_err(|err| ConfigError::Parse(err.to_string()))?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Serializes to pretty RON, the same format [`LevelConfig::load`] reads.
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|err| ConfigError::Serialize(err.to_string()))
    }

    /// Checks every parameter combination the pipeline relies on.
    ///
    /// `gate_count == 0` is valid and produces an empty level.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world_size == 0 {
            return Err(ConfigError::WorldSize);
        }
        if self.world_margin >= self.world_size {
            return Err(ConfigError::MarginTooLarge {
                margin: self.world_margin,
                size: self.world_size,
            });
        }
        for (dimension, value) in [("width", self.gate_width), ("height", self.gate_height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::GateExtent { dimension, value });
            }
        }
        if self.path_count == 0 {
            return Err(ConfigError::NoPaths);
        }
        let (min, max) = (self.path_control_point_min, self.path_control_point_max);
        if min < MIN_CONTROL_POINTS {
            return Err(ConfigError::TooFewControlPoints { min });
        }
        if min > max {
            return Err(ConfigError::ControlPointRange { min, max });
        }
        if max > MAX_CONTROL_POINTS {
            return Err(ConfigError::TooManyControlPoints { max });
        }
        let spread = self.path_control_point_spread;
        if !(0.0..=1.0).contains(&spread) {
            return Err(ConfigError::Spread(spread));
        }
        Ok(())
    }

    /// Radius of the cube the fitted layout touches.
    #[must_use]
    pub fn fitted_extent(&self) -> f64 {
        f64::from(self.world_size) - f64::from(self.world_margin)
    }
}
