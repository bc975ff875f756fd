//! Level generation pipeline: paths, world fit, gates.

pub mod config;
pub mod error;
pub mod fit;
pub mod gate;
pub mod interval;
pub mod path;

use rand::Rng;

pub use config::{ConfigError, LevelConfig, MAX_CONTROL_POINTS, MIN_CONTROL_POINTS};
pub use error::{LevelError, LevelResult};
pub use fit::{scale_paths_to_world, world_scale};
pub use gate::{
    Gate, GateFrame, SAMPLE_DELTA, build_gates, gate_frame, gate_parameter, generate_gate,
};
pub use interval::{IntervalTable, PathSpan, sample_paths};
pub use path::{Path, PathSet, generate_path, generate_paths};

/// Result of one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    /// Paths after world fitting.
    pub paths: PathSet,
    /// Factor applied to the raw paths by the world fit.
    pub world_scale: f64,
    /// Gates in increasing course parameter.
    pub gates: Vec<Gate>,
}

impl Level {
    #[must_use]
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }
}

/// Runs the full pipeline for `config`, drawing randomness from `rng`.
///
/// The configuration is validated first; any failure aborts the run.
pub fn generate_level<R>(config: &LevelConfig, rng: &mut R) -> LevelResult<Level>
where
    R: Rng + ?Sized,
{
    config.validate()?;

    let raw = generate_paths(config, rng)?;
    log::debug!(
        "generated {} paths with {} control points",
        raw.len(),
        raw.point_count()
    );

    let (paths, world_scale) = scale_paths_to_world(raw, config)?;
    let gates = build_gates(&paths, config)?;

    log::info!(
        "level: {} gates on {} paths, world size {} (margin {}), scale {:.3}",
        gates.len(),
        paths.len(),
        config.world_size,
        config.world_margin,
        world_scale
    );

    Ok(Level {
        paths,
        world_scale,
        gates,
    })
}
