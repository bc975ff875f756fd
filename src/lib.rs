#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Procedural gate-course generator.
//!
//! Random Bézier paths are synthesized from cone-constrained control points,
//! scaled into a cubic world volume, and sampled at evenly spaced parameters
//! to place oriented gates. See [`level::generate_level`] for the pipeline
//! entry point and [`parse::gate_file`] for the output format.

pub mod geom;
pub mod level;
pub mod parse;

pub use level::{Gate, Level, LevelConfig, LevelError, LevelResult, generate_level};
pub use parse::gate_file::GateFileError;
