//! Text formats read and written by the generator.

pub mod gate_file;
