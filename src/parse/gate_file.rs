//! Reader and writer for gate files.
//!
//! One gate per line, nine space-separated values in the order
//! `Cx Cy Cz Rx Ry Rz Ux Uy Uz` (center, right half-extent, up half-extent).
//! Values are written with six decimals.

use std::fs;
use std::io::{self, Write};
use std::num::ParseFloatError;
use std::path::Path;

use thiserror::Error;

use crate::level::Gate;

/// Values per gate line.
pub const VALUES_PER_GATE: usize = 9;

pub type GateFileResult<T> = Result<T, GateFileError>;

#[derive(Debug, Error)]
pub enum GateFileError {
    /// Reading or writing the file failed.
    #[error("gate file I/O: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: expected 9 values, found {found}")]
    FieldCount { line: usize, found: usize },
    #[error("line {line}: invalid number: {source}")]
    Number {
        line: usize,
        #[source]
        source: ParseFloatError,
    },
    #[error("line {line}: value {value} is not finite")]
    NonFinite { line: usize, value: f64 },
}

/// Formats one gate as a file line, without the newline.
#[must_use]
pub fn format_gate(gate: &Gate) -> String {
    gate.to_values()
        .iter()
        .map(|value| format!("{value:.6}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn write_gates<W: Write>(out: &mut W, gates: &[Gate]) -> io::Result<()> {
    for gate in gates {
        writeln!(out, "{}", format_gate(gate))?;
    }
    Ok(())
}

#[must_use]
pub fn gates_to_string(gates: &[Gate]) -> String {
    gates.iter().fold(String::new(), |mut text, gate| {
        text.push_str(&format_gate(gate));
        text.push('\n');
        text
    })
}

/// Parses gate lines. Blank lines are skipped; line numbers in errors are
/// 1-based.
pub fn parse_str(input: &str) -> GateFileResult<Vec<Gate>> {
    input
        .lines()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(index, text)| parse_line(index + 1, text))
        .collect()
}

fn parse_line(line: usize, text: &str) -> GateFileResult<Gate> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != VALUES_PER_GATE {
        return Err(GateFileError::FieldCount {
            line,
            found: fields.len(),
        });
    }

    let mut values = [0.0; VALUES_PER_GATE];
    for (slot, field) in values.iter_mut().zip(&fields) {
        let value: f64 = field
            .parse()
            .map_err(|source| GateFileError::Number { line, source })?;
        if !value.is_finite() {
            return Err(GateFileError::NonFinite { line, value });
        }
        *slot = value;
    }
    Ok(Gate::from_values(values))
}

pub fn read_file(path: &Path) -> GateFileResult<Vec<Gate>> {
    let text = fs::read_to_string(path)?;
    parse_str(&text)
}

/// Writes `gates` to `path`, replacing any existing file.
pub fn write_file(path: &Path, gates: &[Gate]) -> GateFileResult<()> {
    let mut file = io::BufWriter::new(fs::File::create(path)?);
    write_gates(&mut file, gates)?;
    file.flush()?;
    log::debug!("wrote {} gates to {}", gates.len(), path.display());
    Ok(())
}
