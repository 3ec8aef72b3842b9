// ============================================================
// Layer 4 — Relation File Writer
// ============================================================
// Writes a matrix back out in the relation format the parser
// reads. The last column is the target; every other column
// gets a synthetic name p[0], p[1], ... so original attribute
// names are not preserved.
//
// Output layout:
//
//   % <description>
//   % Generated by mlp-trainer
//   @RELATION <name>
//   @ATTRIBUTE p[0] REAL
//   ...
//   @ATTRIBUTE class REAL
//
//   @DATA
//   v,v,...,v
//
// Numbers use 12 significant digits in `%g` style, which is
// enough for the parser to rebuild the same f32 matrices.
//
// Reference: Rust Book §12 (I/O and File Handling)

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::domain::dataset::CLASS_ATTRIBUTE;
use crate::domain::error::{Result, TrainerError};
use crate::domain::matrix::Matrix;

/// Significant digits used for every written value.
pub const SIGNIFICANT_DIGITS: usize = 12;

const AUTHOR_MARKER: &str = "% Generated by mlp-trainer";

/// Write `data` to `path` as a relation called `name`, replacing any existing file.
pub fn save(
    path: impl AsRef<Path>,
    name: &str,
    description: &str,
    data: &Matrix<f64>,
) -> Result<()> {
    let path = path.as_ref();
    if data.cols() == 0 {
        return Err(TrainerError::Format(
            "cannot write a relation without a target column".to_owned(),
        ));
    }

    let file = File::create(path).map_err(TrainerError::io(path))?;
    let mut out = BufWriter::new(file);
    write_relation(&mut out, name, description, data).map_err(TrainerError::io(path))?;
    out.flush().map_err(TrainerError::io(path))?;

    tracing::debug!(
        "Wrote {} rows x {} columns to '{}'",
        data.rows(),
        data.cols(),
        path.display()
    );
    Ok(())
}

fn write_relation<W: Write>(
    out: &mut W,
    name: &str,
    description: &str,
    data: &Matrix<f64>,
) -> std::io::Result<()> {
    // ── Header ───────────────────────────────────────────────────────────────
    for line in description.lines() {
        writeln!(out, "% {line}")?;
    }
    writeln!(out, "{AUTHOR_MARKER}")?;
    writeln!(out, "@RELATION {name}")?;

    for i in 0..data.cols() - 1 {
        writeln!(out, "@ATTRIBUTE p[{i}] REAL")?;
    }
    writeln!(out, "@ATTRIBUTE {CLASS_ATTRIBUTE} REAL")?;
    writeln!(out)?;
    writeln!(out, "@DATA")?;

    // ── Rows ─────────────────────────────────────────────────────────────────
    for row in data.iter_rows() {
        let line = row
            .iter()
            .map(|&v| format_significant(v, SIGNIFICANT_DIGITS))
            .collect::<Vec<_>>()
            .join(",");
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Render `value` with `digits` significant digits, the way C's `%.*g` does.
pub fn format_significant(value: f64, digits: usize) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    if value.is_nan() {
        return "nan".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_owned();
    }

    let precision = digits.max(1);
    // Scientific rendering gives the decimal exponent after rounding
    let sci = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= precision as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exp.abs())
    } else {
        let decimals = (precision as i32 - 1 - exp) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_owned()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
