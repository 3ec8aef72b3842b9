// ============================================================
// Layer 4 — Relation File Parser
// ============================================================
// Reads an ARFF-like relation file into a Dataset.
//
// Layout of the file:
//
//   % free-form comments, @RELATION, blank lines ...   ┐ header
//   @ATTRIBUTE p0 REAL                                 │
//   @ATTRIBUTE p1 REAL                                 │
//   @ATTRIBUTE class REAL                              ┘
//   @DATA
//   0,0,0                                              ┐ data
//   0,1,1                                              │ until a blank
//   ...                                                ┘ line or EOF
//
// Header rules:
//   - only lines starting with `@ATTRIBUTE` are looked at
//   - they are split on single spaces; exactly 3 tokens are
//     required, and the name `class` is reserved for the target
//   - anything else is skipped silently, including lines that
//     are not valid UTF-8 (Latin-1 comments, for instance)
//
// Data rules:
//   - each row has one value per attribute plus the target
//   - a wrong field count, a non-numeric token or a line that is
//     not valid UTF-8 is a FormatError and nothing is returned
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (Reading a File)

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::domain::dataset::{AttributeSet, Dataset, RelationRecord, CLASS_ATTRIBUTE};
use crate::domain::error::{Result, TrainerError};

const ATTRIBUTE_MARKER: &str = "@ATTRIBUTE";
const DATA_MARKER: &str = "@DATA";

/// Load a relation file from disk.
pub fn load(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(TrainerError::io(path))?;

    tracing::debug!("Parsing relation file '{}'", path.display());
    let dataset = parse(BufReader::new(file)).map_err(|e| match e {
        // Read failures surface with the file path attached
        TrainerError::Io { source, .. } => TrainerError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;

    tracing::debug!(
        "Parsed {} records with {} attributes from '{}'",
        dataset.len(),
        dataset.attribute_count(),
        path.display()
    );
    Ok(dataset)
}

/// Parse a relation from any buffered reader.
pub fn parse<R: BufRead>(reader: R) -> Result<Dataset> {
    let mut lines = reader.split(b'\n').enumerate();
    let mut names: Vec<String> = Vec::new();

    // ── Header: collect attribute names until @DATA ──────────────────────────
    // Lines that are not UTF-8 (e.g. Latin-1 comments) are skipped.
    for (idx, line) in lines.by_ref() {
        let bytes = line.map_err(read_error)?;
        let Ok(line) = std::str::from_utf8(&bytes) else {
            tracing::debug!("Skipping undecodable header line {}", idx + 1);
            continue;
        };
        let line = strip_cr(line);

        if line.starts_with(DATA_MARKER) {
            break;
        }
        if let Some(name) = attribute_name(line) {
            names.push(name.to_string());
        }
    }

    let expected = names.len() + 1;
    let attributes = AttributeSet::new(names);

    // ── Data: one record per line until a blank line ─────────────────────────
    let mut records = Vec::new();
    for (idx, line) in lines {
        let bytes = line.map_err(read_error)?;
        let line = std::str::from_utf8(&bytes).map_err(|e| {
            TrainerError::Format(format!("line {}: record is not valid UTF-8 ({e})", idx + 1))
        })?;
        let line = strip_cr(line);
        if line.is_empty() {
            break;
        }
        records.push(parse_record(line, idx + 1, expected)?);
    }

    Dataset::new(attributes, records)
}

/// Returns the attribute name declared on `line`, if it is one we keep.
fn attribute_name(line: &str) -> Option<&str> {
    if !line.starts_with(ATTRIBUTE_MARKER) {
        return None;
    }
    let parts: Vec<&str> = line.split(' ').collect();
    match parts.as_slice() {
        [_, name, _] if *name != CLASS_ATTRIBUTE => Some(name),
        _ => None,
    }
}

fn parse_record(line: &str, line_no: usize, expected: usize) -> Result<RelationRecord> {
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() != expected {
        return Err(TrainerError::Format(format!(
            "line {line_no}: record has {} fields, expected {expected}",
            parts.len()
        )));
    }

    let fields = parts
        .iter()
        .map(|token| {
            token.trim().parse::<f64>().map_err(|e| {
                TrainerError::Format(format!(
                    "line {line_no}: '{}' is not a number ({e})",
                    token.trim()
                ))
            })
        })
        .collect::<Result<Vec<f64>>>()?;

    Ok(RelationRecord::new(fields))
}

fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

// The path is filled in by `load`; readers handed to `parse` have none.
fn read_error(source: std::io::Error) -> TrainerError {
    TrainerError::Io {
        path: Default::default(),
        source,
    }
}
