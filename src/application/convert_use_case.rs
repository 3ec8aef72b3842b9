// ============================================================
// Layer 2 — ConvertUseCase
// ============================================================
// Parses a relation file and writes it back out through the
// Dataset Writer: synthetic attribute names, 12 significant
// digits, and only the rows the parser accepted.

use std::path::Path;

use anyhow::{Context, Result};

use crate::data::{parser, transcoder, writer};

pub struct ConvertUseCase {
    input:       String,
    output:      String,
    name:        Option<String>,
    description: String,
}

impl ConvertUseCase {
    pub fn new(
        input:       impl Into<String>,
        output:      impl Into<String>,
        name:        Option<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            input:       input.into(),
            output:      output.into(),
            name,
            description: description.into(),
        }
    }

    /// Returns the number of rows written.
    pub fn execute(&self) -> Result<usize> {
        let dataset = parser::load(&self.input)
            .with_context(|| format!("Cannot load '{}'", self.input))?;

        // Default relation name: the input file stem
        let name = self.name.clone().unwrap_or_else(|| {
            Path::new(&self.input)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("relation")
                .to_string()
        });

        let matrix = transcoder::to_relation_matrix(&dataset);
        writer::save(&self.output, &name, &self.description, &matrix)
            .with_context(|| format!("Cannot write '{}'", self.output))?;

        tracing::info!(
            "Converted {} rows from '{}' to '{}'",
            matrix.rows(),
            self.input,
            self.output
        );
        Ok(matrix.rows())
    }
}
