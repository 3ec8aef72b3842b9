// ============================================================
// Layer 3 — Relation Domain Types
// ============================================================
// A relation file is a list of attribute declarations followed
// by numeric rows. Each row carries one value per attribute
// plus a trailing target value.
//
//   AttributeSet    — the declared attribute names (never `class`)
//   RelationRecord  — one row of values, target last
//   Dataset         — both of the above, with the length invariant
//                     `record.len() == attributes.len() + 1`
//                     checked once at construction

use crate::domain::error::{Result, TrainerError};

/// Name reserved for the target column; it never enters an AttributeSet.
pub const CLASS_ATTRIBUTE: &str = "class";

/// Ordered attribute names, fixed once the header has been read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    names: Vec<String>,
}

impl AttributeSet {
    /// Build an AttributeSet, dropping any attribute literally named `class`.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names
            .into_iter()
            .map(Into::into)
            .filter(|n| n != CLASS_ATTRIBUTE)
            .collect();
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// One data row: attribute values in declaration order, then the target.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationRecord {
    fields: Vec<f64>,
}

impl RelationRecord {
    pub fn new(fields: Vec<f64>) -> Self {
        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> &[f64] {
        &self.fields
    }

    /// Attribute values without the trailing target.
    pub fn inputs(&self) -> &[f64] {
        let n = self.fields.len().saturating_sub(1);
        &self.fields[..n]
    }

    /// The trailing target value, if the record has any field at all.
    pub fn target(&self) -> Option<f64> {
        self.fields.last().copied()
    }
}

/// A parsed relation: attributes plus records in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    attributes: AttributeSet,
    records: Vec<RelationRecord>,
}

impl Dataset {
    /// Build a Dataset, rejecting any record whose length is not
    /// `attributes.len() + 1`.
    pub fn new(attributes: AttributeSet, records: Vec<RelationRecord>) -> Result<Self> {
        let expected = attributes.len() + 1;
        if let Some((i, bad)) = records
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != expected)
        {
            return Err(TrainerError::Format(format!(
                "record {i} has {} fields, expected {expected}",
                bad.len()
            )));
        }
        Ok(Self { attributes, records })
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    pub fn records(&self) -> &[RelationRecord] {
        &self.records
    }

    /// Number of input attributes (record length minus the target).
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
