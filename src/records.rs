//! Core record types for letter_topics
//!
//! The pipeline consumes a flat word-level table produced by an external
//! corpus loader: one row per word token, carrying the letter it came from,
//! its sender attributes, the year, the word text, and its POS tag. This
//! module defines that record type, the immutable table wrapper every stage
//! operates on, and the schema-checked columnar handoff from the loader.

use crate::errors::{AnalysisError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// WordRecord
// ============================================================================

/// One word token of the corpus, with letter and sender metadata.
///
/// Every record belongs to exactly one letter and one sender; the
/// `(letter_id, sender)` pair is the stable join key used to reattach
/// metadata to model output further down the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    /// Letter identifier
    pub letter_id: String,
    /// Sender identifier
    pub sender: String,
    /// Sender sex code
    pub sender_sex: String,
    /// Sender social rank code
    pub sender_rank: String,
    /// Sender-recipient relationship code
    pub rel_code: String,
    /// Year the letter was written
    pub year: i32,
    /// The word token text
    pub word: String,
    /// POS tag assigned by the corpus annotation
    pub tag: String,
}

// ============================================================================
// RecordTable
// ============================================================================

/// An immutable, ordered collection of [`WordRecord`]s.
///
/// Tables are never mutated in place: every filter produces a new table,
/// preserving the row order of its input. Row order is load-bearing — the
/// document assembler derives document order from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordTable {
    records: Vec<WordRecord>,
}

impl RecordTable {
    /// Create a table from pre-built records.
    pub fn new(records: Vec<WordRecord>) -> Self {
        Self { records }
    }

    /// Build a table from the corpus loader's columnar handoff.
    ///
    /// Validates that every required column is present, correctly typed, and
    /// of equal length. Fails with [`AnalysisError::Schema`] naming the
    /// offending column otherwise.
    pub fn from_columns(input: &ColumnarInput) -> Result<Self> {
        let letter_id = input.string_column("ID")?;
        let sender = input.string_column("Sender")?;
        let sender_sex = input.string_column("SenderSex")?;
        let sender_rank = input.string_column("SenderRank")?;
        let rel_code = input.string_column("RelCode")?;
        let year = input.integer_column("Year")?;
        let word = input.string_column("Words")?;
        let tag = input.string_column("Tags")?;

        let len = letter_id.len();
        for (name, col_len) in [
            ("Sender", sender.len()),
            ("SenderSex", sender_sex.len()),
            ("SenderRank", sender_rank.len()),
            ("RelCode", rel_code.len()),
            ("Year", year.len()),
            ("Words", word.len()),
            ("Tags", tag.len()),
        ] {
            if col_len != len {
                return Err(AnalysisError::schema(
                    name,
                    format!("column has {} rows, expected {}", col_len, len),
                ));
            }
        }

        let records = (0..len)
            .map(|i| WordRecord {
                letter_id: letter_id[i].clone(),
                sender: sender[i].clone(),
                sender_sex: sender_sex[i].clone(),
                sender_rank: sender_rank[i].clone(),
                rel_code: rel_code[i].clone(),
                year: year[i],
                word: word[i].clone(),
                tag: tag[i].clone(),
            })
            .collect();

        Ok(Self { records })
    }

    /// Number of rows in the table.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The rows, in order.
    pub fn records(&self) -> &[WordRecord] {
        &self.records
    }

    /// Iterate over the rows in order.
    pub fn iter(&self) -> std::slice::Iter<'_, WordRecord> {
        self.records.iter()
    }
}

impl FromIterator<WordRecord> for RecordTable {
    fn from_iter<I: IntoIterator<Item = WordRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// Columnar handoff
// ============================================================================

/// A single named column of the loader handoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Column {
    /// String / categorical values
    Str(Vec<String>),
    /// Integer values (the `Year` column)
    Int(Vec<i32>),
}

/// The flat named-column table an external corpus loader hands to the
/// pipeline. Required columns: `ID`, `Sender`, `SenderSex`, `SenderRank`,
/// `RelCode`, `Year`, `Words`, `Tags`.
#[derive(Debug, Clone, Default)]
pub struct ColumnarInput {
    columns: FxHashMap<String, Column>,
}

impl ColumnarInput {
    /// Create an empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a string column, replacing any existing column of the same name.
    pub fn with_strings<S: Into<String>>(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        self.columns.insert(
            name.into(),
            Column::Str(values.into_iter().map(Into::into).collect()),
        );
        self
    }

    /// Add an integer column, replacing any existing column of the same name.
    pub fn with_integers(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = i32>,
    ) -> Self {
        self.columns
            .insert(name.into(), Column::Int(values.into_iter().collect()));
        self
    }

    fn string_column(&self, name: &str) -> Result<&[String]> {
        match self.columns.get(name) {
            Some(Column::Str(values)) => Ok(values),
            Some(Column::Int(_)) => Err(AnalysisError::schema(
                name,
                "expected a string column, found an integer column",
            )),
            None => Err(AnalysisError::schema(name, "required column is missing")),
        }
    }

    fn integer_column(&self, name: &str) -> Result<&[i32]> {
        match self.columns.get(name) {
            Some(Column::Int(values)) => Ok(values),
            Some(Column::Str(_)) => Err(AnalysisError::schema(
                name,
                "expected an integer column, found a string column",
            )),
            None => Err(AnalysisError::schema(name, "required column is missing")),
        }
    }
}
