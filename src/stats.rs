//! Corpus statistics for the presentation layer.
//!
//! Small aggregations over the word-level table that the dashboard charts
//! directly, without going through the topic model: word counts per letter,
//! POS tag counts normalized against letter length, per-tag yearly trends,
//! and the distinct tag inventory.

use crate::records::RecordTable;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Word count of one letter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCountRow {
    pub letter_id: String,
    pub year: i32,
    pub count: usize,
}

/// Occurrences of one POS tag within one letter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosCountRow {
    pub letter_id: String,
    pub tag: String,
    pub year: i32,
    pub count: usize,
    /// Share of the letter's total word count, in percent
    pub percentage: f64,
}

/// Count word tokens per letter, in first-seen letter order.
pub fn word_counts(table: &RecordTable) -> Vec<WordCountRow> {
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut rows: Vec<WordCountRow> = Vec::new();

    for record in table.iter() {
        match index.get(record.letter_id.as_str()) {
            Some(&pos) => rows[pos].count += 1,
            None => {
                index.insert(&record.letter_id, rows.len());
                rows.push(WordCountRow {
                    letter_id: record.letter_id.clone(),
                    year: record.year,
                    count: 1,
                });
            }
        }
    }

    rows
}

/// Count POS tag occurrences per letter, normalized against the letter's
/// total word count. Rows appear in first-seen `(letter, tag)` order.
pub fn pos_counts(table: &RecordTable) -> Vec<PosCountRow> {
    let mut letter_totals: FxHashMap<&str, usize> = FxHashMap::default();
    for record in table.iter() {
        *letter_totals.entry(&record.letter_id).or_insert(0) += 1;
    }

    let mut index: FxHashMap<(&str, &str), usize> = FxHashMap::default();
    let mut rows: Vec<PosCountRow> = Vec::new();
    for record in table.iter() {
        let key = (record.letter_id.as_str(), record.tag.as_str());
        match index.get(&key) {
            Some(&pos) => rows[pos].count += 1,
            None => {
                index.insert(key, rows.len());
                rows.push(PosCountRow {
                    letter_id: record.letter_id.clone(),
                    tag: record.tag.clone(),
                    year: record.year,
                    count: 1,
                    percentage: 0.0,
                });
            }
        }
    }

    for row in &mut rows {
        let total = letter_totals[row.letter_id.as_str()];
        row.percentage = row.count as f64 / total as f64 * 100.0;
    }

    rows
}

/// Yearly mean of the normalized percentage for one tag, ascending by year.
/// The per-letter percentages of all letters from one year are averaged.
pub fn mean_pos_percentage_by_year(rows: &[PosCountRow], tag: &str) -> Vec<(i32, f64)> {
    let mut by_year: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
    for row in rows.iter().filter(|r| r.tag == tag) {
        let entry = by_year.entry(row.year).or_insert((0.0, 0));
        entry.0 += row.percentage;
        entry.1 += 1;
    }

    by_year
        .into_iter()
        .map(|(year, (sum, n))| (year, sum / n as f64))
        .collect()
}

/// The distinct POS tags present in the table, sorted.
pub fn distinct_tags(table: &RecordTable) -> Vec<String> {
    table
        .iter()
        .map(|r| r.tag.clone())
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect()
}
