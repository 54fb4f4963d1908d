//! Corpus filters.
//!
//! Pure functions that narrow a [`RecordTable`] by one predicate each. No
//! filter mutates its input; each returns a new table containing the rows
//! that satisfy the predicate, in the original order. Filters compose by
//! sequential application and are idempotent.
//!
//! An empty selection set is an empty result, not an error — the emptiness
//! is only diagnosed later, when the vocabulary builder finds no documents.

use crate::records::RecordTable;
use rustc_hash::FxHashSet;

/// Keep rows whose POS tag is in `tags`.
pub fn by_tags<S: AsRef<str>>(table: &RecordTable, tags: &[S]) -> RecordTable {
    let wanted: FxHashSet<&str> = tags.iter().map(|s| s.as_ref()).collect();
    table
        .iter()
        .filter(|r| wanted.contains(r.tag.as_str()))
        .cloned()
        .collect()
}

/// Keep rows whose sender sex equals `sex`.
pub fn by_sex(table: &RecordTable, sex: &str) -> RecordTable {
    table
        .iter()
        .filter(|r| r.sender_sex == sex)
        .cloned()
        .collect()
}

/// Keep rows whose sender rank is in `ranks`.
pub fn by_ranks<S: AsRef<str>>(table: &RecordTable, ranks: &[S]) -> RecordTable {
    let wanted: FxHashSet<&str> = ranks.iter().map(|s| s.as_ref()).collect();
    table
        .iter()
        .filter(|r| wanted.contains(r.sender_rank.as_str()))
        .cloned()
        .collect()
}

/// Keep rows whose relationship code is in `rel_codes`.
pub fn by_rel_codes<S: AsRef<str>>(table: &RecordTable, rel_codes: &[S]) -> RecordTable {
    let wanted: FxHashSet<&str> = rel_codes.iter().map(|s| s.as_ref()).collect();
    table
        .iter()
        .filter(|r| wanted.contains(r.rel_code.as_str()))
        .cloned()
        .collect()
}

/// Keep rows whose year falls in `[lo, hi]`, both ends inclusive.
pub fn by_years(table: &RecordTable, lo: i32, hi: i32) -> RecordTable {
    table
        .iter()
        .filter(|r| r.year >= lo && r.year <= hi)
        .cloned()
        .collect()
}
