//! Document assembly.
//!
//! Folds the filtered word-level table into one document per
//! `(LetterID, Sender)` pair, concatenating word tokens in their original
//! row order. The sequence of [`LetterKey`]s produced here is the positional
//! index the topic reporter later joins model output against, so document
//! order must never be reshuffled between this stage and the reporter —
//! that correspondence is this module's contract.
//!
//! Groups appear in first-encounter order of their key, which depends only
//! on row order, not on key collation.

use crate::records::RecordTable;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// The `(LetterID, Sender)` pair identifying one document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LetterKey {
    pub letter_id: String,
    pub sender: String,
}

/// One assembled document: a letter's words joined into a single string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembledDocument {
    /// The join key for re-attaching letter metadata to model output
    pub key: LetterKey,
    /// All word tokens of the letter, space-joined in original order
    pub text: String,
}

/// Group the table by `(LetterID, Sender)` and assemble one document per
/// group. Within each group the word order is the row order of the input;
/// groups are emitted in first-encounter order.
pub fn assemble(table: &RecordTable) -> Vec<AssembledDocument> {
    let mut index: FxHashMap<(&str, &str), usize> = FxHashMap::default();
    let mut documents: Vec<AssembledDocument> = Vec::new();

    for record in table.iter() {
        let key = (record.letter_id.as_str(), record.sender.as_str());
        match index.get(&key) {
            Some(&pos) => {
                let doc = &mut documents[pos];
                doc.text.push(' ');
                doc.text.push_str(&record.word);
            }
            None => {
                index.insert(key, documents.len());
                documents.push(AssembledDocument {
                    key: LetterKey {
                        letter_id: record.letter_id.clone(),
                        sender: record.sender.clone(),
                    },
                    text: record.word.clone(),
                });
            }
        }
    }

    documents
}
