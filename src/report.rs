//! Topic reporting tables.
//!
//! Three independent read-only reductions over a fitted model:
//!
//! - [`dominant_topics`] — one row per document with its dominant topic,
//!   that topic's contribution, the topic keywords, and the letter/sender
//!   metadata re-attached positionally from the assembler's key index.
//! - [`representative_letters`] — for each observed topic, the single
//!   letter where that topic contributed most.
//! - [`topic_summary`] — per-topic letter counts, distinct sender counts,
//!   and the proportion of all letters.
//!
//! The dominant-topic join is positional, not keyed: row `i` of the output
//! corresponds to document `i` of the corpus, which corresponds to key `i`
//! of the assembler's index. Document order integrity from assembly to here
//! is mandatory.

use crate::corpus::assembler::LetterKey;
use crate::errors::{AnalysisError, Result};
use crate::model::lda::LdaModel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Keywords shown per topic: the top-10 words joined with ", ".
const KEYWORD_COUNT: usize = 10;

/// One row of the dominant-topic table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DominantTopicRow {
    /// The topic with the highest probability for this letter
    pub dominant_topic: u32,
    /// That topic's probability, rounded to 4 decimals
    pub contribution: f64,
    /// The topic's top words, joined with ", "
    pub keywords: String,
    pub letter_id: String,
    pub sender: String,
}

/// One row of the representative-letter table: the letter where a topic
/// contributed most.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepresentativeLetterRow {
    pub topic: u32,
    /// Contribution rounded to 3 decimals
    pub contribution: f64,
    pub keywords: String,
    pub letter_id: String,
    pub sender: String,
}

/// One row of the per-topic summary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicSummaryRow {
    pub topic: u32,
    pub keywords: String,
    /// Number of letters for which this topic is dominant
    pub letter_count: usize,
    /// Number of distinct senders among those letters
    pub sender_count: usize,
    /// letter_count / total letters, rounded to 4 decimals
    pub proportion: f64,
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Assign each document its dominant topic and re-attach letter metadata.
///
/// One output row per document, in document order. `keys` is the assembler's
/// positional index; its length must equal the model's document count.
pub fn dominant_topics(model: &LdaModel, keys: &[LetterKey]) -> Result<Vec<DominantTopicRow>> {
    if keys.len() != model.num_documents() {
        return Err(AnalysisError::internal(format!(
            "document index has {} keys but the model was fitted on {} documents",
            keys.len(),
            model.num_documents()
        )));
    }

    // Keyword strings are shared by every letter with the same dominant
    // topic; build each once.
    let mut keyword_cache: BTreeMap<u32, String> = BTreeMap::new();

    let mut rows = Vec::with_capacity(keys.len());
    for (doc, key) in keys.iter().enumerate() {
        let theta = model.doc_topic_distribution(doc);
        // Ties resolve to the lowest topic id.
        let (topic, probability) = theta
            .iter()
            .enumerate()
            .fold((0usize, f64::NEG_INFINITY), |best, (t, &p)| {
                if p > best.1 {
                    (t, p)
                } else {
                    best
                }
            });

        let topic = topic as u32;
        let keywords = keyword_cache
            .entry(topic)
            .or_insert_with(|| {
                model
                    .top_words(topic as usize, KEYWORD_COUNT)
                    .into_iter()
                    .map(|(word, _)| word)
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .clone();

        rows.push(DominantTopicRow {
            dominant_topic: topic,
            contribution: round_to(probability, 4),
            keywords,
            letter_id: key.letter_id.clone(),
            sender: key.sender.clone(),
        });
    }

    Ok(rows)
}

/// For each topic observed in the dominant-topic table, the row with the
/// maximal contribution (earlier rows win ties). One output row per
/// observed topic, ascending by topic id.
pub fn representative_letters(rows: &[DominantTopicRow]) -> Vec<RepresentativeLetterRow> {
    let mut best: BTreeMap<u32, &DominantTopicRow> = BTreeMap::new();
    for row in rows {
        match best.get(&row.dominant_topic) {
            Some(current) if current.contribution >= row.contribution => {}
            _ => {
                best.insert(row.dominant_topic, row);
            }
        }
    }

    best.into_values()
        .map(|row| RepresentativeLetterRow {
            topic: row.dominant_topic,
            contribution: round_to(row.contribution, 3),
            keywords: row.keywords.clone(),
            letter_id: row.letter_id.clone(),
            sender: row.sender.clone(),
        })
        .collect()
}

/// Per-topic corpus statistics: letter counts, distinct senders, and the
/// proportion of all letters. One output row per observed topic, ascending
/// by topic id; topics with no assigned letters do not appear.
pub fn topic_summary(rows: &[DominantTopicRow]) -> Vec<TopicSummaryRow> {
    struct Group<'a> {
        keywords: &'a str,
        letter_count: usize,
        senders: std::collections::BTreeSet<&'a str>,
    }

    let mut groups: BTreeMap<u32, Group> = BTreeMap::new();
    for row in rows {
        let group = groups.entry(row.dominant_topic).or_insert_with(|| Group {
            keywords: &row.keywords,
            letter_count: 0,
            senders: Default::default(),
        });
        group.letter_count += 1;
        group.senders.insert(&row.sender);
    }

    let total = rows.len() as f64;
    groups
        .into_iter()
        .map(|(topic, group)| TopicSummaryRow {
            topic,
            keywords: group.keywords.to_string(),
            letter_count: group.letter_count,
            sender_count: group.senders.len(),
            proportion: round_to(group.letter_count as f64 / total, 4),
        })
        .collect()
}
