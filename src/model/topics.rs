//! Topic ranking and top-word summaries.
//!
//! After training, every topic is summarized by its highest-weight words
//! and scored with UMass coherence: for a topic's top words, how often do
//! word pairs actually co-occur in the same documents of the training
//! corpus? Well-separated, frequently co-occurring word sets score higher.
//! Topics are returned in descending coherence order.

use crate::model::lda::LdaModel;
use crate::vocab::BowCorpus;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// Number of top words considered per topic when scoring coherence.
const COHERENCE_TOP_WORDS: usize = 20;

/// One topic with its coherence score and top `(word, weight)` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTopic {
    /// Topic id in the fitted model
    pub topic_id: usize,
    /// UMass coherence over the training corpus
    pub coherence: f64,
    /// Top words with their within-topic weight, descending
    pub words: Vec<(String, f64)>,
}

/// Rank all topics of a fitted model by UMass coherence, descending; ties
/// resolve to the lower topic id.
pub fn top_topics(model: &LdaModel, corpus: &BowCorpus) -> Vec<RankedTopic> {
    let topic_words: Vec<Vec<(String, f64)>> = (0..model.num_topics())
        .map(|t| model.top_words(t, COHERENCE_TOP_WORDS))
        .collect();

    // Document sets only for the words that appear in some topic's top list.
    let mut needed: FxHashSet<u32> = FxHashSet::default();
    for words in &topic_words {
        for (word, _) in words {
            if let Some(id) = model.vocabulary().id(word) {
                needed.insert(id);
            }
        }
    }
    let mut doc_sets: FxHashMap<u32, FxHashSet<u32>> = FxHashMap::default();
    for (di, bag) in corpus.documents().iter().enumerate() {
        for &(id, _) in bag {
            if needed.contains(&id) {
                doc_sets.entry(id).or_default().insert(di as u32);
            }
        }
    }

    let mut ranked: Vec<RankedTopic> = topic_words
        .into_iter()
        .enumerate()
        .map(|(topic_id, words)| {
            let ids: Vec<Option<&FxHashSet<u32>>> = words
                .iter()
                .map(|(word, _)| model.vocabulary().id(word).and_then(|id| doc_sets.get(&id)))
                .collect();
            let coherence = umass_coherence(&ids);
            RankedTopic {
                topic_id,
                coherence,
                words,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.coherence
            .total_cmp(&a.coherence)
            .then(a.topic_id.cmp(&b.topic_id))
    });
    ranked
}

/// UMass score: sum over ordered word pairs (m later than l) of
/// `log((D(w_m, w_l) + 1) / D(w_l))`, where `D` counts documents.
fn umass_coherence(doc_sets: &[Option<&FxHashSet<u32>>]) -> f64 {
    let mut score = 0.0;
    for m in 1..doc_sets.len() {
        let Some(set_m) = doc_sets[m] else { continue };
        for set_l in doc_sets[..m].iter().flatten() {
            let d_l = set_l.len();
            if d_l == 0 {
                continue;
            }
            let co = set_m.intersection(set_l).count();
            score += ((co as f64 + 1.0) / d_l as f64).ln();
        }
    }
    score
}
