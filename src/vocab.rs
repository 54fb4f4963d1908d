//! Vocabulary and bag-of-words encoding.
//!
//! A [`Vocabulary`] assigns each distinct normalized token a dense integer
//! id in first-occurrence order across the documents of one training run;
//! it is immutable once built and is the id space for the corresponding
//! [`BowCorpus`]. Each document becomes a sparse term-frequency vector
//! (ascending term id), and document order matches the normalizer's output
//! so that downstream per-letter indexing stays positional.
//!
//! An optional document-frequency filter can prune tokens that appear in
//! too few or too many documents; it is disabled by default.

use crate::errors::{AnalysisError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// Vocabulary
// ============================================================================

/// A token ↔ dense integer id mapping, immutable after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    word_to_id: FxHashMap<String, u32>,
    id_to_word: Vec<String>,
}

impl Vocabulary {
    fn intern(&mut self, word: &str) -> u32 {
        if let Some(&id) = self.word_to_id.get(word) {
            return id;
        }
        let id = self.id_to_word.len() as u32;
        self.word_to_id.insert(word.to_string(), id);
        self.id_to_word.push(word.to_string());
        id
    }

    /// Look up the id of a token.
    pub fn id(&self, word: &str) -> Option<u32> {
        self.word_to_id.get(word).copied()
    }

    /// Look up the token for an id.
    pub fn word(&self, id: u32) -> Option<&str> {
        self.id_to_word.get(id as usize).map(String::as_str)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.id_to_word.len()
    }

    /// Check if the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.id_to_word.is_empty()
    }

    /// All tokens, in id order.
    pub fn words(&self) -> &[String] {
        &self.id_to_word
    }
}

// ============================================================================
// Bag-of-words corpus
// ============================================================================

/// One document as sparse `(term id, count)` pairs, ascending by term id.
pub type BowDocument = Vec<(u32, u32)>;

/// Document-frequency bounds for vocabulary pruning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyBounds {
    /// Keep tokens appearing in at least this many documents
    pub no_below: usize,
    /// Keep tokens appearing in at most this fraction of documents
    pub no_above: f64,
}

/// Options for vocabulary construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VocabularyOptions {
    /// Optional document-frequency filter; `None` keeps every token
    pub frequency_bounds: Option<FrequencyBounds>,
}

/// The encoded corpus: a vocabulary plus one bag per document, in the
/// document order of the normalizer's output.
#[derive(Debug, Clone)]
pub struct BowCorpus {
    vocabulary: Vocabulary,
    documents: Vec<BowDocument>,
}

impl BowCorpus {
    /// Build the vocabulary and encode every document against it.
    ///
    /// Fails with [`AnalysisError::EmptyCorpus`] when there are no documents
    /// at all, or when every document reduced to zero tokens. Individual
    /// empty documents are tolerated and participate as empty bags.
    pub fn build(token_lists: &[Vec<String>], options: &VocabularyOptions) -> Result<Self> {
        if token_lists.is_empty() {
            return Err(AnalysisError::empty_corpus(
                "no documents reached the vocabulary builder",
            ));
        }

        let mut vocabulary = Vocabulary::default();
        let mut documents: Vec<BowDocument> = Vec::with_capacity(token_lists.len());

        for tokens in token_lists {
            let mut counts: FxHashMap<u32, u32> = FxHashMap::default();
            for token in tokens {
                let id = vocabulary.intern(token);
                *counts.entry(id).or_insert(0) += 1;
            }
            let mut bag: BowDocument = counts.into_iter().collect();
            bag.sort_unstable_by_key(|&(id, _)| id);
            documents.push(bag);
        }

        if vocabulary.is_empty() {
            return Err(AnalysisError::empty_corpus(
                "every document reduced to zero tokens after normalization",
            ));
        }

        let corpus = Self {
            vocabulary,
            documents,
        };
        match options.frequency_bounds {
            Some(bounds) => corpus.prune(bounds),
            None => Ok(corpus),
        }
    }

    /// Re-densify the vocabulary after dropping tokens outside the
    /// document-frequency bounds. Surviving ids keep their relative
    /// (first-seen) order.
    fn prune(self, bounds: FrequencyBounds) -> Result<Self> {
        let num_docs = self.documents.len() as f64;
        let mut doc_freq = vec![0usize; self.vocabulary.len()];
        for bag in &self.documents {
            for &(id, _) in bag {
                doc_freq[id as usize] += 1;
            }
        }

        let mut remap: Vec<Option<u32>> = vec![None; self.vocabulary.len()];
        let mut vocabulary = Vocabulary::default();
        for (old_id, word) in self.vocabulary.words().iter().enumerate() {
            let df = doc_freq[old_id];
            if df >= bounds.no_below && (df as f64) <= bounds.no_above * num_docs {
                remap[old_id] = Some(vocabulary.intern(word));
            }
        }

        if vocabulary.is_empty() {
            return Err(AnalysisError::empty_corpus(
                "frequency bounds removed every vocabulary token",
            ));
        }

        let documents = self
            .documents
            .iter()
            .map(|bag| {
                bag.iter()
                    .filter_map(|&(id, count)| remap[id as usize].map(|new_id| (new_id, count)))
                    .collect()
            })
            .collect();

        Ok(Self {
            vocabulary,
            documents,
        })
    }

    /// The vocabulary this corpus is encoded against.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// The encoded documents, in document order.
    pub fn documents(&self) -> &[BowDocument] {
        &self.documents
    }

    /// Number of documents.
    pub fn num_documents(&self) -> usize {
        self.documents.len()
    }

    /// Total token count across all bags.
    pub fn total_tokens(&self) -> u64 {
        self.documents
            .iter()
            .flat_map(|bag| bag.iter().map(|&(_, count)| count as u64))
            .sum()
    }
}
