//! Request-scoped pipeline orchestration.
//!
//! One analysis request — a choice of filters plus topic and iteration
//! counts — runs the full pipeline to completion synchronously: filter,
//! assemble, normalize, encode, train, report. Vocabulary, corpus, and
//! model are rebuilt from scratch for every request; nothing is cached or
//! shared across requests, so an embedding service can run concurrent
//! requests against independent instances without coordination.
//!
//! The first stage error aborts the request; no partial results are
//! returned.

use crate::corpus::assembler::{assemble, LetterKey};
use crate::corpus::filter;
use crate::errors::Result;
use crate::model::lda::{LdaConfig, LdaModel};
use crate::model::topics::{top_topics, RankedTopic};
use crate::nlp::Normalizer;
use crate::records::RecordTable;
use crate::report::{
    dominant_topics, representative_letters, topic_summary, DominantTopicRow,
    RepresentativeLetterRow, TopicSummaryRow,
};
use crate::vocab::{BowCorpus, VocabularyOptions};
use serde::{Deserialize, Serialize};

// ============================================================================
// Request
// ============================================================================

/// The record-level selection of one request. Each present filter is
/// applied in declaration order; absent filters pass everything through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Keep only these POS tags
    pub tags: Option<Vec<String>>,
    /// Keep only this sender sex
    pub sex: Option<String>,
    /// Keep only these sender ranks
    pub ranks: Option<Vec<String>>,
    /// Keep only these relationship codes
    pub rel_codes: Option<Vec<String>>,
    /// Keep only years in this inclusive range
    pub year_range: Option<(i32, i32)>,
}

impl FilterSpec {
    /// Apply every present filter, chained in declaration order.
    pub fn apply(&self, table: &RecordTable) -> RecordTable {
        let mut current = table.clone();
        if let Some(tags) = &self.tags {
            current = filter::by_tags(&current, tags);
        }
        if let Some(sex) = &self.sex {
            current = filter::by_sex(&current, sex);
        }
        if let Some(ranks) = &self.ranks {
            current = filter::by_ranks(&current, ranks);
        }
        if let Some(rel_codes) = &self.rel_codes {
            current = filter::by_rel_codes(&current, rel_codes);
        }
        if let Some((lo, hi)) = self.year_range {
            current = filter::by_years(&current, lo, hi);
        }
        current
    }
}

/// One analysis request: filters plus model parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Record-level selection applied before assembly
    pub filters: FilterSpec,
    /// Number of latent topics to fit
    pub num_topics: usize,
    /// Gibbs sweeps over the corpus
    pub iterations: usize,
    /// Vocabulary construction options
    pub vocabulary: VocabularyOptions,
}

impl AnalysisRequest {
    /// Create a request with no filters and default vocabulary options.
    pub fn new(num_topics: usize, iterations: usize) -> Self {
        Self {
            filters: FilterSpec::default(),
            num_topics,
            iterations,
            vocabulary: VocabularyOptions::default(),
        }
    }

    /// Replace the filter selection.
    pub fn with_filters(mut self, filters: FilterSpec) -> Self {
        self.filters = filters;
        self
    }

    /// Replace the vocabulary options.
    pub fn with_vocabulary(mut self, vocabulary: VocabularyOptions) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Validate the model parameters without running anything.
    pub fn validate(&self) -> Result<()> {
        LdaConfig::new(self.num_topics, self.iterations).validate()
    }
}

// ============================================================================
// Output
// ============================================================================

/// Everything one request hands to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutput {
    /// One row per letter: dominant topic, contribution, keywords, metadata
    pub dominant_topics: Vec<DominantTopicRow>,
    /// The most representative letter of each observed topic
    pub representative_letters: Vec<RepresentativeLetterRow>,
    /// Per-topic letter counts, sender counts, proportions
    pub topic_summary: Vec<TopicSummaryRow>,
    /// All topics ranked by coherence, with weighted top words
    pub top_topics: Vec<RankedTopic>,
    /// The positional `(letter, sender)` index the tables were joined on
    pub document_keys: Vec<LetterKey>,
}

/// Run the full pipeline for one request.
pub fn run_analysis(table: &RecordTable, request: &AnalysisRequest) -> Result<AnalysisOutput> {
    request.validate()?;

    let filtered = request.filters.apply(table);
    let documents = assemble(&filtered);
    let token_lists = Normalizer::new().normalize_documents(&documents);
    let corpus = BowCorpus::build(&token_lists, &request.vocabulary)?;

    let config = LdaConfig::new(request.num_topics, request.iterations);
    let model = LdaModel::train(&corpus, &config)?;

    let document_keys: Vec<LetterKey> = documents.into_iter().map(|doc| doc.key).collect();
    let dominant = dominant_topics(&model, &document_keys)?;
    let representative = representative_letters(&dominant);
    let summary = topic_summary(&dominant);
    let ranked = top_topics(&model, &corpus);

    Ok(AnalysisOutput {
        dominant_topics: dominant,
        representative_letters: representative,
        topic_summary: summary,
        top_topics: ranked,
        document_keys,
    })
}
