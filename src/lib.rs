//! # letter_topics
//!
//! Topic modeling and POS statistics for a historical letter corpus.
//!
//! This library is the analytical core behind a letter-corpus dashboard: it
//! takes a flat word-level table (one row per token with letter, sender,
//! year, and POS metadata), narrows it by sender attributes and time
//! period, and fits a seeded LDA topic model over the resulting letters.
//! Its outputs are plain tabular values a presentation layer can chart
//! directly.
//!
//! ## Pipeline
//!
//! Each analysis request runs six stages in order, each consuming only the
//! previous stage's output:
//!
//! 1. **Filter** ([`corpus::filter`]) — narrow the word table by POS tag,
//!    sender sex/rank, relationship code, or year range
//! 2. **Assemble** ([`corpus::assembler`]) — one document per
//!    `(letter, sender)` pair, words joined in row order
//! 3. **Normalize** ([`nlp`]) — tokenize, lowercase, drop numerals and
//!    single characters, lemmatize
//! 4. **Encode** ([`vocab`]) — first-seen vocabulary ids and bag-of-words
//!    vectors
//! 5. **Train** ([`model`]) — collapsed-Gibbs LDA with a fixed seed and
//!    data-driven priors
//! 6. **Report** ([`report`]) — dominant topics per letter, representative
//!    letters, per-topic summaries
//!
//! Document order is positional throughout: row `i` of every report table
//! refers to document `i` of the assembly stage. All state is request
//! scoped; nothing survives a request or is shared between requests.
//!
//! ## Example
//!
//! ```no_run
//! use letter_topics::{run_analysis, AnalysisRequest, FilterSpec, RecordTable};
//!
//! # fn load() -> RecordTable { RecordTable::default() }
//! let table: RecordTable = load();
//! let request = AnalysisRequest::new(5, 100).with_filters(FilterSpec {
//!     year_range: Some((1600, 1680)),
//!     ..FilterSpec::default()
//! });
//! let output = run_analysis(&table, &request)?;
//! for row in &output.topic_summary {
//!     println!("topic {}: {} letters ({})", row.topic, row.letter_count, row.keywords);
//! }
//! # Ok::<(), letter_topics::AnalysisError>(())
//! ```

pub mod analysis;
pub mod corpus;
pub mod errors;
pub mod model;
pub mod nlp;
pub mod records;
pub mod report;
pub mod stats;
pub mod vocab;

// Re-export commonly used types
pub use analysis::{run_analysis, AnalysisOutput, AnalysisRequest, FilterSpec};
pub use corpus::assembler::{assemble, AssembledDocument, LetterKey};
pub use errors::{AnalysisError, Result};
pub use model::lda::{LdaConfig, LdaModel};
pub use model::topics::{top_topics, RankedTopic};
pub use nlp::{Lemmatizer, Normalizer};
pub use records::{Column, ColumnarInput, RecordTable, WordRecord};
pub use report::{
    dominant_topics, representative_letters, topic_summary, DominantTopicRow,
    RepresentativeLetterRow, TopicSummaryRow,
};
pub use vocab::{BowCorpus, BowDocument, FrequencyBounds, Vocabulary, VocabularyOptions};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
