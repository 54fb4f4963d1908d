//! Topic model training and topic-level summaries.
//!
//! [`lda`] holds the seeded collapsed-Gibbs trainer and the fitted model;
//! [`topics`] ranks the fitted topics by coherence and extracts their top
//! words.

pub mod lda;
pub mod topics;

pub use lda::{LdaConfig, LdaModel};
pub use topics::{top_topics, RankedTopic};
