//! Text normalization.
//!
//! Stage 3 of the pipeline: turning each assembled document string into an
//! ordered list of normalized tokens. Tokenization and the drop rules live
//! in [`tokenizer`]; the dictionary-based lemmatizer lives in [`lemmatizer`].

pub mod lemmatizer;
pub mod tokenizer;

pub use lemmatizer::Lemmatizer;
pub use tokenizer::Normalizer;
