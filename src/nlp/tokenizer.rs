//! Tokenization and normalization.
//!
//! Each document is split into word tokens with Unicode word segmentation
//! (alphanumeric runs; punctuation and whitespace are separators), then
//! lowercased. Purely numeric tokens and single-character tokens are
//! dropped; surviving tokens are lemmatized. Token order within a document
//! and document order across the corpus are both preserved.

use crate::corpus::assembler::AssembledDocument;
use crate::nlp::lemmatizer::Lemmatizer;
use unicode_segmentation::UnicodeSegmentation;

/// The text normalizer: tokenize, lowercase, drop, lemmatize.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    lemmatizer: Lemmatizer,
}

impl Normalizer {
    /// Create a normalizer with the default lemmatizer.
    pub fn new() -> Self {
        Self {
            lemmatizer: Lemmatizer::new(),
        }
    }

    /// Normalize one document string into an ordered token list.
    ///
    /// A document can legitimately normalize to an empty list (e.g. a letter
    /// consisting only of numerals); the caller decides whether that is
    /// fatal for the corpus as a whole.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        text.unicode_words()
            .filter(|word| word.chars().any(|c| c.is_alphanumeric()))
            .map(str::to_lowercase)
            .filter(|word| !word.chars().all(|c| c.is_numeric()))
            .filter(|word| word.chars().count() > 1)
            .map(|word| self.lemmatizer.lemmatize(&word))
            .collect()
    }

    /// Normalize every assembled document, one token list per document, in
    /// the same order as the input.
    pub fn normalize_documents(&self, documents: &[AssembledDocument]) -> Vec<Vec<String>> {
        documents
            .iter()
            .map(|doc| self.normalize(&doc.text))
            .collect()
    }
}
