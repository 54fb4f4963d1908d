//! Corpus selection and document assembly.
//!
//! The first two pipeline stages: narrowing the word-level table by sender
//! attributes, POS tags, or time period ([`filter`]), and folding the
//! surviving rows into one document per letter ([`assembler`]).

pub mod assembler;
pub mod filter;

pub use assembler::{assemble, AssembledDocument, LetterKey};
