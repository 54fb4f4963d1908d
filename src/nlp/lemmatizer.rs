//! Dictionary-based lemmatization.
//!
//! Reduces inflected noun forms to their dictionary base form: an
//! irregular-plural lookup table first, then guarded regular suffix rules.
//! Tokens no rule applies to pass through unchanged. The scope is noun
//! morphology only — verbs and adjectives are left as-is, which is what the
//! corpus annotation downstream of us assumes.
//!
//! Input is expected to be lowercase (the normalizer lowercases before
//! lemmatizing).

use rustc_hash::{FxHashMap, FxHashSet};

/// A small dictionary-backed lemmatizer for English noun morphology.
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    /// Irregular plural → singular
    irregular: FxHashMap<&'static str, &'static str>,
    /// s-final words that are not plurals and must not be stripped
    non_plural: FxHashSet<&'static str>,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer {
    /// Create a lemmatizer with the built-in dictionaries.
    pub fn new() -> Self {
        let irregular: FxHashMap<&'static str, &'static str> = [
            ("men", "man"),
            ("women", "woman"),
            ("children", "child"),
            ("people", "person"),
            ("feet", "foot"),
            ("teeth", "tooth"),
            ("geese", "goose"),
            ("mice", "mouse"),
            ("lice", "louse"),
            ("oxen", "ox"),
            ("brethren", "brother"),
            ("wives", "wife"),
            ("lives", "life"),
            ("knives", "knife"),
            ("leaves", "leaf"),
            ("loaves", "loaf"),
            ("halves", "half"),
            ("thieves", "thief"),
            ("wolves", "wolf"),
            ("selves", "self"),
            ("shelves", "shelf"),
            ("dice", "die"),
            ("pence", "penny"),
        ]
        .into_iter()
        .collect();

        // Function words and uninflected s-final nouns common in the
        // letter corpus; stripping the s would produce non-words.
        let non_plural: FxHashSet<&'static str> = [
            "always", "perhaps", "whereas", "besides", "unless", "news", "alms",
            "amiss", "thus", "his", "hers", "ours", "yours", "theirs", "its",
            "this", "was", "is", "has", "does", "yes", "else", "whose", "once",
            "since", "towards", "means", "series", "species", "business",
            "witness", "goodness", "kindness", "sickness", "highness", "ness",
        ]
        .into_iter()
        .collect();

        Self {
            irregular,
            non_plural,
        }
    }

    /// Lemmatize a single lowercase token. Unknown forms pass through.
    pub fn lemmatize(&self, token: &str) -> String {
        if let Some(&base) = self.irregular.get(token) {
            return base.to_string();
        }
        if self.non_plural.contains(token) {
            return token.to_string();
        }

        // ladies -> lady
        if token.ends_with("ies") && token.len() > 4 {
            return format!("{}y", &token[..token.len() - 3]);
        }

        // churches -> church, boxes -> box, glasses -> glass
        if token.ends_with("es") && token.len() > 3 {
            let stem = &token[..token.len() - 2];
            if stem.ends_with("ss")
                || stem.ends_with("sh")
                || stem.ends_with("ch")
                || stem.ends_with('x')
                || stem.ends_with('z')
            {
                return stem.to_string();
            }
        }

        // letters -> letter; leave -ss, -us, -is endings alone
        if token.ends_with('s')
            && token.len() > 3
            && !token.ends_with("ss")
            && !token.ends_with("us")
            && !token.ends_with("is")
        {
            return token[..token.len() - 1].to_string();
        }

        token.to_string()
    }
}
