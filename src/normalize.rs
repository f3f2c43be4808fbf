//! Token normalization.
//!
//! Every raw corpus word goes through the same pipeline before it is
//! counted: lowercase, strip everything outside the working alphabet,
//! stem. Words that end up empty are dropped.

use std::collections::HashSet;

use crate::stem::Stemmer;

/// Letters recognized by the normalizer: ASCII `a`-`z` plus the Polish
/// diacritics. Everything else is stripped from tokens.
pub const POLISH_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyząćęłńóśżź";

pub struct Normalizer {
    alphabet: HashSet<char>,
    stemmer: Box<dyn Stemmer>,
}

impl Normalizer {
    /// Normalizer over the default (Polish) alphabet.
    pub fn new(stemmer: Box<dyn Stemmer>) -> Self {
        Normalizer::with_alphabet(POLISH_ALPHABET, stemmer)
    }

    pub fn with_alphabet(alphabet: &str, stemmer: Box<dyn Stemmer>) -> Self {
        Normalizer {
            alphabet: alphabet.chars().collect(),
            stemmer,
        }
    }

    /// Maps a raw word to its normalized form, or `None` when nothing
    /// remains after filtering.
    ///
    /// # Example
    /// ```
    /// use word_associations::normalize::Normalizer;
    /// use word_associations::stem::NullStemmer;
    ///
    /// let normalizer = Normalizer::new(Box::new(NullStemmer));
    /// assert_eq!(normalizer.normalize("Kot,").as_deref(), Some("kot"));
    /// assert_eq!(normalizer.normalize("1234"), None);
    /// ```
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let filtered: String = raw
            .to_lowercase()
            .chars()
            .filter(|c| self.alphabet.contains(c))
            .collect();
        if filtered.is_empty() {
            return None;
        }
        Some(self.stemmer.stem(&filtered).unwrap_or(filtered))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stem::{DictionaryStemmer, NullStemmer};

    fn plain() -> Normalizer {
        Normalizer::new(Box::new(NullStemmer))
    }

    #[test]
    fn lowercases_and_strips_punctuation() {
        let n = plain();
        assert_eq!(n.normalize("Kot!").as_deref(), Some("kot"));
        assert_eq!(n.normalize("(pies)").as_deref(), Some("pies"));
        assert_eq!(n.normalize("pta-k").as_deref(), Some("ptak"));
    }

    #[test]
    fn keeps_polish_diacritics() {
        let n = plain();
        assert_eq!(n.normalize("Żółć").as_deref(), Some("żółć"));
        assert_eq!(n.normalize("węże,").as_deref(), Some("węże"));
    }

    #[test]
    fn drops_tokens_with_no_letters() {
        let n = plain();
        assert_eq!(n.normalize("1234"), None);
        assert_eq!(n.normalize("?!"), None);
        assert_eq!(n.normalize(""), None);
    }

    #[test]
    fn stems_after_filtering() {
        let stemmer = DictionaryStemmer::from_pairs([("koty", "kot")]);
        let n = Normalizer::new(Box::new(stemmer));
        // punctuation removed before the lexicon lookup
        assert_eq!(n.normalize("Koty,").as_deref(), Some("kot"));
        // unknown form kept as filtered lowercase
        assert_eq!(n.normalize("Ptaki").as_deref(), Some("ptaki"));
    }

    #[test]
    fn is_deterministic() {
        let n = plain();
        assert_eq!(n.normalize("Drzewo."), n.normalize("Drzewo."));
    }
}
