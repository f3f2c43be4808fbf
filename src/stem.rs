//! Morphological stemming backends.
//!
//! Stemming is pluggable: the scoring engine only asks for a canonical
//! stem and falls back to the surface form when none is known. Languages
//! covered by Snowball use [`rust_stemmers`]; for the rest (notably
//! Polish) a plain-text lexicon can be supplied.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use clap::ValueEnum;
use rust_stemmers::Algorithm;

use crate::{Error, Result};

/// Looks up the canonical stem of a single word.
///
/// Returns `None` when no stem is known; callers keep the word as-is in
/// that case.
pub trait Stemmer {
    fn stem(&self, word: &str) -> Option<String>;
}

/// Stemmer that knows no stems at all. Every word is kept unchanged.
pub struct NullStemmer;

impl Stemmer for NullStemmer {
    fn stem(&self, _word: &str) -> Option<String> {
        None
    }
}

/// Languages supported by the Snowball stemmer backend.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StemLang {
    En,
    De,
    Fr,
    Es,
    It,
    Pt,
    Nl,
    Ru,
    Sv,
    Fi,
    Da,
    Hu,
    Ro,
    Tr,
}

impl StemLang {
    fn algorithm(self) -> Algorithm {
        match self {
            StemLang::En => Algorithm::English,
            StemLang::De => Algorithm::German,
            StemLang::Fr => Algorithm::French,
            StemLang::Es => Algorithm::Spanish,
            StemLang::It => Algorithm::Italian,
            StemLang::Pt => Algorithm::Portuguese,
            StemLang::Nl => Algorithm::Dutch,
            StemLang::Ru => Algorithm::Russian,
            StemLang::Sv => Algorithm::Swedish,
            StemLang::Fi => Algorithm::Finnish,
            StemLang::Da => Algorithm::Danish,
            StemLang::Hu => Algorithm::Hungarian,
            StemLang::Ro => Algorithm::Romanian,
            StemLang::Tr => Algorithm::Turkish,
        }
    }
}

/// Algorithmic Snowball stemmer. Always produces a stem.
pub struct SnowballStemmer {
    inner: rust_stemmers::Stemmer,
}

impl SnowballStemmer {
    pub fn new(lang: StemLang) -> Self {
        SnowballStemmer {
            inner: rust_stemmers::Stemmer::create(lang.algorithm()),
        }
    }
}

impl Stemmer for SnowballStemmer {
    fn stem(&self, word: &str) -> Option<String> {
        Some(self.inner.stem(word).into_owned())
    }
}

/// Lexicon-backed stemmer for languages Snowball does not cover.
///
/// The lexicon is plain text, one entry per line: the inflected form, a
/// tab, the stem. Further tab-separated columns (e.g. morphological
/// tags) are ignored. Blank lines and lines starting with `#` are
/// skipped.
#[derive(Debug)]
pub struct DictionaryStemmer {
    stems: HashMap<String, String>,
}

impl DictionaryStemmer {
    pub fn from_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let mut stems = HashMap::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut columns = line.split('\t');
            match (columns.next(), columns.next()) {
                (Some(form), Some(stem)) if !form.is_empty() && !stem.is_empty() => {
                    stems.insert(form.to_string(), stem.to_string());
                }
                _ => {
                    return Err(Error::InvalidStemEntry {
                        path: path.to_path_buf(),
                        line: index + 1,
                    });
                }
            }
        }
        Ok(DictionaryStemmer { stems })
    }

    /// Build a stemmer from in-memory pairs of (inflected form, stem).
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        DictionaryStemmer {
            stems: pairs
                .into_iter()
                .map(|(form, stem)| (form.into(), stem.into()))
                .collect(),
        }
    }
}

impl Stemmer for DictionaryStemmer {
    fn stem(&self, word: &str) -> Option<String> {
        self.stems.get(word).cloned()
    }
}
