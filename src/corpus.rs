//! Corpus access and occurrence statistics.
//!
//! A [`TokenSource`] streams the normalized token sequence of a corpus
//! file and can be re-read from the start, which the engine relies on:
//! one full pass builds the [`Corpus`] occurrence index, a second one
//! drives the co-occurrence window. The occurrence index can be dumped
//! to a sidecar file next to the corpus and restored from it on later
//! runs.

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::normalize::Normalizer;
use crate::{Error, Result};

/// Exponent applied to corpus size and candidate frequency in the
/// strength formula.
pub const ALPHA: f64 = 0.66;
/// Fraction of the corpus size above which a candidate counts as
/// frequent and is weakened by its own frequency.
pub const BETA: f64 = 0.00002;
/// Fraction of the corpus size used as the weakening floor for rare
/// candidates.
pub const GAMMA: f64 = 0.00002;

/// Suffix appended to the corpus path to name its occurrence dump.
pub const CACHE_SUFFIX: &str = ".counts";

/// Sidecar file holding the occurrence dump for `corpus`.
pub fn cache_path(corpus: &Path) -> PathBuf {
    let mut path = corpus.as_os_str().to_os_string();
    path.push(CACHE_SUFFIX);
    PathBuf::from(path)
}

/// Restartable stream of corpus tokens.
pub struct TokenSource<'a> {
    path: PathBuf,
    normalizer: &'a Normalizer,
}

impl<'a> TokenSource<'a> {
    pub fn new(path: impl Into<PathBuf>, normalizer: &'a Normalizer) -> Self {
        TokenSource {
            path: path.into(),
            normalizer,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens the corpus and yields its normalized tokens in order.
    /// Each call starts over from the beginning of the file.
    pub fn tokens(&self) -> Result<Tokens<'a>> {
        self.open(Some(self.normalizer))
    }

    /// Like [`TokenSource::tokens`], but yields the raw
    /// whitespace-delimited words without normalization.
    pub fn raw_tokens(&self) -> Result<Tokens<'a>> {
        self.open(None)
    }

    fn open(&self, normalizer: Option<&'a Normalizer>) -> Result<Tokens<'a>> {
        let reader = BufReader::new(File::open(&self.path)?);
        Ok(Tokens {
            lines: reader.lines(),
            normalizer,
            pending: Vec::new().into_iter(),
        })
    }
}

/// Iterator over the tokens of one pass. Lines are read lazily so the
/// corpus never has to fit in memory.
pub struct Tokens<'a> {
    lines: std::io::Lines<BufReader<File>>,
    normalizer: Option<&'a Normalizer>,
    pending: std::vec::IntoIter<String>,
}

impl std::fmt::Debug for Tokens<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokens")
            .field("normalizer", &self.normalizer.is_some())
            .finish_non_exhaustive()
    }
}

impl Iterator for Tokens<'_> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.next() {
                return Some(Ok(token));
            }
            match self.lines.next()? {
                Ok(line) => {
                    let words = line.split_whitespace();
                    let tokens: Vec<String> = match self.normalizer {
                        Some(normalizer) => {
                            words.filter_map(|word| normalizer.normalize(word)).collect()
                        }
                        None => words.map(str::to_string).collect(),
                    };
                    self.pending = tokens.into_iter();
                }
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

/// Word frequencies of a whole corpus, with the scalar statistics the
/// strength formula derives from them. Immutable once constructed.
#[derive(Debug)]
pub struct Corpus {
    occurrences: BTreeMap<String, u64>,
    size: u64,
    size_to_alpha: f64,
    beta_threshold: f64,
    gamma_floor: f64,
}

impl Corpus {
    /// Builds the occurrence index, restoring it from the sidecar dump
    /// when `use_cache` is set and the dump exists. A freshly counted
    /// index is dumped back beside the corpus (never overwriting an
    /// existing dump). An existing dump is trusted as-is; delete the
    /// file to force a recount.
    pub fn load(source: &TokenSource, use_cache: bool) -> Result<Self> {
        info!("File: {}", source.path().display());
        let corpus = if use_cache {
            let cache = cache_path(source.path());
            if cache.is_file() {
                debug!("Restoring occurrences from {}", cache.display());
                Self::from_cache(&cache)?
            } else {
                let corpus = Self::from_source(source)?;
                corpus.save_cache(source.path())?;
                corpus
            }
        } else {
            Self::from_source(source)?
        };
        info!("Size: {} words", corpus.size);
        Ok(corpus)
    }

    /// Counts occurrences in one full pass over the token source.
    pub fn from_source(source: &TokenSource) -> Result<Self> {
        debug!("Counting occurrences...");
        let mut occurrences = BTreeMap::new();
        for token in source.tokens()? {
            *occurrences.entry(token?).or_insert(0) += 1;
        }
        debug!("Counting occurrences [DONE]");
        Ok(Self::from_counts(occurrences))
    }

    /// Restores the index from an occurrence dump, one `word,count`
    /// record per line. Any malformed record fails the whole load.
    pub fn from_cache(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let mut occurrences = BTreeMap::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() != 2 {
                return Err(Error::InvalidOccurrenceRecord {
                    path: path.to_path_buf(),
                    line: index + 1,
                    reason: "expected exactly one comma".to_string(),
                });
            }
            let count: u64 = fields[1].parse().map_err(|_| Error::InvalidOccurrenceRecord {
                path: path.to_path_buf(),
                line: index + 1,
                reason: format!("invalid count {:?}", fields[1]),
            })?;
            occurrences.insert(fields[0].to_string(), count);
        }
        Ok(Self::from_counts(occurrences))
    }

    pub fn from_counts(occurrences: BTreeMap<String, u64>) -> Self {
        let size: u64 = occurrences.values().sum();
        let size_f = size as f64;
        Corpus {
            occurrences,
            size,
            size_to_alpha: size_f.powf(ALPHA),
            beta_threshold: BETA * size_f,
            gamma_floor: GAMMA * size_f,
        }
    }

    /// Writes the `word,count` dump beside the corpus. A dump that is
    /// already present is left untouched.
    pub fn save_cache(&self, corpus_path: &Path) -> Result<()> {
        let path = cache_path(corpus_path);
        let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!("Occurrence dump {} already present", path.display());
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        debug!("Saving occurrences to {}", path.display());
        let mut writer = BufWriter::new(file);
        for (word, count) in &self.occurrences {
            writeln!(writer, "{word},{count}")?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn has(&self, word: &str) -> bool {
        self.occurrences.contains_key(word)
    }

    pub fn occurrence_count(&self, word: &str) -> Option<u64> {
        self.occurrences.get(word).copied()
    }

    /// All indexed words with their counts, in lexicographic order.
    pub fn words(&self) -> impl Iterator<Item = (&str, u64)> {
        self.occurrences.iter().map(|(word, count)| (word.as_str(), *count))
    }

    /// Total number of corpus tokens (the sum of all counts).
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn size_to_alpha(&self) -> f64 {
        self.size_to_alpha
    }

    pub fn beta_threshold(&self) -> f64 {
        self.beta_threshold
    }

    pub fn gamma_floor(&self) -> f64 {
        self.gamma_floor
    }
}
