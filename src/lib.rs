#![forbid(unsafe_code)]
//! # Word Associations
//!
//! Computes word association norms from a text corpus: for each
//! stimulus word, the words that co-occur with it inside a fixed-radius
//! context window, ranked by a frequency-normalized association
//! strength.
//!
//! The engine makes two streaming passes over the corpus. The first
//! counts every word's occurrences (optionally restored from a
//! `.counts` sidecar dump next to the corpus); the second slides a
//! context window over the token stream and counts (stimulus, neighbor)
//! pairs whenever a stimulus sits at the window center. The scorer then
//! ranks every indexed word against each stimulus.
//!
//! ## Example
//! ```no_run
//! use word_associations::{score_corpus, Normalizer, ScoreOptions};
//! use word_associations::stem::NullStemmer;
//! use std::path::Path;
//!
//! let normalizer = Normalizer::new(Box::new(NullStemmer));
//! let stimuli = vec!["kot".to_string()];
//! let lists = score_corpus(
//!     Path::new("corpus.txt"),
//!     &stimuli,
//!     &normalizer,
//!     &ScoreOptions::default(),
//! )?;
//! # Ok::<(), word_associations::Error>(())
//! ```

use std::collections::HashSet;
use std::path::Path;

use log::info;

pub mod associations;
pub mod cooccurrence;
pub mod corpus;
pub mod extract;
pub mod normalize;
pub mod output;
pub mod stem;
pub mod stimuli;
pub mod window;

pub use associations::{Association, AssociationList, TOP_ASSOCIATIONS};
pub use cooccurrence::CooccurrenceTable;
pub use corpus::{Corpus, TokenSource};
pub use error::{Error, Result};
pub use normalize::Normalizer;
pub use output::ExportFormat;
pub use window::Window;

mod error {
    use std::path::PathBuf;

    /// Errors are fatal: the run aborts on the first one, nothing is
    /// retried and no partial results are emitted.
    #[derive(thiserror::Error, Debug)]
    pub enum Error {
        #[error(transparent)]
        Io(#[from] std::io::Error),
        /// An occurrence dump record that is not `word,count`.
        #[error("invalid occurrence record at {}:{line}: {reason}", path.display())]
        InvalidOccurrenceRecord {
            path: PathBuf,
            line: usize,
            reason: String,
        },
        /// A norms record that is not `count,word`.
        #[error("invalid norms record at {}:{line}: {reason}", path.display())]
        InvalidNormsRecord {
            path: PathBuf,
            line: usize,
            reason: String,
        },
        /// A stem lexicon line without a tab-separated form and stem.
        #[error("invalid stem lexicon entry at {}:{line}", path.display())]
        InvalidStemEntry { path: PathBuf, line: usize },
        #[error("export failed: {0}")]
        Export(#[from] csv::Error),
        #[error("export failed: {0}")]
        Json(#[from] serde_json::Error),
    }

    pub type Result<T> = std::result::Result<T, Error>;
}

/// Knobs for one scoring run.
pub struct ScoreOptions {
    /// Tokens considered on each side of the window center.
    pub window_radius: usize,
    /// Restore/persist the occurrence dump next to the corpus.
    pub use_cache: bool,
}

impl Default for ScoreOptions {
    fn default() -> Self {
        ScoreOptions {
            window_radius: 12,
            use_cache: false,
        }
    }
}

/// Runs the whole pipeline for one corpus: occurrence counting,
/// windowed co-occurrence accumulation and scoring. Stimuli that never
/// occur in the corpus are skipped silently.
pub fn score_corpus(
    corpus_path: &Path,
    stimuli: &[String],
    normalizer: &Normalizer,
    options: &ScoreOptions,
) -> Result<Vec<AssociationList>> {
    info!("Stimuli: {}", stimuli.join(", "));
    let source = TokenSource::new(corpus_path, normalizer);
    let corpus = Corpus::load(&source, options.use_cache)?;

    let stimulus_set: HashSet<String> = stimuli.iter().cloned().collect();
    let table = cooccurrence::accumulate(&source, &stimulus_set, options.window_radius)?;

    Ok(stimuli
        .iter()
        .filter_map(|stimulus| associations::associations_for(&corpus, &table, stimulus))
        .collect())
}
