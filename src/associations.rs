//! Association strength scoring.
//!
//! For a stimulus `s` and candidate word `w` the strength is
//!
//! ```text
//! size^alpha / occurrences(s) * cooccurrences(s, w) / weaken(w)
//! ```
//!
//! where `weaken` dampens frequent candidates by their own frequency
//! and applies a flat floor to rare ones. Candidates are ranked by
//! ascending strength and the first ten are kept; ties fall back to the
//! index's lexicographic word order, so results are reproducible.

use std::cmp::Ordering;

use log::debug;
use serde::Serialize;

use crate::cooccurrence::CooccurrenceTable;
use crate::corpus::{Corpus, ALPHA};

/// Number of associations reported per stimulus.
pub const TOP_ASSOCIATIONS: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct Association {
    pub word: String,
    pub strength: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssociationList {
    pub stimulus: String,
    pub associations: Vec<Association>,
}

/// Ranked association list for one stimulus, or `None` when the
/// stimulus never occurs in the corpus.
pub fn associations_for(
    corpus: &Corpus,
    cooccurrences: &CooccurrenceTable,
    stimulus: &str,
) -> Option<AssociationList> {
    let stimulus_count = corpus.occurrence_count(stimulus)?;
    debug!("Calculating associations for {stimulus}...");
    let mut scored: Vec<Association> = corpus
        .words()
        .map(|(word, count)| Association {
            word: word.to_string(),
            strength: corpus.size_to_alpha() / stimulus_count as f64
                * cooccurrences.count(stimulus, word) as f64
                / weaken(corpus, count),
        })
        .collect();
    scored.sort_by(|a, b| {
        a.strength
            .partial_cmp(&b.strength)
            .unwrap_or(Ordering::Equal)
    });
    scored.truncate(TOP_ASSOCIATIONS);
    debug!("Calculating associations for {stimulus} [DONE]");
    Some(AssociationList {
        stimulus: stimulus.to_string(),
        associations: scored,
    })
}

fn weaken(corpus: &Corpus, count: u64) -> f64 {
    if count as f64 > corpus.beta_threshold() {
        (count as f64).powf(ALPHA)
    } else {
        corpus.gamma_floor()
    }
}
