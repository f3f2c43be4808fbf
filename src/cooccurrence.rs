//! Streaming co-occurrence accumulation.
//!
//! One pass over the corpus drives the sliding window; whenever the
//! center word is a stimulus, every occupied window slot holding a
//! different word counts as one co-occurrence. The table is only ever
//! incremented here and is handed to the scorer read-only.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::corpus::TokenSource;
use crate::window::Window;
use crate::Result;

/// (stimulus, neighbor) pair counts collected in one corpus pass.
pub struct CooccurrenceTable {
    counts: HashMap<(String, String), u64>,
}

impl CooccurrenceTable {
    fn new() -> Self {
        CooccurrenceTable {
            counts: HashMap::new(),
        }
    }

    fn record(&mut self, stimulus: &str, neighbor: &str) {
        *self
            .counts
            .entry((stimulus.to_string(), neighbor.to_string()))
            .or_insert(0) += 1;
    }

    /// Count for a pair; pairs never observed count as zero.
    pub fn count(&self, stimulus: &str, neighbor: &str) -> u64 {
        self.counts
            .get(&(stimulus.to_string(), neighbor.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct pairs observed.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Runs the windowed pass over the whole corpus and collects pair
/// counts for the given stimuli.
///
/// The token stream is extended with `radius` empty slots so the words
/// near the end of the corpus still reach the window center before the
/// pass ends.
pub fn accumulate(
    source: &TokenSource,
    stimuli: &HashSet<String>,
    radius: usize,
) -> Result<CooccurrenceTable> {
    debug!("Calculating cooccurrences...");
    let mut table = CooccurrenceTable::new();
    let mut window = Window::new(radius);
    let stream = source
        .tokens()?
        .map(|token| token.map(Some))
        .chain((0..radius).map(|_| Ok(None)));
    for item in stream {
        let item = item?;
        if let Some(current) = window.current() {
            if stimuli.contains(current) {
                for neighbor in window.neighbors(current) {
                    table.record(current, neighbor);
                }
            }
        }
        window.slide(item);
    }
    debug!("Calculating cooccurrences [DONE]");
    Ok(table)
}
