//! Example-sentence extraction.
//!
//! After scoring, a second pass over the raw corpus collects window
//! snippets in which an associated word and its stimulus appear
//! together. Each (stimulus, word) pair gets its own output file named
//! `<stimulus>-<word>.txt`, one snippet per line.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::associations::AssociationList;
use crate::corpus::TokenSource;
use crate::normalize::Normalizer;
use crate::window::Window;
use crate::Result;

/// Scans the corpus for windows where an associated word meets its
/// stimulus and appends the raw window text to the pair's file under
/// `output`. The window here is wider than the scoring one so the
/// snippets read as sentences.
pub fn extract_sentences(
    corpus_path: &Path,
    normalizer: &Normalizer,
    lists: &[AssociationList],
    output: &Path,
    radius: usize,
) -> Result<()> {
    debug!("Extracting sentences...");
    let stimuli_by_word = map_words_to_stimuli(lists);
    let mut writers = open_writers(&stimuli_by_word, output)?;

    let source = TokenSource::new(corpus_path, normalizer);
    let mut window = Window::new(radius);
    let stream = source
        .raw_tokens()?
        .map(|token| token.map(Some))
        .chain((0..radius).map(|_| Ok(None)));
    for item in stream {
        let item = item?;
        if let Some(raw_current) = window.current() {
            if let Some(current) = normalizer.normalize(raw_current) {
                if let Some(stimuli) = stimuli_by_word.get(&current) {
                    let sentence = window.sentence();
                    let neighbors: Vec<String> = window
                        .neighbors(raw_current)
                        .into_iter()
                        .filter_map(|word| normalizer.normalize(word))
                        .collect();
                    for neighbor in neighbors {
                        if stimuli.contains(&neighbor) {
                            if let Some(writer) =
                                writers.get_mut(&(neighbor, current.clone()))
                            {
                                writeln!(writer, "{sentence}")?;
                            }
                        }
                    }
                }
            }
        }
        window.slide(item);
    }

    for writer in writers.values_mut() {
        writer.flush()?;
    }
    debug!("Extracting sentences [DONE]");
    Ok(())
}

/// Inverts the score tables: associated word -> stimuli it was
/// reported for.
fn map_words_to_stimuli(lists: &[AssociationList]) -> HashMap<String, Vec<String>> {
    let mut words: HashMap<String, Vec<String>> = HashMap::new();
    for list in lists {
        for association in &list.associations {
            words
                .entry(association.word.clone())
                .or_default()
                .push(list.stimulus.clone());
        }
    }
    words
}

fn open_writers(
    words: &HashMap<String, Vec<String>>,
    output: &Path,
) -> Result<HashMap<(String, String), BufWriter<File>>> {
    let mut writers = HashMap::new();
    for (word, stimuli) in words {
        for stimulus in stimuli {
            let path = output.join(format!("{stimulus}-{word}.txt"));
            writers.insert(
                (stimulus.clone(), word.clone()),
                BufWriter::new(File::create(path)?),
            );
        }
    }
    Ok(writers)
}
