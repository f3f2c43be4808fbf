//! Stimulus-list distillation from association-norm response files.
//!
//! Norm files list free-association responses as `count,word` records.
//! Only words named by more than two respondents survive; responses are
//! cleaned to the working alphabet and the blank-response marker and
//! very short words are dropped. The first ten survivors per file
//! become the stimulus candidates.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::normalize::POLISH_ALPHABET;
use crate::{Error, Result};

/// Responses with at most this many respondents are ignored.
pub const MIN_RESPONSES: u32 = 2;
/// Candidates emitted per norms file.
pub const MAX_CANDIDATES: usize = 10;
/// Marker norm files use for a blank response.
pub const BLANK_RESPONSE: &str = "puste";

/// Lowercases and strips everything outside the alphabet, keeping
/// inner whitespace.
pub fn clean(word: &str) -> String {
    word.trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_whitespace() || POLISH_ALPHABET.contains(*c))
        .collect()
}

/// A cleaned response qualifies as a stimulus candidate when it is not
/// the blank marker and longer than three characters.
pub fn valid(word: &str) -> bool {
    word != BLANK_RESPONSE && word.chars().count() > 3
}

/// Reads one norms file and returns its stimulus candidates in file
/// order. Malformed records fail the whole file.
pub fn candidates_from_file(path: &Path) -> Result<Vec<String>> {
    let reader = BufReader::new(File::open(path)?);
    let mut candidates = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        if candidates.len() == MAX_CANDIDATES {
            break;
        }
        let line = line?;
        let (count, word) = line.split_once(',').ok_or_else(|| Error::InvalidNormsRecord {
            path: path.to_path_buf(),
            line: index + 1,
            reason: "expected a count,word record".to_string(),
        })?;
        let count: u32 = count.trim().parse().map_err(|_| Error::InvalidNormsRecord {
            path: path.to_path_buf(),
            line: index + 1,
            reason: format!("invalid count {count:?}"),
        })?;
        if count <= MIN_RESPONSES {
            continue;
        }
        let cleaned = clean(word);
        if valid(&cleaned) {
            candidates.push(cleaned);
        }
    }
    Ok(candidates)
}
