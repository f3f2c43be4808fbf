//! Integration tests for `word_associations`.
//
// This suite verifies:
// - Library behavior (end-to-end scoring, determinism, occurrence dump
//   round-trip and stale-dump semantics, stemming)
// - CLI behavior including export formats, the occurrence dump flag and
//   sentence extraction
// - The stimuli subcommand

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;

use word_associations::corpus::{cache_path, Corpus, ALPHA};
use word_associations::stem::{NullStemmer, SnowballStemmer, StemLang};
use word_associations::{score_corpus, Normalizer, ScoreOptions, TokenSource};

// --------------------- helpers ---------------------

/// Create a file with content in a temp dir.
fn write_file(dir: &assert_fs::TempDir, name: &str, content: &str) -> PathBuf {
    let f = dir.child(name);
    f.write_str(content).unwrap();
    f.path().to_path_buf()
}

/// Plain normalizer without stemming.
fn plain_normalizer() -> Normalizer {
    Normalizer::new(Box::new(NullStemmer))
}

/// Options for a radius-1 scoring run.
fn opts(window_radius: usize) -> ScoreOptions {
    ScoreOptions {
        window_radius,
        use_cache: false,
    }
}

/// Run CLI successfully with a specific working directory.
fn run_cli_ok_in(dir: &Path, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = assert_cmd::Command::cargo_bin("word_associations").unwrap();
    cmd.current_dir(dir);
    cmd.args(args).assert().success()
}

/// Run CLI expecting failure with a specific working directory.
fn run_cli_fail_in(dir: &Path, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = assert_cmd::Command::cargo_bin("word_associations").unwrap();
    cmd.current_dir(dir);
    cmd.args(args).assert().failure()
}

/// The five-token corpus used throughout: kot=3, pies=1, ptak=1.
const SMALL_CORPUS: &str = "Kot pies kot ptak kot.";

/// Expected strengths for SMALL_CORPUS with window radius 1.
fn small_corpus_strengths() -> (f64, f64) {
    let size_to_alpha = 5f64.powf(ALPHA);
    (size_to_alpha / 3.0, size_to_alpha / 3.0 * 2.0) // (ptak, pies)
}

// --------------------- library tests ---------------------

#[test]
fn lib_scores_small_corpus_ascending() {
    let td = assert_fs::TempDir::new().unwrap();
    let corpus = write_file(&td, "corpus.txt", SMALL_CORPUS);

    let normalizer = plain_normalizer();
    let stimuli = vec!["kot".to_string()];
    let lists = score_corpus(&corpus, &stimuli, &normalizer, &opts(1)).unwrap();

    assert_eq!(lists.len(), 1);
    let list = &lists[0];
    assert_eq!(list.stimulus, "kot");
    let words: Vec<&str> = list.associations.iter().map(|a| a.word.as_str()).collect();
    assert_eq!(words, ["kot", "ptak", "pies"]);

    let (ptak, pies) = small_corpus_strengths();
    assert_eq!(list.associations[0].strength, 0.0);
    assert!((list.associations[1].strength - ptak).abs() < 1e-9);
    assert!((list.associations[2].strength - pies).abs() < 1e-9);
}

#[test]
fn lib_runs_are_deterministic() {
    let td = assert_fs::TempDir::new().unwrap();
    let corpus = write_file(
        &td,
        "corpus.txt",
        "ala ma kota kot ma ale ala lubi psa pies lubi ale kot i pies to zwierzeta",
    );

    let normalizer = plain_normalizer();
    let stimuli = vec!["kot".to_string(), "pies".to_string()];
    let first = score_corpus(&corpus, &stimuli, &normalizer, &opts(2)).unwrap();
    let second = score_corpus(&corpus, &stimuli, &normalizer, &opts(2)).unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.stimulus, b.stimulus);
        let left: Vec<(&str, f64)> = a
            .associations
            .iter()
            .map(|x| (x.word.as_str(), x.strength))
            .collect();
        let right: Vec<(&str, f64)> = b
            .associations
            .iter()
            .map(|x| (x.word.as_str(), x.strength))
            .collect();
        assert_eq!(left, right);
    }
}

#[test]
fn lib_absent_stimuli_are_skipped_silently() {
    let td = assert_fs::TempDir::new().unwrap();
    let corpus = write_file(&td, "corpus.txt", SMALL_CORPUS);

    let normalizer = plain_normalizer();
    let stimuli = vec!["kot".to_string(), "drzewo".to_string()];
    let lists = score_corpus(&corpus, &stimuli, &normalizer, &opts(1)).unwrap();

    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].stimulus, "kot");
}

#[test]
fn lib_occurrence_dump_round_trip() {
    let td = assert_fs::TempDir::new().unwrap();
    let corpus = write_file(&td, "corpus.txt", SMALL_CORPUS);

    let normalizer = plain_normalizer();
    let source = TokenSource::new(&corpus, &normalizer);
    let counted = Corpus::load(&source, true).unwrap();

    let dump = cache_path(&corpus);
    assert!(dump.is_file());
    assert_eq!(
        fs::read_to_string(&dump).unwrap(),
        "kot,3\npies,1\nptak,1\n"
    );

    let restored = Corpus::from_cache(&dump).unwrap();
    let left: BTreeMap<String, u64> = counted
        .words()
        .map(|(w, c)| (w.to_string(), c))
        .collect();
    let right: BTreeMap<String, u64> = restored
        .words()
        .map(|(w, c)| (w.to_string(), c))
        .collect();
    assert_eq!(left, right);
    assert_eq!(restored.size(), counted.size());
}

#[test]
fn lib_existing_dump_wins_over_the_corpus() {
    let td = assert_fs::TempDir::new().unwrap();
    let corpus = write_file(&td, "corpus.txt", SMALL_CORPUS);

    let normalizer = plain_normalizer();
    let source = TokenSource::new(&corpus, &normalizer);
    Corpus::load(&source, true).unwrap();

    // The corpus changes; the dump does not. The next load must keep
    // the old counts verbatim.
    fs::write(&corpus, "zupelnie inny tekst o drzewach").unwrap();
    let reloaded = Corpus::load(&source, true).unwrap();

    assert_eq!(reloaded.occurrence_count("kot"), Some(3));
    assert_eq!(reloaded.size(), 5);
    assert!(!reloaded.has("drzewach"));
}

#[test]
fn lib_snowball_stemming_merges_inflections() {
    let td = assert_fs::TempDir::new().unwrap();
    let corpus = write_file(&td, "corpus.txt", "cats chase dogs and cat chases dog");

    let normalizer = Normalizer::new(Box::new(SnowballStemmer::new(StemLang::En)));
    let source = TokenSource::new(&corpus, &normalizer);
    let counted = Corpus::from_source(&source).unwrap();

    assert_eq!(counted.occurrence_count("cat"), Some(2));
    assert_eq!(counted.occurrence_count("dog"), Some(2));
    assert!(!counted.has("cats"));
    assert!(!counted.has("dogs"));
}

// --------------------- CLI tests ---------------------

#[test]
fn cli_nonexistent_corpus_fails() {
    let td = assert_fs::TempDir::new().unwrap();
    run_cli_fail_in(td.path(), &["score", "does_not_exist.txt", "kot"])
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn cli_score_prints_padded_table() {
    let td = assert_fs::TempDir::new().unwrap();
    write_file(&td, "corpus.txt", SMALL_CORPUS);

    let (ptak, pies) = small_corpus_strengths();
    run_cli_ok_in(
        td.path(),
        &["score", "corpus.txt", "kot", "--window", "1"],
    )
    .stdout(
        predicate::str::contains("kot:")
            .and(predicate::str::contains(format!(
                "\t{:<20}{:.2}",
                "kot", 0.0
            )))
            .and(predicate::str::contains(format!(
                "\t{:<20}{:.2}",
                "ptak", ptak
            )))
            .and(predicate::str::contains(format!(
                "\t{:<20}{:.2}",
                "pies", pies
            ))),
    );
}

#[test]
fn cli_weakest_associations_come_first() {
    let td = assert_fs::TempDir::new().unwrap();
    write_file(&td, "corpus.txt", SMALL_CORPUS);

    let assert = run_cli_ok_in(
        td.path(),
        &["score", "corpus.txt", "kot", "--window", "1"],
    );
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let i_ptak = stdout.find("ptak").expect("ptak missing");
    let i_pies = stdout.find("pies").expect("pies missing");
    assert!(i_ptak < i_pies, "expected ascending strength order");
}

#[test]
fn cli_output_directory_gets_one_file_per_stimulus() {
    let td = assert_fs::TempDir::new().unwrap();
    write_file(&td, "corpus.txt", SMALL_CORPUS);

    // A stale result from an earlier run must disappear.
    let results = td.child("results");
    results.create_dir_all().unwrap();
    results.child("stale.txt").write_str("old").unwrap();

    run_cli_ok_in(
        td.path(),
        &[
            "score",
            "corpus.txt",
            "kot",
            "--window",
            "1",
            "--output",
            "results",
        ],
    );

    let table = fs::read_to_string(results.child("kot.txt").path()).unwrap();
    let (ptak, _) = small_corpus_strengths();
    assert!(table.contains(&format!("{:<20}{:.2}", "ptak", ptak)));
    assert!(!results.child("stale.txt").path().exists());
}

#[test]
fn cli_export_json() {
    let td = assert_fs::TempDir::new().unwrap();
    write_file(&td, "corpus.txt", SMALL_CORPUS);

    run_cli_ok_in(
        td.path(),
        &[
            "score",
            "corpus.txt",
            "kot",
            "--window",
            "1",
            "--output",
            "results",
            "--export-format",
            "json",
        ],
    );

    let content = fs::read_to_string(td.child("results/kot.json").path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["stimulus"], "kot");
    assert_eq!(value["associations"].as_array().unwrap().len(), 3);
    assert_eq!(value["associations"][0]["word"], "kot");
}

#[test]
fn cli_export_csv_has_header_and_rows() {
    let td = assert_fs::TempDir::new().unwrap();
    write_file(&td, "corpus.txt", SMALL_CORPUS);

    run_cli_ok_in(
        td.path(),
        &[
            "score",
            "corpus.txt",
            "kot",
            "--window",
            "1",
            "--output",
            "results",
            "--export-format",
            "csv",
        ],
    );

    let content = fs::read_to_string(td.child("results/kot.csv").path()).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("word,strength"));
    assert!(content.contains("\nptak,"));
    assert!(content.contains("\npies,"));
}

#[test]
fn cli_cache_flag_writes_the_occurrence_dump() {
    let td = assert_fs::TempDir::new().unwrap();
    write_file(&td, "corpus.txt", SMALL_CORPUS);

    run_cli_ok_in(
        td.path(),
        &["score", "corpus.txt", "kot", "--window", "1", "--cache"],
    );

    let dump = td.child("corpus.txt.counts");
    assert_eq!(
        fs::read_to_string(dump.path()).unwrap(),
        "kot,3\npies,1\nptak,1\n"
    );
}

#[test]
fn cli_without_cache_flag_leaves_no_dump() {
    let td = assert_fs::TempDir::new().unwrap();
    write_file(&td, "corpus.txt", SMALL_CORPUS);

    run_cli_ok_in(td.path(), &["score", "corpus.txt", "kot", "--window", "1"]);
    assert!(!td.child("corpus.txt.counts").path().exists());
}

#[test]
fn cli_existing_dump_is_never_rewritten() {
    let td = assert_fs::TempDir::new().unwrap();
    write_file(&td, "corpus.txt", SMALL_CORPUS);
    write_file(&td, "corpus.txt.counts", "kot,100\nzebra,5\n");

    run_cli_ok_in(
        td.path(),
        &["score", "corpus.txt", "kot", "--window", "1", "--cache"],
    );

    assert_eq!(
        fs::read_to_string(td.child("corpus.txt.counts").path()).unwrap(),
        "kot,100\nzebra,5\n"
    );
}

#[test]
fn cli_malformed_dump_aborts_the_run() {
    let td = assert_fs::TempDir::new().unwrap();
    write_file(&td, "corpus.txt", SMALL_CORPUS);
    write_file(&td, "corpus.txt.counts", "kot;3\n");

    run_cli_fail_in(
        td.path(),
        &["score", "corpus.txt", "kot", "--window", "1", "--cache"],
    )
    .stderr(predicate::str::contains("invalid occurrence record"));
}

#[test]
fn cli_sentences_require_an_output_directory() {
    let td = assert_fs::TempDir::new().unwrap();
    write_file(&td, "corpus.txt", SMALL_CORPUS);

    run_cli_fail_in(td.path(), &["score", "corpus.txt", "kot", "--sentences"]);
}

#[test]
fn cli_sentence_extraction_writes_pair_files() {
    let td = assert_fs::TempDir::new().unwrap();
    write_file(&td, "corpus.txt", "kot pies kot ptak kot");

    run_cli_ok_in(
        td.path(),
        &[
            "score",
            "corpus.txt",
            "kot",
            "--window",
            "1",
            "--output",
            "results",
            "--sentences",
            "--sentence-window",
            "3",
        ],
    );

    let results = td.child("results");
    // One snippet file per (stimulus, associated word) pair.
    assert!(results.child("kot-pies.txt").path().is_file());
    assert!(results.child("kot-ptak.txt").path().is_file());

    let snippets = fs::read_to_string(results.child("kot-pies.txt").path()).unwrap();
    assert!(!snippets.is_empty());
    assert!(snippets.lines().all(|line| line == "kot pies kot ptak kot"));

    // kot never neighbors itself, so its own pair file stays empty.
    let own = fs::read_to_string(results.child("kot-kot.txt").path()).unwrap();
    assert!(own.is_empty());
}

// --------------------- stimuli subcommand ---------------------

#[test]
fn cli_stimuli_prints_candidates_per_file() {
    let td = assert_fs::TempDir::new().unwrap();
    write_file(
        &td,
        "norms.csv",
        "12,Drzewo!\n2,ignorowane\n8,puste\n7,kot\n5,zielony\n",
    );

    run_cli_ok_in(td.path(), &["stimuli", "norms.csv"]).stdout(
        predicate::str::contains("norms")
            .and(predicate::str::contains("\tdrzewo"))
            .and(predicate::str::contains("\tzielony"))
            .and(predicate::str::contains("ignorowane").not())
            .and(predicate::str::contains("puste").not())
            .and(predicate::str::contains("\tkot\n").not()),
    );
}

#[test]
fn cli_stimuli_fails_on_malformed_norms() {
    let td = assert_fs::TempDir::new().unwrap();
    write_file(&td, "norms.csv", "drzewo\n");

    run_cli_fail_in(td.path(), &["stimuli", "norms.csv"])
        .stderr(predicate::str::contains("invalid norms record"));
}
