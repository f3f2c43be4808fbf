#![forbid(unsafe_code)]
//! # Word Associations CLI
//!
//! Command-line front end for the `word_associations` crate.
//!
//! ## Commands
//! - `score`: compute ranked association tables for stimulus words over
//!   a corpus, printed to stdout or exported per stimulus into a
//!   directory, optionally with example-sentence extraction.
//! - `stimuli`: distill stimulus candidates from association-norm
//!   response files.
//!
//! ## Example
//! ```bash
//! cargo run --release -- score corpus.txt kot pies --window 12 --cache
//! ```
//!
//! See `--help` for all available options.

use clap::{Args, Parser, Subcommand};
use log::error;
use std::path::PathBuf;
use std::process;

use word_associations::stem::{DictionaryStemmer, NullStemmer, SnowballStemmer, StemLang, Stemmer};
use word_associations::{extract, output, score_corpus, stimuli};
use word_associations::{ExportFormat, Normalizer, Result, ScoreOptions};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute association strength tables for stimulus words
    Score(ScoreArgs),
    /// Distill stimulus candidates from association-norm files
    Stimuli(StimuliArgs),
}

#[derive(Args)]
struct ScoreArgs {
    /// Corpus file to analyze
    corpus: PathBuf,

    /// Stimulus words, in normalized (stemmed) form
    #[arg(required = true)]
    stimuli: Vec<String>,

    /// Context window radius (tokens on each side of the center)
    #[arg(long, default_value_t = 12)]
    window: usize,

    /// Write per-stimulus result files into this directory instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Output format for exported result files (txt, csv, tsv, json)
    #[arg(long, default_value = "txt")]
    export_format: ExportFormat,

    /// Reuse/persist the occurrence dump next to the corpus
    #[arg(long)]
    cache: bool,

    /// Also extract example sentences for every scored pair
    #[arg(long, requires = "output")]
    sentences: bool,

    /// Window radius for sentence extraction
    #[arg(long, default_value_t = 20)]
    sentence_window: usize,

    /// Stem lexicon file (tab-separated inflected form and stem)
    #[arg(long, conflicts_with = "stem_lang")]
    stem_dict: Option<PathBuf>,

    /// Snowball stemmer language
    #[arg(long)]
    stem_lang: Option<StemLang>,
}

#[derive(Args)]
struct StimuliArgs {
    /// Association-norm response files (count,word per line)
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Score(args) => run_score(args),
        Command::Stimuli(args) => run_stimuli(args),
    };
    if let Err(e) = result {
        error!("Error: {}", e);
        process::exit(1);
    }
}

fn run_score(args: ScoreArgs) -> Result<()> {
    let stemmer: Box<dyn Stemmer> = match (&args.stem_dict, args.stem_lang) {
        (Some(path), _) => Box::new(DictionaryStemmer::from_file(path)?),
        (None, Some(lang)) => Box::new(SnowballStemmer::new(lang)),
        (None, None) => Box::new(NullStemmer),
    };
    let normalizer = Normalizer::new(stemmer);

    let options = ScoreOptions {
        window_radius: args.window,
        use_cache: args.cache,
    };
    let lists = score_corpus(&args.corpus, &args.stimuli, &normalizer, &options)?;

    match args.output {
        Some(dir) => {
            output::prepare_output_directory(&dir)?;
            output::write_associations(&lists, &dir, args.export_format)?;
            if args.sentences {
                extract::extract_sentences(
                    &args.corpus,
                    &normalizer,
                    &lists,
                    &dir,
                    args.sentence_window,
                )?;
            }
        }
        None => output::print_associations(&lists),
    }
    Ok(())
}

fn run_stimuli(args: StimuliArgs) -> Result<()> {
    for file in &args.files {
        let name = file
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());
        println!("{name}");
        for candidate in stimuli::candidates_from_file(file)? {
            println!("\t{candidate}");
        }
    }
    Ok(())
}
