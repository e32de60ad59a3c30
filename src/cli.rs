//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

use gutenberg_prep::config::{LoaderConfig, LoaderConfigBuilder};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "gutenberg-prep",
    about = "Gutenberg corpus dataset preparation."
)]
/// Holds every command that is callable by the `gutenberg-prep` command.
pub enum GutenbergPrep {
    #[structopt(about = "Enrich, chunk and tokenize dataset splits")]
    Prepare(Prepare),
    #[structopt(about = "Print corpus statistics of some books")]
    Stats(Stats),
}

#[derive(Debug, StructOpt)]
/// Prepare command and parameters.
///
/// ```sh
/// gutenberg-prep prepare [FLAGS] [OPTIONS] <data-dir> <dst>
/// ```
pub struct Prepare {
    #[structopt(parse(from_os_str), help = "folder holding the split files")]
    pub data_dir: PathBuf,
    #[structopt(parse(from_os_str), help = "destination of processed splits")]
    pub dst: PathBuf,
    #[structopt(
        parse(from_os_str),
        long = "corpus-root",
        help = "corpus root (holds text/, counts/ and tokens/). Default is ../gutenberg/data"
    )]
    pub corpus_root: Option<PathBuf>,
    #[structopt(long = "train", default_value = "final_train.csv")]
    pub train: String,
    #[structopt(long = "val", default_value = "final_val.csv")]
    pub val: String,
    #[structopt(long = "test", default_value = "final_test.csv")]
    pub test: String,
    #[structopt(long = "no-enrich", help = "do not add corpus statistics")]
    pub no_enrich: bool,
    #[structopt(
        long = "drop-missing",
        help = "drop rows without word, unique word and line counts"
    )]
    pub drop_missing: bool,
    #[structopt(long = "text-stats", help = "add word counts computed from raw text")]
    pub text_stats: bool,
    #[structopt(
        long = "skip-words",
        help = "number of leading and trailing words to drop from texts"
    )]
    pub skip_words: Option<usize>,
    #[structopt(long = "num-chunks", requires = "chunk_size")]
    pub num_chunks: Option<usize>,
    #[structopt(long = "chunk-size", requires = "num_chunks", help = "words per chunk")]
    pub chunk_size: Option<usize>,
    #[structopt(long = "seed", help = "seed for chunk sampling")]
    pub seed: Option<u64>,
    #[structopt(
        short = "w",
        long = "workers",
        help = "number of workers. Default is the number of CPUs minus one."
    )]
    pub workers: Option<usize>,
    #[structopt(long = "no-lemmatize", help = "tokenize only")]
    pub no_lemmatize: bool,
}

impl Prepare {
    pub fn config(&self) -> LoaderConfig {
        let mut builder = LoaderConfigBuilder::default();
        builder
            .data_dir(&self.data_dir)
            .splits(&self.train, &self.val, &self.test)
            .enrich(!self.no_enrich)
            .drop_missing(self.drop_missing)
            .text_stats(self.text_stats)
            .skip_words(self.skip_words)
            .seed(self.seed)
            .workers(self.workers)
            .lemmatize(!self.no_lemmatize);

        if let Some(corpus_root) = &self.corpus_root {
            builder.corpus_root(corpus_root);
        }
        if let (Some(num_chunks), Some(chunk_size)) = (self.num_chunks, self.chunk_size) {
            builder.chunking(num_chunks, chunk_size);
        }

        builder.build()
    }
}

#[derive(Debug, StructOpt)]
/// Stats command and parameters.
pub struct Stats {
    #[structopt(parse(from_os_str), help = "corpus root")]
    pub corpus_root: PathBuf,
    #[structopt(help = "book ids (ex. PG1342)")]
    pub ids: Vec<String>,
}
