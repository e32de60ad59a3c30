//! Loader configuration.
//!
//! [LoaderConfigBuilder] holds every option with its default,
//! and [LoaderConfig] is what the loader and stages consume.
use std::path::{Path, PathBuf};

use log::debug;

pub const DEFAULT_DATA_DIR: &str = "sample_dataset";
/// Corpus root of a `gutenberg` checkout living next to this one.
pub const DEFAULT_CORPUS_ROOT: &str = "../gutenberg/data";
pub const DEFAULT_TRAIN: &str = "final_train.csv";
pub const DEFAULT_VAL: &str = "final_val.csv";
pub const DEFAULT_TEST: &str = "final_test.csv";

/// Worker count used when none is configured:
/// available parallelism minus one (leaving a core to the caller), and at least one.
pub fn default_workers() -> usize {
    let available = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    available.saturating_sub(1).max(1)
}

/// Chunk sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkConfig {
    pub num_chunks: usize,
    pub chunk_size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    pub data_dir: PathBuf,
    pub corpus_root: PathBuf,
    pub train: String,
    pub val: String,
    pub test: String,
    pub enrich: bool,
    pub drop_missing: bool,
    pub text_stats: bool,
    pub skip_words: Option<usize>,
    pub chunking: Option<ChunkConfig>,
    pub seed: Option<u64>,
    pub workers: usize,
    pub lemmatize: bool,
}

impl LoaderConfig {
    /// (split name, file path) for train, val and test, in that order.
    pub fn splits(&self) -> [(&'static str, PathBuf); 3] {
        [
            ("train", self.data_dir.join(&self.train)),
            ("val", self.data_dir.join(&self.val)),
            ("test", self.data_dir.join(&self.test)),
        ]
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfigBuilder::default().build()
    }
}

pub struct LoaderConfigBuilder {
    data_dir: PathBuf,
    corpus_root: Option<PathBuf>,
    train: String,
    val: String,
    test: String,
    enrich: bool,
    drop_missing: bool,
    text_stats: bool,
    skip_words: Option<usize>,
    chunking: Option<ChunkConfig>,
    seed: Option<u64>,
    workers: Option<usize>,
    lemmatize: bool,
}

impl LoaderConfigBuilder {
    pub fn build(&self) -> LoaderConfig {
        let workers = self.workers.unwrap_or_else(default_workers).max(1);
        let corpus_root = self
            .corpus_root
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CORPUS_ROOT));

        let config = LoaderConfig {
            data_dir: self.data_dir.clone(),
            corpus_root,
            train: self.train.clone(),
            val: self.val.clone(),
            test: self.test.clone(),
            enrich: self.enrich,
            drop_missing: self.drop_missing,
            text_stats: self.text_stats,
            skip_words: self.skip_words,
            chunking: self.chunking,
            seed: self.seed,
            workers,
            lemmatize: self.lemmatize,
        };
        debug!("loader config: {:?}", config);
        config
    }

    pub fn data_dir(&mut self, data_dir: &Path) -> &mut Self {
        self.data_dir = data_dir.to_path_buf();
        self
    }

    pub fn corpus_root(&mut self, corpus_root: &Path) -> &mut Self {
        self.corpus_root = Some(corpus_root.to_path_buf());
        self
    }

    pub fn splits(&mut self, train: &str, val: &str, test: &str) -> &mut Self {
        self.train = train.to_string();
        self.val = val.to_string();
        self.test = test.to_string();
        self
    }

    pub fn enrich(&mut self, enrich: bool) -> &mut Self {
        self.enrich = enrich;
        self
    }

    pub fn drop_missing(&mut self, drop_missing: bool) -> &mut Self {
        self.drop_missing = drop_missing;
        self
    }

    pub fn text_stats(&mut self, text_stats: bool) -> &mut Self {
        self.text_stats = text_stats;
        self
    }

    pub fn skip_words(&mut self, skip_words: Option<usize>) -> &mut Self {
        self.skip_words = skip_words;
        self
    }

    pub fn chunking(&mut self, num_chunks: usize, chunk_size: usize) -> &mut Self {
        self.chunking = Some(ChunkConfig {
            num_chunks,
            chunk_size,
        });
        self
    }

    pub fn seed(&mut self, seed: Option<u64>) -> &mut Self {
        self.seed = seed;
        self
    }

    pub fn workers(&mut self, workers: Option<usize>) -> &mut Self {
        self.workers = workers;
        self
    }

    pub fn lemmatize(&mut self, lemmatize: bool) -> &mut Self {
        self.lemmatize = lemmatize;
        self
    }
}

impl Default for LoaderConfigBuilder {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            corpus_root: None,
            train: DEFAULT_TRAIN.to_string(),
            val: DEFAULT_VAL.to_string(),
            test: DEFAULT_TEST.to_string(),
            enrich: true,
            drop_missing: false,
            text_stats: false,
            skip_words: None,
            chunking: None,
            seed: None,
            workers: None,
            lemmatize: true,
        }
    }
}
