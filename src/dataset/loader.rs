//! Train/validation/test loader.
//!
//! Loads the three splits of a dataset directory and runs the configured stages on each:
//! enrichment, raw text statistics, text loading, chunking, then tokenization/lemmatization.
use std::{path::PathBuf, sync::Arc};

use log::info;
use rayon::ThreadPool;

use crate::{
    config::LoaderConfig,
    error::Error,
    io::TextStore,
    nlp::{English, Toolkit},
    transformers::{
        build_pool, Chunk, Enrich, LoadText, Linguistic, TextStats, Transform, Transformer,
    },
};

use super::DatasetTable;

#[derive(Debug)]
pub struct DatasetLoader {
    pub train: DatasetTable,
    pub val: DatasetTable,
    pub test: DatasetTable,
}

impl DatasetLoader {
    /// Load and process splits using the bundled [English] toolkit.
    pub fn load(config: &LoaderConfig) -> Result<Self, Error> {
        Self::load_with_toolkit(config, Arc::new(English))
    }

    pub fn load_with_toolkit(
        config: &LoaderConfig,
        toolkit: Arc<dyn Toolkit>,
    ) -> Result<Self, Error> {
        let pool = build_pool(config.workers)?;
        let stages = Self::stages(config, toolkit, pool);
        info!("stages: {:?}", stages.names());

        let load = |(name, path): (&str, PathBuf)| -> Result<DatasetTable, Error> {
            let mut table = DatasetTable::from_path(name, &path)?;
            stages.transform(&mut table)?;
            Ok(table)
        };

        // splits are loaded one after the other, the first failure stops the run
        let [train, val, test] = config.splits();
        Ok(Self {
            train: load(train)?,
            val: load(val)?,
            test: load(test)?,
        })
    }

    /// Stages enabled by `config`, in processing order.
    ///
    /// Row-parallel stages all run on `pool`.
    pub fn stages<'a>(
        config: &LoaderConfig,
        toolkit: Arc<dyn Toolkit>,
        pool: Arc<ThreadPool>,
    ) -> Transformer<'a> {
        let store = TextStore::new(&config.corpus_root);

        let mut stages = Transformer::default();
        if config.enrich {
            stages.add(Box::new(
                Enrich::new(store.clone(), pool.clone()).drop_missing(config.drop_missing),
            ));
        }
        if config.text_stats {
            stages.add(Box::new(TextStats::new(store.clone(), pool.clone())));
        }
        stages.add(Box::new(LoadText::new(store, config.skip_words, pool.clone())));
        if let Some(chunking) = config.chunking {
            stages.add(Box::new(Chunk::new(chunking, config.seed)));
        }
        stages.add(Box::new(
            Linguistic::new(toolkit, pool).lemmatize(config.lemmatize),
        ));

        stages
    }

    /// Tables of every split, train first.
    pub fn splits(&self) -> [&DatasetTable; 3] {
        [&self.train, &self.val, &self.test]
    }
}
