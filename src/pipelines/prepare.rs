//! Dataset preparation pipeline.
//!
//! 1. Load the train/val/test splits,
//! 1. run the configured stages on each split (see [crate::transformers]),
//! 1. write `{dst}/{split}.csv` for each split, and a `summary.json` giving
//!    the number of rows and absent values per computed column.
use std::{collections::BTreeMap, fs::File, path::PathBuf, sync::Arc};

use log::{info, warn};

use crate::{
    config::LoaderConfig,
    dataset::{DatasetLoader, TableSummary},
    error::Error,
    nlp::{English, Toolkit},
};

use super::Pipeline;

pub const SUMMARY_FILE: &str = "summary.json";

pub struct Prepare {
    config: LoaderConfig,
    dst: PathBuf,
    toolkit: Arc<dyn Toolkit>,
}

impl Prepare {
    pub fn new(config: LoaderConfig, dst: PathBuf) -> Self {
        Self {
            config,
            dst,
            toolkit: Arc::new(English),
        }
    }

    /// Use another toolkit than the bundled [English] one.
    pub fn with_toolkit(mut self, toolkit: Arc<dyn Toolkit>) -> Self {
        self.toolkit = toolkit;
        self
    }
}

impl Pipeline<BTreeMap<String, TableSummary>> for Prepare {
    fn version() -> &'static str {
        "0.1.0"
    }

    fn run(&self) -> Result<BTreeMap<String, TableSummary>, Error> {
        if !self.dst.exists() {
            warn!("Destination does not exist. Creating {:?}", self.dst);
            std::fs::create_dir_all(&self.dst)?;
        }
        if !self.dst.is_dir() {
            return Err(Error::Custom(format!(
                "Destination has to be a directory: {:?}",
                self.dst
            )));
        }

        let loader = DatasetLoader::load_with_toolkit(&self.config, self.toolkit.clone())?;

        let mut summaries = BTreeMap::new();
        for table in loader.splits() {
            let path = self.dst.join(format!("{}.csv", table.name()));
            info!("[{}] writing {} rows to {:?}", table.name(), table.len(), path);
            table.write_csv(&path)?;
            summaries.insert(table.name().to_string(), table.summary());
        }

        let summary_file = File::create(self.dst.join(SUMMARY_FILE))?;
        serde_json::to_writer_pretty(summary_file, &summaries)?;

        Ok(summaries)
    }
}
