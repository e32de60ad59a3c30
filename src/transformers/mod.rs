/*! Table transformers.

Each stage of the preparation pipeline is a [Transform] over a [crate::dataset::DatasetTable]:

1. [Enrich] adds corpus statistics from the counts/text/tokens artifacts,
1. [TextStats] (optional) adds word counts computed from the raw text,
1. [LoadText] fills the `text` column,
1. [Chunk] (optional) replaces texts by random word spans,
1. [Linguistic] tokenizes and lemmatizes texts.

Stages are chained with [Transformer].
!*/
mod chunk;
mod enrich;
mod linguistic;
mod text;
mod transform;

pub use chunk::{chunk_text, Chunk};
pub use enrich::Enrich;
pub use linguistic::Linguistic;
pub use text::{skip_words, LoadText, TextStats};
pub use transform::{Transform, Transformer};

use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::Error;

/// Worker pool shared by the row-parallel stages of a run.
pub fn build_pool(workers: usize) -> Result<Arc<ThreadPool>, Error> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .build()?;
    Ok(Arc::new(pool))
}
