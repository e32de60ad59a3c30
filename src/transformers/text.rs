//! Text loading and raw-text statistics.
use std::{collections::HashSet, sync::Arc};

use rayon::{prelude::*, ThreadPool};

use crate::{
    dataset::{DatasetTable, DerivedColumn},
    error::Error,
    io::TextStore,
};

use super::Transform;

/// Drop `n` leading and `n` trailing words (single-space split).
///
/// Texts with `2n` words or fewer end up empty.
pub fn skip_words(text: &str, n: usize) -> String {
    let words: Vec<&str> = text.split(' ').collect();
    if words.len() <= 2 * n {
        return String::new();
    }
    words[n..words.len() - n].join(" ")
}

/// Fills the `text` column from the text artifacts.
pub struct LoadText {
    store: TextStore,
    skip_words: Option<usize>,
    pool: Arc<ThreadPool>,
}

impl LoadText {
    pub fn new(store: TextStore, skip_words: Option<usize>, pool: Arc<ThreadPool>) -> Self {
        Self {
            store,
            skip_words,
            pool,
        }
    }
}

impl Transform for LoadText {
    fn name(&self) -> &'static str {
        "load-text"
    }

    fn transform(&self, table: &mut DatasetTable) -> Result<(), Error> {
        self.pool.install(|| {
            table.rows_mut().par_iter_mut().try_for_each(|row| {
                let text = self.store.text(row.id())?;
                row.text = match self.skip_words {
                    Some(n) => text.map(|t| skip_words(&t, n)),
                    None => text,
                };
                Ok::<(), Error>(())
            })
        })?;

        table.add_column(DerivedColumn::Text);
        table.warn_null_columns();
        Ok(())
    }
}

/// Word and distinct word counts computed from the text artifact itself
/// (whitespace-separated), independent of the counts artifact.
pub struct TextStats {
    store: TextStore,
    pool: Arc<ThreadPool>,
}

impl TextStats {
    pub fn new(store: TextStore, pool: Arc<ThreadPool>) -> Self {
        Self { store, pool }
    }
}

impl Transform for TextStats {
    fn name(&self) -> &'static str {
        "text-stats"
    }

    fn transform(&self, table: &mut DatasetTable) -> Result<(), Error> {
        self.pool.install(|| {
            table.rows_mut().par_iter_mut().try_for_each(|row| {
                let stats = self.store.text(row.id())?.map(|text| {
                    let words: Vec<&str> = text.split_whitespace().collect();
                    let unique: HashSet<&str> = words.iter().copied().collect();
                    (words.len() as u64, unique.len() as u64)
                });
                row.text_word_count = stats.map(|s| s.0);
                row.text_unique_word_count = stats.map(|s| s.1);
                Ok::<(), Error>(())
            })
        })?;

        table.add_column(DerivedColumn::TextWordCount);
        table.add_column(DerivedColumn::TextUniqueWordCount);
        table.warn_null_columns();
        Ok(())
    }
}
