//! Corpus statistics for each row.
//!
//! Reads the counts, text and tokens artifacts of every book and fills
//! `word_count`, `unique_word_count`, `line_count` and `token_count`.
//! Rows are independent and processed on the worker pool.
use std::sync::Arc;

use log::info;
use rayon::{prelude::*, ThreadPool};

use crate::{
    dataset::{DatasetTable, DerivedColumn, Row},
    error::Error,
    io::{Artifact, TextStore},
};

use super::Transform;

pub struct Enrich {
    store: TextStore,
    drop_missing: bool,
    pool: Arc<ThreadPool>,
}

impl Enrich {
    pub fn new(store: TextStore, pool: Arc<ThreadPool>) -> Self {
        Self {
            store,
            drop_missing: false,
            pool,
        }
    }

    /// Remove rows that have neither word, unique word nor line counts after enrichment.
    pub fn drop_missing(mut self, drop_missing: bool) -> Self {
        self.drop_missing = drop_missing;
        self
    }

    fn enrich_row(&self, row: &mut Row) -> Result<(), Error> {
        let counts = self.store.counts(row.id())?;
        row.word_count = counts.map(|c| c.total);
        row.unique_word_count = counts.map(|c| c.unique);
        row.line_count = self.store.line_count(row.id(), Artifact::Text)?;
        row.token_count = self.store.line_count(row.id(), Artifact::Tokens)?;
        Ok(())
    }

    /// All three of word, unique word and line counts are missing.
    fn all_missing(row: &Row) -> bool {
        row.word_count.is_none() && row.unique_word_count.is_none() && row.line_count.is_none()
    }
}

impl Transform for Enrich {
    fn name(&self) -> &'static str {
        "enrich"
    }

    fn transform(&self, table: &mut DatasetTable) -> Result<(), Error> {
        self.pool.install(|| {
            table
                .rows_mut()
                .par_iter_mut()
                .try_for_each(|row| self.enrich_row(row))
        })?;

        for column in [
            DerivedColumn::WordCount,
            DerivedColumn::UniqueWordCount,
            DerivedColumn::LineCount,
            DerivedColumn::TokenCount,
        ] {
            table.add_column(column);
        }

        if self.drop_missing {
            let before = table.len();
            table.retain(|row| !Self::all_missing(row));
            info!(
                "[{}] dropped {} rows without statistics",
                table.name(),
                before - table.len()
            );
        }

        table.warn_null_columns();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Enrich;
    use crate::{
        dataset::{DatasetTable, DerivedColumn},
        error::Error,
        io::{store::tests::write_artifact, Artifact, TextStore},
        transformers::{build_pool, Transform},
    };

    fn corpus() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "A", Artifact::Text, "the fox\nthe dog\nthe end\n");
        write_artifact(dir.path(), "A", Artifact::Counts, "the 5\nfox 2\n");
        write_artifact(dir.path(), "A", Artifact::Tokens, "the\nfox\nthe\ndog\n");
        // C only has counts
        write_artifact(dir.path(), "C", Artifact::Counts, "whale 3\n");
        dir
    }

    #[test]
    fn enrich_rows() {
        let dir = corpus();
        let mut table = DatasetTable::from_ids("train", &["A", "B", "C"]).unwrap();

        Enrich::new(TextStore::new(dir.path()), build_pool(2).unwrap())
            .transform(&mut table)
            .unwrap();

        let a = &table.rows()[0];
        assert_eq!(a.word_count, Some(7));
        assert_eq!(a.unique_word_count, Some(2));
        assert_eq!(a.line_count, Some(3));
        assert_eq!(a.token_count, Some(4));

        let b = &table.rows()[1];
        assert_eq!(b.id(), "B");
        assert_eq!(
            (b.word_count, b.unique_word_count, b.line_count, b.token_count),
            (None, None, None, None)
        );

        let c = &table.rows()[2];
        assert_eq!(c.word_count, Some(3));
        assert_eq!(c.unique_word_count, Some(1));
        assert_eq!(c.line_count, None);
        assert_eq!(c.token_count, None);

        assert!(table.has_column(DerivedColumn::TokenCount));
    }

    #[test]
    fn keep_missing_by_default() {
        let dir = corpus();
        let mut table = DatasetTable::from_ids("train", &["A", "B"]).unwrap();

        Enrich::new(TextStore::new(dir.path()), build_pool(1).unwrap())
            .transform(&mut table)
            .unwrap();

        assert_eq!(table.len(), 2);
    }

    #[test]
    fn drop_missing_rows() {
        let dir = corpus();
        let mut table = DatasetTable::from_ids("train", &["A", "B", "C"]).unwrap();

        Enrich::new(TextStore::new(dir.path()), build_pool(1).unwrap())
            .drop_missing(true)
            .transform(&mut table)
            .unwrap();

        // C has a word count but no line count: only fully empty rows go
        let ids: Vec<&str> = table.rows().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["A", "C"]);
    }

    #[test]
    fn malformed_counts_abort() {
        let dir = corpus();
        write_artifact(dir.path(), "B", Artifact::Counts, "not a count line\n");
        let mut table = DatasetTable::from_ids("train", &["A", "B"]).unwrap();

        let pool = build_pool(2).unwrap();
        let result = Enrich::new(TextStore::new(dir.path()), pool).transform(&mut table);

        assert!(matches!(result, Err(Error::MalformedCounts { .. })));
    }
}
