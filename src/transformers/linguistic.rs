//! Tokenization and lemmatization of row texts.
//!
//! Both steps are row-parallel on a worker pool. Results are collected in row order,
//! and a toolkit failure on any row fails the whole stage.
use std::sync::Arc;

use log::warn;
use rayon::{prelude::*, ThreadPool};

use crate::{
    dataset::{DatasetTable, DerivedColumn},
    error::Error,
    nlp::{lemmatize_tokens, Toolkit},
};

use super::Transform;

pub struct Linguistic {
    toolkit: Arc<dyn Toolkit>,
    pool: Arc<ThreadPool>,
    lemmatize: bool,
}

impl Linguistic {
    pub fn new(toolkit: Arc<dyn Toolkit>, pool: Arc<ThreadPool>) -> Self {
        Self {
            toolkit,
            pool,
            lemmatize: true,
        }
    }

    /// Only tokenize, leaving the `lemmas` column out.
    pub fn lemmatize(mut self, lemmatize: bool) -> Self {
        self.lemmatize = lemmatize;
        self
    }

    /// Warn about rows whose sequence ended up absent or empty.
    fn warn_empty(table: &DatasetTable, column: DerivedColumn) {
        let empty = table.absent_count(column);
        if empty > 0 {
            warn!(
                "[{}] {} of {} rows have no {}",
                table.name(),
                empty,
                table.len(),
                column.name()
            );
        }
    }
}

impl Transform for Linguistic {
    fn name(&self) -> &'static str {
        "tokenize"
    }

    fn transform(&self, table: &mut DatasetTable) -> Result<(), Error> {
        let toolkit = &*self.toolkit;

        let tokens: Vec<Option<Vec<String>>> = self.pool.install(|| {
            table
                .rows()
                .par_iter()
                .map(|row| row.text.as_deref().map(|t| toolkit.tokenize(t)).transpose())
                .collect::<Result<_, Error>>()
        })?;
        for (row, tokens) in table.rows_mut().iter_mut().zip(tokens) {
            row.tokens = tokens;
        }
        table.add_column(DerivedColumn::Tokens);
        Self::warn_empty(table, DerivedColumn::Tokens);

        if !self.lemmatize {
            return Ok(());
        }

        let lemmas: Vec<Option<Vec<String>>> = self.pool.install(|| {
            table
                .rows()
                .par_iter()
                .map(|row| {
                    row.tokens
                        .as_deref()
                        .map(|t| lemmatize_tokens(toolkit, t))
                        .transpose()
                })
                .collect::<Result<_, Error>>()
        })?;
        for (row, lemmas) in table.rows_mut().iter_mut().zip(lemmas) {
            row.lemmas = lemmas;
        }
        table.add_column(DerivedColumn::Lemmas);
        Self::warn_empty(table, DerivedColumn::Lemmas);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread, time::Duration};

    use super::Linguistic;
    use crate::{
        dataset::{DatasetTable, DerivedColumn},
        error::Error,
        nlp::{English, Pos, Toolkit},
        transformers::{build_pool, Transform},
    };

    /// Sleeps longer on earlier rows, so workers finish in reverse order.
    struct Slow;
    impl Toolkit for Slow {
        fn tokenize(&self, text: &str) -> Result<Vec<String>, Error> {
            let n: u64 = text.parse().map_err(|_| Error::Toolkit(text.to_string()))?;
            thread::sleep(Duration::from_millis(5 * (10 - n)));
            Ok(vec![text.to_string()])
        }
        fn tag(&self, tokens: &[String]) -> Result<Vec<(String, String)>, Error> {
            Ok(tokens.iter().map(|t| (t.clone(), "NN".to_string())).collect())
        }
        fn lemmatize(&self, token: &str, _: Pos) -> Result<String, Error> {
            Ok(token.to_string())
        }
        fn is_stopword(&self, _: &str) -> bool {
            false
        }
    }

    #[test]
    fn order_is_preserved() {
        let ids: Vec<String> = (0..10).map(|i| i.to_string()).collect();
        let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
        let mut table = DatasetTable::from_ids("train", &ids).unwrap();
        for row in table.rows_mut() {
            row.text = Some(row.id().to_string());
        }

        Linguistic::new(Arc::new(Slow), build_pool(4).unwrap())
            .lemmatize(false)
            .transform(&mut table)
            .unwrap();

        for row in table.rows() {
            assert_eq!(row.tokens, Some(vec![row.id().to_string()]));
        }
        assert!(!table.has_column(DerivedColumn::Lemmas));
    }

    #[test]
    fn failure_aborts() {
        let mut table = DatasetTable::from_ids("train", &["1", "2"]).unwrap();
        table.rows_mut()[0].text = Some("1".to_string());
        table.rows_mut()[1].text = Some("not a number".to_string());

        let pool = build_pool(2).unwrap();
        let result = Linguistic::new(Arc::new(Slow), pool).transform(&mut table);

        assert!(matches!(result, Err(Error::Toolkit(_))));
        assert_eq!(table.rows()[0].tokens, None);
    }

    #[test_log::test]
    fn tokens_and_lemmas() {
        let mut table = DatasetTable::from_ids("train", &["A", "B", "C"]).unwrap();
        table.rows_mut()[0].text = Some("The whales were swimming.".to_string());
        table.rows_mut()[2].text = Some("It is the".to_string());

        Linguistic::new(Arc::new(English), build_pool(2).unwrap())
            .transform(&mut table)
            .unwrap();

        let rows = table.rows();
        assert_eq!(
            rows[0].tokens,
            Some(
                ["The", "whales", "were", "swimming", "."]
                    .iter()
                    .map(|t| t.to_string())
                    .collect()
            )
        );
        assert_eq!(
            rows[0].lemmas,
            Some(vec!["whale".to_string(), "swim".to_string()])
        );
        assert_eq!(rows[1].tokens, None);
        assert_eq!(rows[1].lemmas, None);
        // only stop-words: an empty sequence, reported but kept
        assert_eq!(rows[2].lemmas, Some(vec![]));
        assert_eq!(table.absent_count(DerivedColumn::Lemmas), 2);
    }
}
