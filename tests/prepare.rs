use std::fs;
use std::path::Path;

use gutenberg_prep::config::LoaderConfigBuilder;
use gutenberg_prep::dataset::{DatasetLoader, DatasetTable, DerivedColumn};
use gutenberg_prep::io::TextStore;
use gutenberg_prep::pipelines::{Pipeline, Prepare};
use gutenberg_prep::transformers::{build_pool, Enrich, Transform};

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Corpus with artifacts for `A` and `C` only.
fn corpus(root: &Path) {
    write(
        &root.join("text/A_text.txt"),
        "Call me Ishmael.\nSome years ago, never mind how long precisely,\nI went to sea.\n",
    );
    write(&root.join("counts/A_counts.txt"), "call 1\nme 1\nishmael 1\nyears 1\nsea 2\n");
    write(&root.join("tokens/A_tokens.txt"), "call\nme\nishmael\n");

    write(
        &root.join("text/C_text.txt"),
        "It is a truth universally acknowledged.\nThe sisters were walking.\n",
    );
    write(&root.join("counts/C_counts.txt"), "truth 4\nsisters 3\nwalking 1\n");
    write(&root.join("tokens/C_tokens.txt"), "truth\nsisters\n");
}

fn split(path: &Path) {
    write(path, ",id,title\n0,A,Moby Dick\n1,B,Unknown\n2,C,Pride and Prejudice\n");
}

#[test]
fn enrich_three_rows() {
    let root = tempfile::tempdir().unwrap();
    corpus(root.path());

    let mut table = DatasetTable::from_ids("train", &["A", "B", "C"]).unwrap();
    Enrich::new(TextStore::new(root.path()), build_pool(2).unwrap())
        .transform(&mut table)
        .unwrap();

    let rows = table.rows();
    assert_eq!(rows.len(), 3);

    let a = &rows[0];
    assert_eq!(a.id(), "A");
    assert_eq!(a.word_count, Some(6));
    assert_eq!(a.unique_word_count, Some(5));
    assert_eq!(a.line_count, Some(3));
    assert_eq!(a.token_count, Some(3));

    let b = &rows[1];
    assert_eq!(b.id(), "B");
    assert_eq!(b.word_count, None);
    assert_eq!(b.unique_word_count, None);
    assert_eq!(b.line_count, None);
    assert_eq!(b.token_count, None);

    let c = &rows[2];
    assert_eq!(c.id(), "C");
    assert_eq!(c.word_count, Some(8));
    assert_eq!(c.unique_word_count, Some(3));
    assert_eq!(c.line_count, Some(2));
    assert_eq!(c.token_count, Some(2));
}

#[test]
fn load_with_chunking() {
    let data = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    corpus(root.path());
    for name in ["final_train.csv", "final_val.csv", "final_test.csv"] {
        split(&data.path().join(name));
    }

    let config = LoaderConfigBuilder::default()
        .data_dir(data.path())
        .corpus_root(root.path())
        .chunking(2, 3)
        .seed(Some(3))
        .workers(Some(3))
        .build();
    let loader = DatasetLoader::load(&config).unwrap();

    for table in loader.splits() {
        let ids: Vec<&str> = table.rows().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);

        // A and C have at least 6 words: chunked down to exactly 6
        for row in [&table.rows()[0], &table.rows()[2]] {
            assert_eq!(row.text.as_ref().unwrap().split(' ').count(), 6);
            assert!(row.tokens.is_some());
        }
        assert_eq!(table.rows()[1].text, None);
        assert_eq!(table.rows()[1].tokens, None);
        assert!(table.has_column(DerivedColumn::Lemmas));
    }
}

#[test]
fn prepare_writes_splits() {
    let data = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    let dst = tempfile::tempdir().unwrap();
    corpus(root.path());
    for name in ["train.csv", "val.csv", "test.csv"] {
        split(&data.path().join(name));
    }

    let config = LoaderConfigBuilder::default()
        .data_dir(data.path())
        .corpus_root(root.path())
        .splits("train.csv", "val.csv", "test.csv")
        .drop_missing(true)
        .lemmatize(false)
        .build();
    let summaries = Prepare::new(config, dst.path().to_path_buf()).run().unwrap();

    assert_eq!(summaries.len(), 3);
    assert_eq!(summaries["train"].rows, 2);
    assert_eq!(summaries["val"].absent["word_count"], 0);
    assert!(!summaries["test"].absent.contains_key("lemmas"));

    let train = DatasetTable::from_path("train", &dst.path().join("train.csv")).unwrap();
    let ids: Vec<&str> = train.rows().iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["A", "C"]);
    assert_eq!(train.headers(), &["id", "title"]);
    for column in [
        DerivedColumn::WordCount,
        DerivedColumn::UniqueWordCount,
        DerivedColumn::LineCount,
        DerivedColumn::TokenCount,
        DerivedColumn::Text,
        DerivedColumn::Tokens,
    ] {
        assert!(train.has_column(column));
    }
    assert!(!train.has_column(DerivedColumn::Lemmas));
    assert_eq!(train.rows()[1].word_count, Some(8));
    assert_eq!(
        train.rows()[0].text.as_deref(),
        Some("Call me Ishmael. Some years ago, never mind how long precisely, I went to sea.")
    );

    let summary = fs::read_to_string(dst.path().join("summary.json")).unwrap();
    let summary: serde_json::Value = serde_json::from_str(&summary).unwrap();
    assert_eq!(summary["test"]["rows"], 2);
}

#[test]
fn prepare_twice() {
    let data = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    corpus(root.path());
    for name in ["final_train.csv", "final_val.csv", "final_test.csv"] {
        split(&data.path().join(name));
    }

    let config = LoaderConfigBuilder::default()
        .data_dir(data.path())
        .corpus_root(root.path())
        .lemmatize(false)
        .build();
    Prepare::new(config, first.path().to_path_buf())
        .run()
        .unwrap();

    // previous output as input: computed columns are recomputed, not duplicated
    let config = LoaderConfigBuilder::default()
        .data_dir(first.path())
        .corpus_root(root.path())
        .splits("train.csv", "val.csv", "test.csv")
        .lemmatize(false)
        .build();
    Prepare::new(config, second.path().to_path_buf())
        .run()
        .unwrap();

    let first = fs::read_to_string(first.path().join("train.csv")).unwrap();
    let second = fs::read_to_string(second.path().join("train.csv")).unwrap();
    assert_eq!(
        first.lines().next(),
        Some(",id,title,word_count,unique_word_count,line_count,token_count,text,tokens")
    );
    assert_eq!(first, second);
}
