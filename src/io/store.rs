/*! Per-book artifact access.

A corpus root holds three artifact families, one file per book and family:

```text
{root}/text/{id}_text.txt       one book line per physical line
{root}/counts/{id}_counts.txt   `word count` per line
{root}/tokens/{id}_tokens.txt   one token per line
```

Artifacts are produced elsewhere and may not exist yet for a given book.
A missing file is reported as `Ok(None)`, never as an error.
!*/
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use log::debug;

use crate::error::Error;

/// One of the three per-book artifact families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Text,
    Counts,
    Tokens,
}

impl Artifact {
    fn dir(&self) -> &'static str {
        match self {
            Artifact::Text => "text",
            Artifact::Counts => "counts",
            Artifact::Tokens => "tokens",
        }
    }

    fn suffix(&self) -> &'static str {
        match self {
            Artifact::Text => "_text.txt",
            Artifact::Counts => "_counts.txt",
            Artifact::Tokens => "_tokens.txt",
        }
    }
}

/// Totals read from a counts artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WordCounts {
    /// sum of all per-word counts
    pub total: u64,
    /// number of listed words
    pub unique: u64,
}

/// Read-only accessor over a corpus root.
#[derive(Debug, Clone)]
pub struct TextStore {
    root: PathBuf,
}

impl TextStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of an artifact. The file may not exist.
    pub fn path(&self, id: &str, artifact: Artifact) -> PathBuf {
        let mut p = self.root.join(artifact.dir());
        p.push(format!("{}{}", id, artifact.suffix()));
        p
    }

    /// Open an artifact, mapping a missing file to `None`.
    fn open(&self, id: &str, artifact: Artifact) -> Result<Option<BufReader<File>>, Error> {
        let path = self.path(id, artifact);
        match File::open(&path) {
            Ok(f) => Ok(Some(BufReader::new(f))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("[{}] no {:?} artifact at {:?}", id, artifact, path);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Full text of a book, physical lines joined by single spaces.
    ///
    /// Line terminators (`\n`, `\r\n`) are stripped, so intra-line structure is lost.
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn text(&self, id: &str) -> Result<Option<String>, Error> {
        let reader = match self.open(id, Artifact::Text)? {
            Some(r) => r,
            None => return Ok(None),
        };

        let mut lines = Vec::new();
        for line in reader.split(b'\n') {
            let line = line?;
            let line = String::from_utf8_lossy(&line);
            lines.push(line.trim_end_matches(['\r', '\n']).to_string());
        }

        Ok(Some(lines.join(" ")))
    }

    /// Parse the counts artifact of a book.
    ///
    /// Each line must hold exactly two whitespace-separated fields, a word and an
    /// integer count. Anything else fails the whole file.
    pub fn counts(&self, id: &str) -> Result<Option<WordCounts>, Error> {
        let reader = match self.open(id, Artifact::Counts)? {
            Some(r) => r,
            None => return Ok(None),
        };

        let mut counts = WordCounts::default();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let malformed = || Error::MalformedCounts {
                path: self.path(id, Artifact::Counts),
                line: idx + 1,
                content: line.clone(),
            };

            let fields: Vec<&str> = line.split_whitespace().collect();
            let count = match fields.as_slice() {
                [_word, count] => count.parse::<u64>().map_err(|_| malformed())?,
                _ => return Err(malformed()),
            };

            counts.total = counts.total.checked_add(count).ok_or_else(malformed)?;
            counts.unique += 1;
        }

        Ok(Some(counts))
    }

    /// Number of physical lines of an artifact.
    ///
    /// A final line without terminator still counts. Content is never decoded.
    pub fn line_count(&self, id: &str, artifact: Artifact) -> Result<Option<u64>, Error> {
        let reader = match self.open(id, artifact)? {
            Some(r) => r,
            None => return Ok(None),
        };

        let mut nb_lines = 0;
        for line in reader.split(b'\n') {
            line?;
            nb_lines += 1;
        }

        Ok(Some(nb_lines))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{fs, path::Path};

    use super::{Artifact, TextStore, WordCounts};
    use crate::error::Error;

    /// Write an artifact into a corpus root, creating the family folder if needed.
    pub(crate) fn write_artifact(root: &Path, id: &str, artifact: Artifact, content: &str) {
        let store = TextStore::new(root);
        let path = store.path(id, artifact);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn path_layout() {
        let store = TextStore::new("corpus");
        assert_eq!(
            store.path("PG12", Artifact::Text),
            Path::new("corpus/text/PG12_text.txt")
        );
        assert_eq!(
            store.path("PG12", Artifact::Counts),
            Path::new("corpus/counts/PG12_counts.txt")
        );
        assert_eq!(
            store.path("PG12", Artifact::Tokens),
            Path::new("corpus/tokens/PG12_tokens.txt")
        );
    }

    #[test]
    fn missing_files_are_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = TextStore::new(dir.path());

        assert_eq!(store.text("PG1").unwrap(), None);
        assert_eq!(store.counts("PG1").unwrap(), None);
        assert_eq!(store.line_count("PG1", Artifact::Tokens).unwrap(), None);
    }

    #[test]
    fn text_joins_lines() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(
            dir.path(),
            "PG1",
            Artifact::Text,
            "It was the best\r\nof times,\nit was the worst\n",
        );
        let store = TextStore::new(dir.path());

        assert_eq!(
            store.text("PG1").unwrap().unwrap(),
            "It was the best of times, it was the worst"
        );
    }

    #[test]
    fn counts_sum_and_unique() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "PG1", Artifact::Counts, "the 5\nfox 2\n");
        let store = TextStore::new(dir.path());

        assert_eq!(
            store.counts("PG1").unwrap(),
            Some(WordCounts {
                total: 7,
                unique: 2
            })
        );
    }

    #[test]
    fn counts_malformed_line() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "PG1", Artifact::Counts, "the 5\nquick brown 2\n");
        let store = TextStore::new(dir.path());

        match store.counts("PG1") {
            Err(Error::MalformedCounts { line, content, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(content, "quick brown 2");
            }
            other => panic!("expected malformed counts, got {:?}", other),
        }
    }

    #[test]
    fn counts_non_integer() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "PG1", Artifact::Counts, "the five\n");
        let store = TextStore::new(dir.path());

        assert!(matches!(
            store.counts("PG1"),
            Err(Error::MalformedCounts { line: 1, .. })
        ));
    }

    #[test]
    fn counts_total_overflow() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(
            dir.path(),
            "PG1",
            Artifact::Counts,
            "a 18446744073709551615\nb 1\n",
        );
        let store = TextStore::new(dir.path());

        assert!(matches!(
            store.counts("PG1"),
            Err(Error::MalformedCounts { line: 2, .. })
        ));
    }

    #[test]
    fn line_count_physical_lines() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "PG1", Artifact::Text, "a\n\nb c d\n   \ne");
        write_artifact(dir.path(), "PG1", Artifact::Tokens, "a\nb\nc\n");
        let store = TextStore::new(dir.path());

        assert_eq!(store.line_count("PG1", Artifact::Text).unwrap(), Some(5));
        assert_eq!(store.line_count("PG1", Artifact::Tokens).unwrap(), Some(3));
    }

    #[test]
    fn line_count_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "PG1", Artifact::Tokens, "");
        let store = TextStore::new(dir.path());

        assert_eq!(store.line_count("PG1", Artifact::Tokens).unwrap(), Some(0));
    }
}
