//! Error enum
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Csv(csv::Error),
    Serde(serde_json::Error),
    ThreadPool(rayon::ThreadPoolBuildError),
    /// A counts artifact line that is not exactly `word count`.
    MalformedCounts {
        path: PathBuf,
        line: usize,
        content: String,
    },
    MissingColumn(String),
    DuplicateId(String),
    /// Failure reported by a natural-language toolkit backend.
    Toolkit(String),
    Custom(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(e) => write!(f, "io error: {e}"),
            Error::Csv(e) => write!(f, "csv error: {e}"),
            Error::Serde(e) => write!(f, "serialization error: {e}"),
            Error::ThreadPool(e) => write!(f, "could not build worker pool: {e}"),
            Error::MalformedCounts {
                path,
                line,
                content,
            } => write!(
                f,
                "malformed counts line {line} in {path:?}: {content:?} (expected `word count`)"
            ),
            Error::MissingColumn(c) => write!(f, "missing column: {c}"),
            Error::DuplicateId(id) => write!(f, "duplicate book id: {id}"),
            Error::Toolkit(e) => write!(f, "toolkit error: {e}"),
            Error::Custom(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Io(e)
    }
}

impl From<csv::Error> for Error {
    fn from(e: csv::Error) -> Error {
        Error::Csv(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::Serde(e)
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(v: rayon::ThreadPoolBuildError) -> Self {
        Self::ThreadPool(v)
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Custom(s)
    }
}
