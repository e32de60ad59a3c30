/*!
# IO utilities

Read-only access to the per-book artifacts of a corpus root.

Dataset split files (CSV) are read and written by [crate::dataset::DatasetTable].
!*/
pub mod store;

pub use store::{Artifact, TextStore, WordCounts};
