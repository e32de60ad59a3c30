/*! Dataset splits.

A split is a [DatasetTable]; [DatasetLoader] loads train/val/test and runs the processing stages on them.
!*/
mod loader;
mod table;

pub use loader::DatasetLoader;
pub use table::{DatasetTable, DerivedColumn, Row, TableSummary, ID_COLUMN};
