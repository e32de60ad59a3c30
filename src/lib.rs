pub mod config;
pub mod dataset;
pub mod error;
pub mod io;
pub mod nlp;
pub mod pipelines;
pub mod transformers;
