//! Pipelines.
//!
//! The module provides a light [pipeline::Pipeline] trait, implemented by [Prepare]
//! which loads, processes and writes out a whole dataset.
#[allow(clippy::module_inception)]
pub mod pipeline;
mod prepare;

pub use pipeline::Pipeline;
pub use prepare::Prepare;
