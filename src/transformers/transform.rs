//! Transform trait and stage chaining.
use log::info;

use crate::{dataset::DatasetTable, error::Error};

/// A processing stage over a whole table.
///
/// Stages may add derived columns or modify existing ones, but never alter row ids.
pub trait Transform {
    fn name(&self) -> &'static str;
    fn transform(&self, table: &mut DatasetTable) -> Result<(), Error>;
}

/// Chains transforms, running them in insertion order.
/// The first failing stage stops the chain.
#[derive(Default)]
pub struct Transformer<'a>(Vec<Box<dyn Transform + Sync + 'a>>);

impl<'a> Transformer<'a> {
    pub fn add(&mut self, transform: Box<dyn Transform + Sync + 'a>) -> &mut Transformer<'a> {
        self.0.push(transform);
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.0.iter().map(|t| t.name()).collect()
    }
}

impl<'a> Transform for Transformer<'a> {
    fn name(&self) -> &'static str {
        "chain"
    }

    fn transform(&self, table: &mut DatasetTable) -> Result<(), Error> {
        for transform in &self.0 {
            info!(
                "[{}] {}: starting on {} rows",
                table.name(),
                transform.name(),
                table.len()
            );
            transform.transform(table)?;
            info!(
                "[{}] {}: done, {} rows",
                table.name(),
                transform.name(),
                table.len()
            );
        }
        Ok(())
    }
}
