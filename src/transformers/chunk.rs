//! Random chunk sampling.
//!
//! Replaces each row's text with `num_chunks` spans of `chunk_size` words drawn at random
//! without overlap. Spans are concatenated in draw order, not in text order.
//!
//! Words are single-space separated. A text holding fewer than `num_chunks * chunk_size`
//! words is left untouched.
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{config::ChunkConfig, dataset::DatasetTable, error::Error};

use super::Transform;

/// Sample `num_chunks` disjoint spans of `chunk_size` words from `text`.
///
/// Each draw picks a start in `[0, remaining - chunk_size]` of the words not yet taken,
/// so every span is full-length. Taken words are removed from the pool,
/// which means a later span may join words that were separated by an earlier one.
pub fn chunk_text<R: Rng + ?Sized>(
    text: &str,
    num_chunks: usize,
    chunk_size: usize,
    rng: &mut R,
) -> String {
    let mut pool: Vec<&str> = text.split(' ').collect();
    let needed = num_chunks.saturating_mul(chunk_size);
    if needed > pool.len() {
        return text.to_string();
    }

    let mut chunks: Vec<&str> = Vec::with_capacity(needed);
    for _ in 0..num_chunks {
        if pool.len() < chunk_size {
            chunks.append(&mut pool);
            break;
        }
        let start = rng.gen_range(0..=pool.len() - chunk_size);
        chunks.extend(pool.drain(start..start + chunk_size));
    }

    chunks.join(" ")
}

pub struct Chunk {
    config: ChunkConfig,
    seed: Option<u64>,
}

impl Chunk {
    /// A `seed` makes sampling reproducible; without one the generator is seeded from entropy.
    pub fn new(config: ChunkConfig, seed: Option<u64>) -> Self {
        Self { config, seed }
    }
}

impl Transform for Chunk {
    fn name(&self) -> &'static str {
        "chunk"
    }

    fn transform(&self, table: &mut DatasetTable) -> Result<(), Error> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let ChunkConfig {
            num_chunks,
            chunk_size,
        } = self.config;

        for row in table.rows_mut() {
            if let Some(text) = &row.text {
                let chunked = chunk_text(text, num_chunks, chunk_size, &mut rng);
                if chunked == *text {
                    debug!("[{}] too short to chunk, kept as is", row.id());
                }
                row.text = Some(chunked);
            }
        }

        Ok(())
    }
}
