//! # gutenberg-prep
//!
//! Prepares Project Gutenberg dataset splits for analysis: corpus statistics,
//! text chunking, tokenization and lemmatization.
//!
//! ```sh
//! USAGE:
//!     gutenberg-prep <SUBCOMMAND>
//!
//! SUBCOMMANDS:
//!     help       Prints this message or the help of the given subcommand(s)
//!     prepare    Enrich, chunk and tokenize dataset splits
//!     stats      Print corpus statistics of some books
//! ```
use gutenberg_prep::{
    error::Error,
    io::{Artifact, TextStore},
    pipelines::{Pipeline, Prepare},
};
use structopt::StructOpt;

#[macro_use]
extern crate log;

mod cli;

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::GutenbergPrep::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::GutenbergPrep::Prepare(p) => {
            let summaries = Prepare::new(p.config(), p.dst).run()?;
            for (split, summary) in summaries {
                info!("[{}] {} rows, absent: {:?}", split, summary.rows, summary.absent);
            }
        }

        cli::GutenbergPrep::Stats(s) => {
            let store = TextStore::new(s.corpus_root);
            println!("id\tword_count\tunique_word_count\tline_count\ttoken_count");
            for id in s.ids {
                let counts = store.counts(&id)?;
                let fmt = |v: Option<u64>| v.map_or_else(|| "-".to_string(), |v| v.to_string());
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    id,
                    fmt(counts.map(|c| c.total)),
                    fmt(counts.map(|c| c.unique)),
                    fmt(store.line_count(&id, Artifact::Text)?),
                    fmt(store.line_count(&id, Artifact::Tokens)?),
                );
            }
        }
    };
    Ok(())
}
