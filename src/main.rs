//! `reqd`: author and navigate hierarchical product requirements documents.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
