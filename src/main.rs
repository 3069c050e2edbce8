//! CLI entry point for the edge-compatible tile grid generator

use clap::Parser;
use edgetile::io::cli::{Cli, Runner};

fn main() -> edgetile::Result<()> {
    let cli = Cli::parse();
    Runner::new(cli).run().map(|_| ())
}
