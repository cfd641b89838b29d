//! CLI entry point for the face-aware photo collage tool

use clap::Parser;
use photocollage::io::cli::{Cli, CollageBuilder};
use photocollage::io::logging;

fn main() -> photocollage::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let mut builder = CollageBuilder::new(cli);
    builder.process().map(|_summary| ())
}
