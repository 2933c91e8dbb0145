//! CLI entry point for the endless tile world walker

use clap::Parser;
use infinitile::io::cli::{Cli, WalkProcessor, init_logging};

fn main() -> infinitile::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let processor = WalkProcessor::new(cli);
    processor.process()
}
