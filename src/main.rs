//! CLI entry point for the seamless texture synthesis tool

use clap::Parser;
use seamweave::io::cli::{Cli, Command, FileProcessor, run_serve};

fn main() -> seamweave::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Tile(args) => {
            let mut processor = FileProcessor::new(args);
            processor.process()
        }
        Command::Serve(args) => run_serve(&args),
    }
}
