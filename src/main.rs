use avifauna_engine::cli::{run, Cli};
use avifauna_engine::error::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
