use anyhow::Result;
use clap::Parser;
use familybank::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
