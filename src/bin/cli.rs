// src/bin/cli.rs
use docskel::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let mode = cli::parse_args(std::env::args().skip(1))?;
    cli::run(mode)?;
    Ok(())
}
