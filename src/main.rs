//! CLI entry point for rendering and sending virtual bouquets

use bouquet::io::cli::{Cli, CommandRunner};
use bouquet::io::configuration::Settings;
use bouquet::io::logging::init_logging;
use clap::Parser;

#[tokio::main]
async fn main() -> bouquet::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet);
    let mut runner = CommandRunner::new(cli, Settings::from_env());
    runner.run().await
}
