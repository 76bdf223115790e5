//! sitepack - build and serve a browser bundle.
//!
//! Parses flags, sets up logging and terminal output, loads configuration and
//! dispatches to the build or watch command.

use miette::Result;
use sitepack_cli::{cli, commands, config::SitepackConfig, error, logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse errors exit with status 2 inside clap
    let args = cli::Cli::parse_normalized();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init(args.no_color, args.quiet);

    run(&args).await.map_err(error::cli_error_to_miette)
}

async fn run(args: &cli::Cli) -> sitepack_cli::Result<()> {
    let cwd = std::env::current_dir()?;
    let config = SitepackConfig::load(args, &cwd)?;
    commands::run(&config, &cwd).await
}
