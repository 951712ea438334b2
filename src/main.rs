//! sgacrawl CLI entry point.

use clap::Parser;

use sgacrawl::cli::commands;
use sgacrawl::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command.unwrap_or_default() {
        Commands::Check => commands::check::execute(&cli.config, cli.json),
        Commands::Example => commands::example::execute(cli.json),
        Commands::Init(args) => commands::init::execute(args, cli.json),
    };

    if let Err(err) = result {
        sgacrawl::cli::handle_error(err, cli.json);
    }
}
