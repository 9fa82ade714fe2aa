// Esflow: control flow graphs for ECMAScript 5
//
// Parses nothing itself: reads an ESTree AST as JSON, builds the flow
// event graph, and answers visualization, path and reachability queries.

use anyhow::Result;
use clap::Parser;

use esflow::cli::{self, Cli, Commands};
use esflow::output;

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    if let Err(err) = run_command(cli) {
        output::error(&format!("{err:#}"));
        std::process::exit(output::EXIT_ERROR);
    }
}

fn run_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyse(ref args) => cli::cmds::analyse(args, &cli),
        Commands::Events(ref args) => cli::cmds::events(args, &cli),
        Commands::Paths(ref args) => cli::cmds::paths(args, &cli),
        Commands::Unreachable(ref args) => cli::cmds::unreachable(args, &cli),
    }
}
