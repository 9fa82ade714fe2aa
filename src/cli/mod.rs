//! CLI command definitions
//!
//! The binary never parses JavaScript. Every command takes a path to an
//! ESTree AST in JSON form, builds the flow graph, and reports on it.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// esflow - control flow graphs for ECMAScript 5
#[derive(Parser, Debug, Clone)]
#[command(name = "esflow")]
#[command(author, version, about)]
#[command(long_about = "esflow consumes an already-parsed ECMAScript 5 AST (ESTree JSON) and \
builds a control flow graph of hoist/enter/exit events. The graph \
over-approximates runtime control flow: every concrete execution is a path \
through it, and it is queryable forwards and backwards from the program's \
start and end events.")]
pub struct Cli {
    /// Output format
    #[arg(global = true, long, value_enum, default_value_t = OutputFormat::Human)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output
    Human,
    /// Compact JSON for programmatic consumption
    Json,
    /// Formatted JSON with indentation
    Pretty,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build the flow graph and emit a visualization
    Analyse(AnalyseArgs),

    /// List every flow event with its adjacency
    Events(EventsArgs),

    /// Count and enumerate execution paths
    Paths(PathsArgs),

    /// List events with no forward path from the start of flow
    Unreachable(UnreachableArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyseArgs {
    /// Path to an ESTree AST in JSON form
    pub path: PathBuf,

    /// Graph format to emit
    #[arg(long, value_enum, default_value_t = GraphFormat::Dot)]
    pub format: GraphFormat,
}

/// Visualization format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    /// Graphviz DOT
    Dot,
    /// Serialized event list
    Json,
}

#[derive(Parser, Debug, Clone)]
pub struct EventsArgs {
    /// Path to an ESTree AST in JSON form
    pub path: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct PathsArgs {
    /// Path to an ESTree AST in JSON form
    pub path: PathBuf,

    /// Stop enumerating after this many paths
    #[arg(long, default_value_t = 256)]
    pub max_paths: usize,

    /// Print the event sequence of every path
    #[arg(long)]
    pub with_events: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct UnreachableArgs {
    /// Path to an ESTree AST in JSON form
    pub path: PathBuf,
}

pub mod cmds {
    use std::fs;
    use std::path::Path;

    use anyhow::{Context, Result};
    use serde_json::json;

    use crate::ast::Ast;
    use crate::flow::{self, FlowGraph, PathCount, PathLimits};
    use crate::output;

    use super::{AnalyseArgs, Cli, EventsArgs, GraphFormat, OutputFormat, PathsArgs, UnreachableArgs};

    fn load(path: &Path) -> Result<FlowGraph> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let ast = Ast::from_json(&text)
            .with_context(|| format!("lowering {}", path.display()))?;
        Ok(flow::analyse(ast)?)
    }

    fn emit_json(value: &serde_json::Value, cli: &Cli) -> Result<()> {
        match cli.output {
            OutputFormat::Pretty | OutputFormat::Human => {
                println!("{}", serde_json::to_string_pretty(value)?)
            }
            OutputFormat::Json => println!("{}", serde_json::to_string(value)?),
        }
        Ok(())
    }

    pub fn analyse(args: &AnalyseArgs, cli: &Cli) -> Result<()> {
        let graph = load(&args.path)?;
        match args.format {
            GraphFormat::Dot => {
                println!("{}", flow::export_dot(&graph));
            }
            GraphFormat::Json => {
                let export = flow::export_json(&graph);
                emit_json(&serde_json::to_value(&export)?, cli)?;
            }
        }
        Ok(())
    }

    pub fn events(args: &EventsArgs, cli: &Cli) -> Result<()> {
        let graph = load(&args.path)?;
        let export = flow::export_json(&graph);

        match cli.output {
            OutputFormat::Human => {
                output::header(&format!(
                    "{} flow events (start {}, end {})",
                    export.events.len(),
                    export.start,
                    export.end
                ));
                for event in &export.events {
                    let forward: Vec<String> =
                        event.forward.iter().map(|id| id.to_string()).collect();
                    println!(
                        "  {:>4} {:<5} {:<24} -> [{}]",
                        event.id,
                        event.phase,
                        output::accent(&event.kind),
                        forward.join(", ")
                    );
                }
            }
            OutputFormat::Json | OutputFormat::Pretty => {
                emit_json(&serde_json::to_value(&export)?, cli)?;
            }
        }
        Ok(())
    }

    pub fn paths(args: &PathsArgs, cli: &Cli) -> Result<()> {
        let graph = load(&args.path)?;
        let count = flow::count_paths(&graph);
        let limits = PathLimits { max_paths: args.max_paths, ..PathLimits::default() };
        let paths = flow::enumerate_paths(&graph, &limits);
        if paths.len() >= args.max_paths {
            output::warn(&format!(
                "enumeration stopped at {} paths; raise --max-paths for more",
                args.max_paths
            ));
        }

        match cli.output {
            OutputFormat::Human => {
                output::header(&format!("{count} terminating paths"));
                if count.is_unbounded() {
                    output::info("a cycle is reachable; enumeration clips at each revisit");
                }
                for (index, path) in paths.iter().enumerate() {
                    println!(
                        "  path {:>3}: {} events, {:?} ({})",
                        index,
                        path.len(),
                        path.kind,
                        &path.path_id[..12]
                    );
                    if args.with_events {
                        let events: Vec<String> =
                            path.events.iter().map(|id| id.to_string()).collect();
                        println!("           [{}]", events.join(" -> "));
                    }
                }
            }
            OutputFormat::Json | OutputFormat::Pretty => {
                let count = match count {
                    PathCount::Finite(n) => json!(n),
                    PathCount::Unbounded => json!("unbounded"),
                };
                emit_json(&json!({ "count": count, "paths": paths }), cli)?;
            }
        }
        Ok(())
    }

    pub fn unreachable(args: &UnreachableArgs, cli: &Cli) -> Result<()> {
        let graph = load(&args.path)?;
        let unreachable = flow::find_unreachable(&graph);

        match cli.output {
            OutputFormat::Human => {
                output::header(&format!("{} unreachable events", unreachable.len()));
                for id in &unreachable {
                    let event = graph.event(*id).expect("listed id is valid");
                    println!("  {:>4} {:?} {}", id, event.phase(), event.node().kind());
                }
            }
            OutputFormat::Json | OutputFormat::Pretty => {
                let ids: Vec<usize> = unreachable.iter().map(|id| id.index()).collect();
                emit_json(&json!({ "unreachable": ids }), cli)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parses_analyse_with_format() {
        let cli = Cli::parse_from(["esflow", "analyse", "ast.json", "--format", "json"]);
        match cli.command {
            Commands::Analyse(args) => {
                assert_eq!(args.format, GraphFormat::Json);
                assert_eq!(args.path.to_str(), Some("ast.json"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_output_flag_is_accepted_after_the_subcommand() {
        let cli = Cli::parse_from(["esflow", "paths", "ast.json", "--output", "json"]);
        assert_eq!(cli.output, OutputFormat::Json);
        match cli.command {
            Commands::Paths(args) => assert_eq!(args.max_paths, 256),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
