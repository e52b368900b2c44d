use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use graph_bisect_core::{bisect, BisectConfig, Graph, Selection, DEFAULT_CUT_SIZE};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Split an undirected graph in two by removing its highest-betweenness
/// edges, and print the product of the two component sizes.
#[derive(Debug, Parser)]
#[command(name = "graph-bisect", version)]
struct Args {
    /// Adjacency list, one `LABEL: NEIGHBOR ...` line per vertex
    #[arg(default_value = "input.txt")]
    input: PathBuf,

    /// Number of edges to remove
    #[arg(long, default_value_t = DEFAULT_CUT_SIZE)]
    cut_size: usize,

    /// How cut edges are chosen from the betweenness ranking
    #[arg(long, value_enum, default_value_t = SelectionArg::Progressive)]
    selection: SelectionArg,

    /// Log the chosen cut and component sizes to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SelectionArg {
    /// Recompute the ranking after each removed edge
    Progressive,
    /// Take the top edges from a single ranking
    OneShot,
}

impl From<SelectionArg> for Selection {
    fn from(arg: SelectionArg) -> Self {
        match arg {
            SelectionArg::Progressive => Selection::Progressive,
            SelectionArg::OneShot => Selection::OneShot,
        }
    }
}

impl Args {
    fn config(&self) -> BisectConfig {
        BisectConfig {
            cut_size: self.cut_size,
            selection: self.selection.into(),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let product = run(&args)?;
    println!("{}", product);
    Ok(())
}

fn run(args: &Args) -> Result<usize> {
    let input = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read input file {}", args.input.display()))?;

    let graph = Graph::parse(&input)
        .with_context(|| format!("failed to parse {}", args.input.display()))?;

    let result = bisect(&graph, &args.config()).context("bisection failed")?;

    for edge in &result.cut {
        let (a, b) = edge.labels(&graph);
        tracing::info!("cut {}-{}", a, b);
    }
    tracing::info!(
        left = result.sizes.0,
        right = result.sizes.1,
        "graph split"
    );

    Ok(result.product())
}
