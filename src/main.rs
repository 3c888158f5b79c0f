use anyhow::Context;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use wardgraph::console::Console;
use wardgraph::{GraphManager, ManagerConfig, PathStrategy, DEFAULT_DATA_FILE};

/// Hospital connectivity graph console
#[derive(Parser, Debug)]
#[command(name = "wardgraph")]
#[command(about = "Browse and edit the hospital department graph", long_about = None)]
struct Args {
    /// Path to the graph file
    #[arg(short, long, env = "WARDGRAPH_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    data_file: PathBuf,

    /// Route search: least-weight or fewest-hops
    #[arg(long, default_value_t = PathStrategy::LeastWeight)]
    path_strategy: PathStrategy,

    /// Do not seed the default layout when the graph file is empty
    #[arg(long)]
    no_seed: bool,

    /// Print the graph as JSON and exit
    #[arg(long)]
    dump_json: bool,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting wardgraph v{}", env!("CARGO_PKG_VERSION"));
    info!("Graph file: {:?}", args.data_file);
    info!("Path strategy: {}", args.path_strategy);

    let mut manager = GraphManager::open(ManagerConfig {
        data_file: args.data_file,
        path_strategy: args.path_strategy,
        seed_when_empty: !args.no_seed,
    })
    .context("opening hospital graph")?;

    if args.dump_json {
        let json = serde_json::to_string_pretty(manager.graph().locations())?;
        println!("{json}");
        return Ok(());
    }

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    console.run(&mut manager)?;

    info!("Shutting down...");
    manager.close()
}
