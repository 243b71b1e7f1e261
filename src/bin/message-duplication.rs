//! Count duplicate copies produced by flooding one message.
//!
//! ```bash
//! message-duplication --nodes 10 --degree 4 --seed 42 --show-adjacency
//! ```

use clap::Parser;
use gossip_sim::experiments::DuplicationConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "message-duplication")]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of nodes
    #[arg(short = 'n', long, default_value = "10")]
    nodes: usize,

    /// Degree of every node
    #[arg(short = 'k', long, default_value = "4")]
    degree: usize,

    /// Node the message starts from
    #[arg(long, default_value = "0")]
    origin: usize,

    /// Random seed for reproducible results. When omitted, a random seed is used.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the adjacency matrix
    #[arg(long)]
    show_adjacency: bool,
}

fn main() -> Result<(), gossip_sim::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,gossip_sim=info")),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(nodes = args.nodes, degree = args.degree, seed, "Starting duplication experiment");

    let report = DuplicationConfig::new(args.nodes, args.degree)
        .with_origin(args.origin)
        .with_seed(seed)
        .run()?;
    report.print_summary(args.show_adjacency);
    Ok(())
}
