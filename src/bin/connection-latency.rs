//! Measure delivery latency over links with random delays.
//!
//! ```bash
//! connection-latency --nodes 100 --degree 4 --messages 10000 --max-weight 100
//! ```

use clap::Parser;
use gossip_sim::experiments::LatencyConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "connection-latency")]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of nodes
    #[arg(short = 'n', long, default_value = "100")]
    nodes: usize,

    /// Degree of every node
    #[arg(short = 'k', long, default_value = "4")]
    degree: usize,

    /// Number of messages to publish, each from a random node
    #[arg(short = 'm', long, default_value = "10000")]
    messages: usize,

    /// Link delays are drawn uniformly from 1..=max-weight
    #[arg(long, default_value = "100")]
    max_weight: i64,

    /// Random seed for reproducible results. When omitted, a random seed is used.
    #[arg(long)]
    seed: Option<u64>,
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
    info!(
        nodes = args.nodes,
        degree = args.degree,
        messages = args.messages,
        seed,
        "Starting latency experiment"
    );

    let report = LatencyConfig::new(args.nodes, args.degree)
        .with_messages(args.messages)
        .with_max_weight(args.max_weight)
        .with_seed(seed)
        .run()?;
    report.print_summary();
    Ok(())
}
