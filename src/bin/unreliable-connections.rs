//! Measure delivery guarantees when links drop messages.
//!
//! ```bash
//! # Independent loss
//! unreliable-connections --drop-rate 0.05
//!
//! # Bursty loss: mean 200 good packets, then 10 lost in a row
//! unreliable-connections --burst-good-len 200 --burst-bad-len 10
//! ```

use clap::Parser;
use gossip_sim::experiments::{Loss, UnreliableConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "unreliable-connections")]
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

    /// Probability that a link drops a copy (independent loss)
    #[arg(long, default_value = "0.05")]
    drop_rate: f64,

    /// Mean good-state length. Switches to bursty loss together with --burst-bad-len.
    #[arg(long, requires = "burst_bad_len")]
    burst_good_len: Option<f64>,

    /// Mean bad-state length for bursty loss
    #[arg(long, requires = "burst_good_len")]
    burst_bad_len: Option<f64>,

    /// Loss probability in the bad state
    #[arg(long, default_value = "1.0")]
    burst_bad_loss: f64,

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

    let loss = match (args.burst_good_len, args.burst_bad_len) {
        (Some(good_len), Some(bad_len)) => Loss::Bursty {
            good_len,
            bad_len,
            good_loss: 0.,
            bad_loss: args.burst_bad_loss,
        },
        _ => Loss::Independent {
            drop_rate: args.drop_rate,
        },
    };
    info!(
        nodes = args.nodes,
        degree = args.degree,
        messages = args.messages,
        seed,
        ?loss,
        "Starting unreliable connections experiment"
    );

    let report = UnreliableConfig::new(args.nodes, args.degree)
        .with_messages(args.messages)
        .with_loss(loss)
        .with_seed(seed)
        .run()?;
    report.print_summary();
    Ok(())
}
