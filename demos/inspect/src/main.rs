//! Load a quorum set from a JSON file and print what the algebra says about
//! it.
//!
//! ```text
//! fbas-inspect qset.json --agree sdf-1,sdf-2,lobstr-1 --excluded sdf-1
//! ```

mod logging;

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use fbas::find_closest_v_blocking;
use fbas::is_quorum_slice;
use fbas::is_v_blocking;
use fbas::node_weight;
use fbas::normalize;
use fbas::quorum::check_quorum_set_sanity;
use fbas::NodeId;
use fbas::QuorumSet;

use crate::logging::init_logging;

#[derive(Clone, Debug, Parser)]
#[clap(name = "fbas-inspect", version)]
struct Args {
    /// Path to a quorum set in JSON, e.g. `{"t":2,"v":["a","b","c"]}`.
    quorum_set: PathBuf,

    /// Also require every threshold to be a simple majority.
    #[clap(long)]
    extra_checks: bool,

    /// Comma separated ids of the nodes that agree.
    #[clap(long, value_delimiter = ',')]
    agree: Vec<NodeId>,

    /// The node left out of the closest v-blocking set, usually the local
    /// node.
    #[clap(long)]
    excluded: Option<NodeId>,

    #[clap(long, default_value = "_log")]
    log_dir: String,

    #[clap(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let _g = init_logging("fbas-inspect", &args.log_dir, &args.log_level)?;
    tracing::info!("args: {:?}", args);

    let json = fs::read_to_string(&args.quorum_set)
        .with_context(|| format!("read {}", args.quorum_set.display()))?;
    let quorum_set: QuorumSet = serde_json::from_str(&json)
        .with_context(|| format!("parse {}", args.quorum_set.display()))?;

    println!("quorum set: {}", quorum_set);

    match check_quorum_set_sanity(&quorum_set, args.extra_checks) {
        Ok(()) => println!("sane:       yes"),
        Err(e) => println!("sane:       no, {}", e),
    }

    let normalized = normalize(&quorum_set);
    println!("normalized: {}", normalized);
    println!("hash:       {}", quorum_set.content_hash()?);

    let all_nodes = quorum_set.all_nodes();

    println!("weights:");
    for node_id in all_nodes.iter() {
        let weight = node_weight(node_id, &quorum_set);
        let percent = weight as f64 / u64::MAX as f64 * 100.0;
        println!("  {:<24} {:>20} {:>7.3}%", node_id, weight, percent);
    }

    if args.agree.is_empty() {
        return Ok(());
    }

    let agreeing: BTreeSet<NodeId> = args.agree.iter().cloned().collect();
    let unknown: Vec<&NodeId> =
        agreeing.iter().filter(|n| !all_nodes.contains(*n)).collect();
    if !unknown.is_empty() {
        tracing::warn!("not in the quorum set: {:?}", unknown);
    }

    let closest = find_closest_v_blocking(
        &quorum_set,
        &agreeing,
        args.excluded.as_ref(),
    );

    println!("agreeing:   {:?}", agreeing);
    println!("slice:      {}", is_quorum_slice(&quorum_set, &agreeing));
    println!("v-blocking: {}", is_v_blocking(&quorum_set, &agreeing));
    println!("closest v-blocking among agreeing: {:?}", closest);

    Ok(())
}
