use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use log::error;

use raft_node_config::base::{setup_logger, REMOTE_CONFIG_PATH};
use raft_node_config::core::check;

#[derive(Parser, Debug)]
#[command(author, version, about = "Check generated raft node configs", long_about = None)]
struct Args {
    // node config files, repeat for several
    #[arg(short, long, default_value = REMOTE_CONFIG_PATH)]
    config: Vec<PathBuf>,

    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    setup_logger(args.log_file.as_deref()).map_err(|e| anyhow!("setup logger: {}", e))?;

    let mut failed = 0;
    for path in &args.config {
        let report = match check(path) {
            Ok(report) => report,
            Err(e) => {
                error!("{}: {}", path.display(), e);
                println!("❌ {}: {}", path.display(), e);
                failed += 1;
                continue;
            }
        };

        let node = &report.node;
        let cluster = &report.cluster;
        println!("✅ {}", path.display());
        println!("  Node ID: {}", node.node_id);
        println!("  Cloud: {}/{}", node.cloud_provider, node.region);
        println!("  Bind Address: {}", node.bind_address);
        println!(
            "  Peers: {} (bootstrap_expect {})",
            cluster.peers.len(),
            cluster.bootstrap_expect
        );
        println!(
            "  Raft: heartbeat {:?}, election {:?}, commit {:?}, snapshot every {:?} or {} entries",
            cluster.heartbeat_timeout,
            cluster.election_timeout,
            cluster.commit_timeout,
            cluster.snapshot_interval,
            cluster.snapshot_threshold
        );
        for warning in &report.warnings {
            println!("  warning: {}", warning);
        }
    }

    if failed > 0 {
        return Err(anyhow!(
            "{} of {} node configs failed the check",
            failed,
            args.config.len()
        ));
    }

    Ok(())
}
