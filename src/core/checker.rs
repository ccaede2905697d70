use std::path::Path;

use log::warn;

use crate::base::{ClusterConfig, NodeConfig, Result};

#[derive(Debug)]
pub struct CheckReport {
    pub node: NodeConfig,
    pub cluster: ClusterConfig,
    // suspicious but loadable
    pub warnings: Vec<String>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Loads a node config the way a node does at startup: required fields
/// present, raft durations parseable.
pub fn check(path: &Path) -> Result<CheckReport> {
    let node = NodeConfig::load(path)?;
    let cluster = node.to_cluster_config()?;
    let warnings = lint(&node);

    for warning in &warnings {
        warn!("{}: {}", path.display(), warning);
    }

    Ok(CheckReport {
        node,
        cluster,
        warnings,
    })
}

fn lint(node: &NodeConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if node.peers.contains(&node.bind_address) {
        warnings.push(format!(
            "peers contain the node's own address {}",
            node.bind_address
        ));
    }

    let cluster_size = node.peers.len() + 1;
    if cluster_size as u64 != u64::from(node.bootstrap_expect) {
        warnings.push(format!(
            "bootstrap_expect is {} but the peer list describes {} nodes",
            node.bootstrap_expect, cluster_size
        ));
    }

    warnings
}
