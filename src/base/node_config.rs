use std::fs;
use std::path::Path;

use super::duration::parse_duration;
use super::{
    ClusterConfig, CloudProvider, Error, GrpcSettings, NodeId, RaftSettings, Result,
};

/// The json file a consensus node reads at startup. Field order here is
/// the order written to disk.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NodeConfig {
    pub node_id: NodeId,
    pub bind_address: String,
    pub advertise_address: String,
    pub cloud_provider: CloudProvider,
    pub region: String,
    pub data_dir: String,
    pub bootstrap_expect: u32,
    pub peers: Vec<String>,
    pub raft: RaftSettings,
    pub grpc: GrpcSettings,
}

impl NodeConfig {
    /// Pretty json, two space indent, trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)
            .map_err(Error::json_error(format!("encode {}", self.node_id)))?;
        json.push('\n');
        Ok(json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::json_error("decode node config"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(Error::path_error("read", path))?;
        let config: NodeConfig = serde_json::from_str(&data)
            .map_err(Error::json_error(format!("parse {}", path.display())))?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.node_id.is_empty() {
            return Err(Error::config_error("node_id is required"));
        }
        if self.bind_address.is_empty() {
            return Err(Error::config_error("bind_address is required"));
        }
        if self.data_dir.is_empty() {
            return Err(Error::config_error("data_dir is required"));
        }
        Ok(())
    }

    pub fn to_cluster_config(&self) -> Result<ClusterConfig> {
        let parse = |name: &str, value: &str| {
            parse_duration(value)
                .map_err(|e| Error::config_error(format!("invalid {}: {}", name, e)))
        };

        Ok(ClusterConfig {
            node_id: self.node_id.clone(),
            bind_address: self.bind_address.clone(),
            data_dir: self.data_dir.clone(),
            bootstrap_expect: self.bootstrap_expect,
            peers: self.peers.clone(),
            heartbeat_timeout: parse("heartbeat_timeout", &self.raft.heartbeat_timeout)?,
            election_timeout: parse("election_timeout", &self.raft.election_timeout)?,
            commit_timeout: parse("commit_timeout", &self.raft.commit_timeout)?,
            snapshot_interval: parse("snapshot_interval", &self.raft.snapshot_interval)?,
            snapshot_threshold: self.raft.snapshot_threshold,
        })
    }
}
