use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use super::{CloudProvider, NodeId, Port};

pub const DEFAULT_APP_PORT: Port = 8080;
pub const DEFAULT_DATA_DIR: &str = "/var/lib/raft";
pub const DEFAULT_BOOTSTRAP_EXPECT: u32 = 5;
pub const DEFAULT_CONFIG_DIR: &str = "config/nodes";
pub const DEFAULT_SCRIPT_PATH: &str = "scripts/deploy_configs.sh";
pub const DEFAULT_TERRAFORM_DIR: &str = "terraform";
pub const DEFAULT_TERRAFORM_BIN: &str = "terraform";

// where the consensus node reads its config on the remote host
pub const REMOTE_STAGING_PATH: &str = "/tmp/node_config.json";
pub const REMOTE_CONFIG_PATH: &str = "/etc/raft/config.json";

/// Raft timing block of a node config. Durations stay in their string
/// form (`"500ms"`, `"3s"`) since that is what the node parses.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RaftSettings {
    pub heartbeat_timeout: String,
    pub election_timeout: String,
    pub commit_timeout: String,
    pub snapshot_interval: String,
    pub snapshot_threshold: u64,
}

impl Default for RaftSettings {
    fn default() -> Self {
        Self {
            heartbeat_timeout: "1s".to_string(),
            election_timeout: "3s".to_string(),
            commit_timeout: "500ms".to_string(),
            snapshot_interval: "120s".to_string(),
            snapshot_threshold: 8192,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GrpcSettings {
    pub port: Port,
    pub max_concurrent_streams: u32,
}

impl Default for GrpcSettings {
    fn default() -> Self {
        Self {
            port: 50051,
            max_concurrent_streams: 1000,
        }
    }
}

/// Everything the generator stamps into a node config besides the
/// addresses discovered from terraform.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    pub app_port: Port,
    pub data_dir: String,
    pub bootstrap_expect: u32,
    pub raft: RaftSettings,
    pub grpc: GrpcSettings,
    pub config_dir: PathBuf,
    // ssh login used by the deploy script, per provider
    pub ssh_users: BTreeMap<CloudProvider, String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let ssh_users = CloudProvider::ALL
            .iter()
            .map(|provider| (*provider, provider.default_ssh_user().to_string()))
            .collect();

        Self {
            app_port: DEFAULT_APP_PORT,
            data_dir: DEFAULT_DATA_DIR.to_string(),
            bootstrap_expect: DEFAULT_BOOTSTRAP_EXPECT,
            raft: RaftSettings::default(),
            grpc: GrpcSettings::default(),
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            ssh_users,
        }
    }
}

impl GeneratorConfig {
    pub fn ssh_user(&self, provider: CloudProvider) -> &str {
        self.ssh_users
            .get(&provider)
            .map(String::as_str)
            .unwrap_or_else(|| provider.default_ssh_user())
    }
}

/// Checked view of a node config, durations parsed.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterConfig {
    pub node_id: NodeId,
    pub bind_address: String,
    pub data_dir: String,
    pub bootstrap_expect: u32,
    pub peers: Vec<String>,
    pub heartbeat_timeout: Duration,
    pub election_timeout: Duration,
    pub commit_timeout: Duration,
    pub snapshot_interval: Duration,
    pub snapshot_threshold: u64,
}
