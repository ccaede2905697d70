use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::base::{CloudProvider, Error, GeneratorConfig, Ip, NodeConfig, NodeId, Result};

use super::deploy_script::{self, DeployTarget};
use super::terraform::ProvisioningOutput;

/// A node config together with where it is written locally and how the
/// deploy script reaches its host.
#[derive(Clone, Debug, PartialEq)]
pub struct NodePlan {
    pub config: NodeConfig,
    pub ip: Ip,
    pub ssh_user: String,
    pub config_file: PathBuf,
}

impl NodePlan {
    pub fn node_id(&self) -> &NodeId {
        &self.config.node_id
    }

    pub fn deploy_target(&self) -> DeployTarget {
        DeployTarget {
            node_id: self.config.node_id.clone(),
            ip: self.ip.clone(),
            ssh_user: self.ssh_user.clone(),
            config_file: self.config_file.clone(),
        }
    }
}

pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Derives one node config per discovered address, aws nodes first,
    /// each provider numbered from 1 in discovery order. Touches nothing
    /// on disk.
    pub fn plan(&self, outputs: &ProvisioningOutput) -> Vec<NodePlan> {
        let all_ips = outputs.all_addresses();

        let discovered = all_ips.len() as u64;
        if discovered != u64::from(self.config.bootstrap_expect) {
            warn!(
                "discovered {} nodes but bootstrap_expect is {}, the cluster waits for {} nodes before electing a leader",
                discovered, self.config.bootstrap_expect, self.config.bootstrap_expect
            );
        }

        let mut plans = Vec::with_capacity(all_ips.len());
        for provider in CloudProvider::ALL {
            for (i, ip) in outputs.addresses(provider).iter().enumerate() {
                let node_id = provider.node_id(i + 1);
                let config_file = self.config.config_dir.join(format!("{}.json", node_id));
                let config = self.node_config(node_id, ip, provider, &all_ips);

                debug!(
                    "planned {} at {} with {} peers",
                    config.node_id,
                    config.bind_address,
                    config.peers.len()
                );
                plans.push(NodePlan {
                    config,
                    ip: ip.clone(),
                    ssh_user: self.config.ssh_user(provider).to_string(),
                    config_file,
                });
            }
        }

        plans
    }

    fn node_config(
        &self,
        node_id: NodeId,
        ip: &str,
        provider: CloudProvider,
        all_ips: &[&str],
    ) -> NodeConfig {
        let port = self.config.app_port;
        let address = format!("{}:{}", ip, port);
        let peers = all_ips
            .iter()
            .filter(|peer| **peer != ip)
            .map(|peer| format!("{}:{}", peer, port))
            .collect();

        NodeConfig {
            node_id,
            bind_address: address.clone(),
            advertise_address: address,
            cloud_provider: provider,
            region: provider.region().to_string(),
            data_dir: self.config.data_dir.clone(),
            bootstrap_expect: self.config.bootstrap_expect,
            peers,
            raft: self.config.raft.clone(),
            grpc: self.config.grpc.clone(),
        }
    }

    /// Writes every planned config, creating the config directory first.
    /// Files written before a failure are left in place.
    pub fn write_configs(&self, plans: &[NodePlan]) -> Result<Vec<PathBuf>> {
        let dir = &self.config.config_dir;
        fs::create_dir_all(dir).map_err(Error::path_error("create", dir))?;

        let mut written = Vec::with_capacity(plans.len());
        for plan in plans {
            let json = plan.config.to_json()?;
            fs::write(&plan.config_file, json)
                .map_err(Error::path_error("write", &plan.config_file))?;

            println!("✅ Generated {}", plan.config_file.display());
            written.push(plan.config_file.clone());
        }

        info!("wrote {} node configs to {}", written.len(), dir.display());
        Ok(written)
    }

    /// Plan, write configs, then write the deploy script.
    pub fn run(&self, outputs: &ProvisioningOutput, script_path: &Path) -> Result<Vec<NodePlan>> {
        let plans = self.plan(outputs);
        self.write_configs(&plans)?;

        let targets: Vec<DeployTarget> = plans.iter().map(NodePlan::deploy_target).collect();
        deploy_script::write(script_path, &targets)?;

        Ok(plans)
    }
}
