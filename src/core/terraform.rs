use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::process::Command;

use log::{debug, info};
use serde_json::Value;

use crate::base::{CloudProvider, Error, Ip, Result};

// one entry of `terraform output -json`; `sensitive` and `type` are ignored
#[derive(serde::Deserialize)]
struct TerraformOutput {
    value: Vec<Ip>,
}

/// Public instance addresses per provider, in the order terraform lists them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProvisioningOutput {
    addresses: BTreeMap<CloudProvider, Vec<Ip>>,
}

impl ProvisioningOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_addresses(mut self, provider: CloudProvider, ips: Vec<Ip>) -> Self {
        self.addresses.insert(provider, ips);
        self
    }

    pub fn addresses(&self, provider: CloudProvider) -> &[Ip] {
        self.addresses
            .get(&provider)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every discovered address, aws first then gcp.
    pub fn all_addresses(&self) -> Vec<&str> {
        CloudProvider::ALL
            .iter()
            .flat_map(|provider| self.addresses(*provider))
            .map(String::as_str)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.addresses.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn parse(json: &str) -> Result<Self> {
        let outputs: BTreeMap<String, Value> =
            serde_json::from_str(json).map_err(Error::json_error("decode terraform outputs"))?;

        let mut result = Self::new();
        for provider in CloudProvider::ALL {
            let key = provider.output_key();
            let value = outputs
                .get(key)
                .ok_or_else(|| Error::config_error(format!("missing terraform output {}", key)))?;
            let output: TerraformOutput = serde_json::from_value(value.clone())
                .map_err(Error::json_error(format!("decode terraform output {}", key)))?;

            debug!("terraform output {}: {:?}", key, output.value);
            result.addresses.insert(provider, output.value);
        }

        Ok(result)
    }

    /// Reads a document saved earlier with `terraform output -json > file`.
    pub fn from_file(path: &Path) -> Result<Self> {
        info!("reading terraform outputs from {}", path.display());
        let json = fs::read_to_string(path).map_err(Error::path_error("read", path))?;
        Self::parse(&json)
    }

    /// Runs `<terraform_bin> output -json` inside `terraform_dir`, blocking
    /// until it exits.
    pub fn query(terraform_bin: &str, terraform_dir: &Path) -> Result<Self> {
        info!(
            "running {} output -json in {}",
            terraform_bin,
            terraform_dir.display()
        );

        let output = Command::new(terraform_bin)
            .args(["output", "-json"])
            .current_dir(terraform_dir)
            .output()
            .map_err(|e| {
                Error::terraform_error(format!("failed to run {}", terraform_bin), e.to_string())
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::terraform_error(
                format!("{} output -json exited with {}", terraform_bin, output.status),
                stderr.trim(),
            ));
        }

        Self::parse(&String::from_utf8_lossy(&output.stdout))
    }
}
