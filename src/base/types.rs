use std::fmt;

pub type NodeId = String;
pub type Port = u16;

// instance address as reported by terraform, without port
pub type Ip = String;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudProvider {
    Aws,
    Gcp,
}

impl CloudProvider {
    // generation order: every aws node first, then every gcp node
    pub const ALL: [CloudProvider; 2] = [CloudProvider::Aws, CloudProvider::Gcp];

    pub fn as_str(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "aws",
            CloudProvider::Gcp => "gcp",
        }
    }

    /// Name of the terraform output holding this provider's public ips.
    pub fn output_key(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "aws_instance_public_ips",
            CloudProvider::Gcp => "gcp_instance_public_ips",
        }
    }

    pub fn region(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "us-east-1",
            CloudProvider::Gcp => "us-central1",
        }
    }

    pub fn default_ssh_user(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "ec2-user",
            CloudProvider::Gcp => "YOUR_GCP_USER",
        }
    }

    /// `aws-node-1`, `gcp-node-3`, ...; `index` starts at 1.
    pub fn node_id(&self, index: usize) -> NodeId {
        format!("{}-node-{}", self.as_str(), index)
    }
}

impl fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
