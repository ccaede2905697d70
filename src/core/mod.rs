mod checker;
mod deploy_script;
mod generator;
mod terraform;

pub use checker::{check, CheckReport};
pub use deploy_script::{render as render_deploy_script, write as write_deploy_script, DeployTarget};
pub use generator::{Generator, NodePlan};
pub use terraform::ProvisioningOutput;
