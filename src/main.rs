use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use log::{error, info};

use raft_node_config::base::{
    setup_logger, CloudProvider, GeneratorConfig, DEFAULT_APP_PORT, DEFAULT_BOOTSTRAP_EXPECT,
    DEFAULT_CONFIG_DIR, DEFAULT_SCRIPT_PATH, DEFAULT_TERRAFORM_BIN, DEFAULT_TERRAFORM_DIR,
};
use raft_node_config::core::{Generator, ProvisioningOutput};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    // directory `terraform output -json` runs in
    #[arg(long, default_value = DEFAULT_TERRAFORM_DIR)]
    terraform_dir: PathBuf,

    #[arg(long, default_value = DEFAULT_TERRAFORM_BIN)]
    terraform_bin: String,

    // saved `terraform output -json` document, skips running terraform
    #[arg(long)]
    outputs_file: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_CONFIG_DIR)]
    config_dir: PathBuf,

    #[arg(long, default_value = DEFAULT_SCRIPT_PATH)]
    script_path: PathBuf,

    #[arg(long, default_value_t = DEFAULT_APP_PORT)]
    app_port: u16,

    #[arg(long, default_value_t = DEFAULT_BOOTSTRAP_EXPECT)]
    bootstrap_expect: u32,

    #[arg(long)]
    aws_ssh_user: Option<String>,

    #[arg(long)]
    gcp_ssh_user: Option<String>,

    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn generator_config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig {
            app_port: self.app_port,
            bootstrap_expect: self.bootstrap_expect,
            config_dir: self.config_dir.clone(),
            ..GeneratorConfig::default()
        };

        let overrides = [
            (CloudProvider::Aws, &self.aws_ssh_user),
            (CloudProvider::Gcp, &self.gcp_ssh_user),
        ];
        for (provider, user) in overrides {
            if let Some(user) = user {
                config.ssh_users.insert(provider, user.clone());
            }
        }

        config
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    setup_logger(args.log_file.as_deref()).map_err(|e| anyhow!("setup logger: {}", e))?;

    // everything is read before anything is written
    let outputs = match &args.outputs_file {
        Some(path) => ProvisioningOutput::from_file(path),
        None => ProvisioningOutput::query(&args.terraform_bin, &args.terraform_dir),
    };
    let outputs = match outputs {
        Ok(outputs) => outputs,
        Err(e) => {
            error!("Error reading Terraform outputs: {}", e);
            return Err(e.into());
        }
    };
    info!(
        "discovered {} aws and {} gcp instances",
        outputs.addresses(CloudProvider::Aws).len(),
        outputs.addresses(CloudProvider::Gcp).len()
    );

    let generator = Generator::new(args.generator_config());
    let plans = generator.run(&outputs, &args.script_path)?;
    info!("generated {} node configs", plans.len());

    println!(
        "\n✅ Generated deployment script: {}",
        args.script_path.display()
    );
    println!("\nRun: ./{}", args.script_path.display());

    Ok(())
}
