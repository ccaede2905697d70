use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use anyhow::Result;
use raft_node_config::base::{CloudProvider, GeneratorConfig};
use raft_node_config::core::{check, Generator, ProvisioningOutput};

const OUTPUTS: &str = r#"{
  "aws_instance_public_ips": {
    "sensitive": false,
    "type": ["tuple", ["string", "string", "string"]],
    "value": ["3.80.1.10", "3.80.1.11", "3.80.1.12"]
  },
  "gcp_instance_public_ips": {
    "sensitive": false,
    "type": ["tuple", ["string", "string"]],
    "value": ["34.70.2.20", "34.70.2.21"]
  }
}"#;

fn generator(root: &Path) -> Generator {
    Generator::new(GeneratorConfig {
        config_dir: root.join("config").join("nodes"),
        ..GeneratorConfig::default()
    })
}

#[test]
fn test_generate_from_outputs_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let outputs_file = dir.path().join("outputs.json");
    fs::write(&outputs_file, OUTPUTS)?;

    let outputs = ProvisioningOutput::from_file(&outputs_file)?;
    let script_path = dir.path().join("scripts").join("deploy_configs.sh");
    let plans = generator(dir.path()).run(&outputs, &script_path)?;

    let ids: Vec<&str> = plans.iter().map(|p| p.node_id().as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "aws-node-1",
            "aws-node-2",
            "aws-node-3",
            "gcp-node-1",
            "gcp-node-2"
        ]
    );

    let mut files: Vec<String> = fs::read_dir(dir.path().join("config").join("nodes"))?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<Result<_, _>>()?;
    files.sort();
    assert_eq!(
        files,
        vec![
            "aws-node-1.json",
            "aws-node-2.json",
            "aws-node-3.json",
            "gcp-node-1.json",
            "gcp-node-2.json"
        ]
    );

    // every generated file passes the node side checks with a clean report
    for plan in &plans {
        let report = check(&plan.config_file)?;
        assert!(report.is_clean(), "{:?}", report.warnings);
        assert_eq!(report.node, plan.config);
        assert_eq!(report.cluster.peers.len(), 4);
    }

    // the script copies the files in generation order
    let script = fs::read_to_string(&script_path)?;
    let copied: Vec<String> = script
        .lines()
        .filter(|l| l.ends_with(":/tmp/node_config.json"))
        .map(|l| l.trim().to_string())
        .collect();
    let expected: Vec<String> = plans
        .iter()
        .map(|p| {
            format!(
                "{} {}@{}:/tmp/node_config.json",
                p.config_file.display(),
                p.ssh_user,
                p.ip
            )
        })
        .collect();
    assert_eq!(copied, expected);
    assert_eq!(
        script.matches("'sudo mv /tmp/node_config.json /etc/raft/config.json'").count(),
        5
    );

    Ok(())
}

#[test]
fn test_rerun_is_byte_identical() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let outputs = ProvisioningOutput::parse(OUTPUTS)?;
    let script_path = dir.path().join("deploy_configs.sh");
    let generator = generator(dir.path());

    let plans = generator.run(&outputs, &script_path)?;
    let first: Vec<Vec<u8>> = plans
        .iter()
        .map(|p| fs::read(&p.config_file))
        .collect::<Result<_, _>>()?;
    let first_script = fs::read(&script_path)?;

    generator.run(&outputs, &script_path)?;
    let second: Vec<Vec<u8>> = plans
        .iter()
        .map(|p| fs::read(&p.config_file))
        .collect::<Result<_, _>>()?;

    assert_eq!(first, second);
    assert_eq!(first_script, fs::read(&script_path)?);

    Ok(())
}

#[test]
fn test_empty_provider_generates_nothing_for_it() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let outputs = ProvisioningOutput::parse(
        r#"{
            "aws_instance_public_ips": {"value": ["3.80.1.10", "3.80.1.11"]},
            "gcp_instance_public_ips": {"value": []}
        }"#,
    )?;
    let script_path = dir.path().join("deploy_configs.sh");
    let plans = generator(dir.path()).run(&outputs, &script_path)?;

    assert_eq!(plans.len(), 2);
    assert!(plans
        .iter()
        .all(|p| p.config.cloud_provider == CloudProvider::Aws));
    assert!(!dir
        .path()
        .join("config/nodes/gcp-node-1.json")
        .exists());

    let script = fs::read_to_string(&script_path)?;
    assert_eq!(script.lines().filter(|l| l.starts_with("scp ")).count(), 2);

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_failed_query_writes_nothing() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let terraform_dir = dir.path().join("terraform");
    fs::create_dir(&terraform_dir)?;

    // `false` exits non-zero like a terraform without state
    let result = ProvisioningOutput::query("false", &terraform_dir);
    assert!(result.is_err());

    let mut entries = fs::read_dir(dir.path())?;
    let only = entries.next().transpose()?.map(|e| e.file_name());
    assert_eq!(only.as_deref(), Some(OsStr::new("terraform")));
    assert!(entries.next().is_none());
    assert!(fs::read_dir(&terraform_dir)?.next().is_none());

    Ok(())
}
