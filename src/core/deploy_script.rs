use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::base::{Error, Ip, NodeId, Result, REMOTE_CONFIG_PATH, REMOTE_STAGING_PATH};

// the key name is left to the shell so one script works for any key pair
const SSH_OPTIONS: &str = "-i ~/.ssh/${KEY_NAME}.pem -o StrictHostKeyChecking=no";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployTarget {
    pub node_id: NodeId,
    pub ip: Ip,
    pub ssh_user: String,
    pub config_file: PathBuf,
}

/// Renders the deploy script: for each target, in order, an scp to the
/// staging path followed by an ssh `sudo mv` into place. `set -e` stops
/// the script at the first failing host.
pub fn render(targets: &[DeployTarget]) -> String {
    let mut script = String::new();
    script.push_str("#!/bin/bash\n");
    script.push_str("# Deploy node configurations to instances\n\n");
    script.push_str("set -e\n\n");

    for target in targets {
        let host = format!("{}@{}", target.ssh_user, target.ip);

        // writing into a String cannot fail
        let _ = writeln!(
            script,
            "echo 'Deploying config to {} ({})...'",
            target.node_id, target.ip
        );
        let _ = writeln!(script, "scp {} \\", SSH_OPTIONS);
        let _ = writeln!(
            script,
            "    {} {}:{}",
            target.config_file.display(),
            host,
            REMOTE_STAGING_PATH
        );
        let _ = writeln!(script, "ssh {} \\", SSH_OPTIONS);
        let _ = writeln!(
            script,
            "    {} 'sudo mv {} {}'",
            host, REMOTE_STAGING_PATH, REMOTE_CONFIG_PATH
        );
        let _ = writeln!(script, "echo '✅ {} configured'\n", target.node_id);
    }

    script.push_str("echo '=== All nodes configured ==='\n");
    script
}

/// Writes the script, creating its directory, and marks it executable.
pub fn write(path: &Path, targets: &[DeployTarget]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(Error::path_error("create", parent))?;
    }

    fs::write(path, render(targets)).map_err(Error::path_error("write", path))?;
    set_executable(path)?;

    info!(
        "wrote deploy script {} for {} nodes",
        path.display(),
        targets.len()
    );
    Ok(())
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .map_err(Error::path_error("chmod", path))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}
