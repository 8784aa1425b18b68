//! openstack CLI wrapper
//!
//! Wraps the python-openstackclient `openstack` command. Credentials are
//! passed through `OS_*` environment variables, never on the command line.
//! `OS_*` variables inherited from the calling shell are cleared first, so
//! the child only sees the configured profile.

use crate::error::{OpenStackError, Result};
use serde::{Deserialize, Serialize};
use std::process::Stdio;
use tokio::process::Command;

/// stderr fragments the client prints when Keystone rejects the credentials
const AUTH_FAILURE_MARKERS: &[&str] = &[
    "requires authentication",
    "HTTP 401",
    "Unauthorized",
];

/// Keystone v3 credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenStackAuth {
    pub auth_url: String,
    pub username: String,
    pub password: String,
    pub project_name: Option<String>,
    pub domain_name: String,
    /// Exported only when configured; the cloud's own default applies otherwise
    pub region_name: Option<String>,
}

impl OpenStackAuth {
    /// `OS_*` variables understood by the openstack client
    fn env_vars(&self) -> Vec<(&'static str, &str)> {
        let mut vars = vec![
            ("OS_AUTH_URL", self.auth_url.as_str()),
            ("OS_USERNAME", self.username.as_str()),
            ("OS_PASSWORD", self.password.as_str()),
            ("OS_USER_DOMAIN_NAME", self.domain_name.as_str()),
            ("OS_PROJECT_DOMAIN_NAME", self.domain_name.as_str()),
            ("OS_IDENTITY_API_VERSION", "3"),
        ];
        if let Some(project) = &self.project_name {
            vars.push(("OS_PROJECT_NAME", project.as_str()));
        }
        if let Some(region) = &self.region_name {
            vars.push(("OS_REGION_NAME", region.as_str()));
        }
        vars
    }
}

/// openstack CLI wrapper
#[derive(Debug, Clone)]
pub struct OpenStackCli {
    program: String,
    auth: OpenStackAuth,
}

impl OpenStackCli {
    pub fn new(program: impl Into<String>, auth: OpenStackAuth) -> Self {
        Self {
            program: program.into(),
            auth,
        }
    }

    pub fn auth(&self) -> &OpenStackAuth {
        &self.auth
    }

    /// Run an openstack command and return stdout
    async fn run_command(&self, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        for (key, _) in std::env::vars_os() {
            if key.to_string_lossy().starts_with("OS_") {
                cmd.env_remove(&key);
            }
        }
        cmd.envs(self.auth.env_vars());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!("Running: {} {}", self.program, args.join(" "));

        let output = cmd.output().await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => OpenStackError::CliNotFound,
            _ => OpenStackError::IoError(e),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if AUTH_FAILURE_MARKERS.iter().any(|m| stderr.contains(m)) {
                return Err(OpenStackError::AuthenticationFailed(stderr));
            }
            return Err(OpenStackError::CommandFailed(stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// List all key pairs of the authenticated user
    pub async fn list_keypairs(&self) -> Result<Vec<KeypairInfo>> {
        let output = self
            .run_command(&["keypair", "list", "--format", "json"])
            .await?;
        parse_keypairs(&output)
    }
}

/// Key pair as printed by `openstack keypair list -f json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeypairInfo {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Fingerprint", default)]
    pub fingerprint: Option<String>,

    #[serde(rename = "Type", default)]
    pub key_type: Option<String>,
}

fn parse_keypairs(output: &str) -> Result<Vec<KeypairInfo>> {
    if output.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(output)?)
}
