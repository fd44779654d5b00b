//! Kubectl wrapper utilities

use crate::config::settings::ClusterSettings;
use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Anything that can list a resource type across all namespaces as JSON
pub trait ClusterSource {
    /// Return the raw JSON printed by `get <resource> -A -o json`
    fn get_json(&self, resource: &str) -> Result<String>;
}

/// The `items` envelope kubectl prints for list queries
#[derive(Debug, Deserialize)]
pub struct ResourceList<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Shells out to kubectl (or a compatible CLI such as oc)
#[derive(Debug, Clone)]
pub struct Kubectl {
    binary: String,
    kubeconfig: Option<PathBuf>,
    context: Option<String>,
}

impl Kubectl {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            kubeconfig: None,
            context: None,
        }
    }

    pub fn from_settings(settings: &ClusterSettings) -> Self {
        Self {
            binary: settings.binary.clone(),
            kubeconfig: settings.kubeconfig.as_ref().map(PathBuf::from),
            context: settings.context.clone(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.binary);

        if let Some(kc) = &self.kubeconfig {
            cmd.env("KUBECONFIG", kc);
        }

        if let Some(context) = &self.context {
            cmd.args(["--context", context]);
        }

        cmd.args(args);
        cmd
    }

    /// Run the CLI and capture stdout
    pub fn run_output(&self, args: &[&str]) -> Result<String> {
        tracing::debug!("Running: {} {}", self.binary, args.join(" "));

        let output = self
            .command(args)
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("Failed to run '{}'", self.binary))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "{} command failed: {}\n{}",
                self.binary,
                args.join(" "),
                stderr.trim()
            ));
        }

        Ok(String::from_utf8(output.stdout)?)
    }

    /// Check whether the API server answers
    pub fn cluster_reachable(&self) -> bool {
        self.command(&["cluster-info"])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }
}

impl ClusterSource for Kubectl {
    fn get_json(&self, resource: &str) -> Result<String> {
        self.run_output(&list_args(resource))
    }
}

/// Arguments for an all-namespaces JSON listing
pub fn list_args(resource: &str) -> [&str; 5] {
    ["get", resource, "-A", "-o", "json"]
}
