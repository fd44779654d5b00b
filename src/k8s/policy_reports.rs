//! Policy report (wgpolicyk8s.io) listing
//!
//! Kyverno and other policy engines publish admission and background scan
//! results as `PolicyReport` objects. Only the fields needed to record
//! violations are modelled here.

use crate::k8s::kubectl::{ClusterSource, ResourceList};
use anyhow::{Context, Result};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicyReport {
    #[serde(default)]
    pub metadata: ObjectMeta,

    /// Set on per-resource reports, whose results then carry no `resources`
    #[serde(default)]
    pub scope: Option<ResourceRef>,

    #[serde(default)]
    pub results: Vec<PolicyReportResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PolicyReportResult {
    #[serde(default)]
    pub policy: String,

    #[serde(default)]
    pub rule: Option<String>,

    #[serde(default)]
    pub result: PolicyResult,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub resources: Vec<ResourceRef>,
}

/// Outcome of a single policy rule evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyResult {
    Pass,
    Fail,
    Warn,
    Error,
    Skip,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Object reference attached to a result
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRef {
    #[serde(default)]
    pub api_version: Option<String>,

    #[serde(default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub namespace: Option<String>,
}

impl PolicyReport {
    /// Results whose outcome is `fail`
    pub fn failures(&self) -> impl Iterator<Item = &PolicyReportResult> {
        self.results
            .iter()
            .filter(|r| r.result == PolicyResult::Fail)
    }

    /// The object a result is about: its first resource, else the report scope
    pub fn subject<'a>(&'a self, result: &'a PolicyReportResult) -> Option<&'a ResourceRef> {
        result.resources.first().or(self.scope.as_ref())
    }
}

/// Parse the output of `kubectl get policyreports -A -o json`
pub fn parse_policy_reports(json: &str) -> Result<Vec<PolicyReport>> {
    let list: ResourceList<PolicyReport> = serde_json::from_str(json)
        .context("Failed to parse 'policyreports' output from the cluster CLI")?;
    Ok(list.items)
}

/// Fetch policy reports. Failure is not fatal: the cluster may not run a
/// policy engine at all.
pub fn fetch_policy_reports(source: &dyn ClusterSource) -> Vec<PolicyReport> {
    match source
        .get_json("policyreports")
        .and_then(|json| parse_policy_reports(&json))
    {
        Ok(reports) => {
            crate::log_info!("Discovered {} policy reports", reports.len());
            reports
        }
        Err(e) => {
            tracing::debug!("Policy report fetch failed: {:#}", e);
            crate::log_warn!(
                "No PolicyReports found or Kyverno not reporting. Skipping advanced audit."
            );
            Vec::new()
        }
    }
}
