//! Compliance classification
//!
//! A live pod is compliant when both required labels are present and not the
//! `UNKNOWN` sentinel. Every failing policy-report result becomes a blocked,
//! non-compliant entry.

use crate::config::Settings;
use crate::config::settings::{LabelSettings, NamespaceSettings};
use crate::inventory::record::{
    BLOCKED, ComplianceStatus, DISCOVERY_DATE_FORMAT, FAILED_ADMISSION, InventoryRecord,
    REASON_COMPLIANT, REASON_MISSING_LABELS, UNKNOWN,
};
use crate::k8s::policy_reports::{PolicyReport, PolicyReportResult, PolicyResult};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use k8s_openapi::api::core::v1::Pod;
use regex::Regex;

const DEFAULT_NAMESPACE: &str = "default";
const UNKNOWN_PHASE: &str = "Unknown";

/// The compliance rule for a pair of label values
pub fn is_compliant(owner: &str, system_id: &str) -> bool {
    owner != UNKNOWN && system_id != UNKNOWN
}

/// Turns cluster objects into inventory records for a single run
#[derive(Debug)]
pub struct Classifier {
    labels: LabelSettings,
    namespaces: NamespaceSettings,
    filter: Option<Regex>,
    discovery_date: String,
}

impl Classifier {
    pub fn new(settings: &Settings, discovered_at: DateTime<Local>) -> Result<Self> {
        let filter = settings
            .namespaces
            .filter
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern)
                    .with_context(|| format!("Invalid namespace filter regex: {}", pattern))
            })
            .transpose()?;

        Ok(Self {
            labels: settings.labels.clone(),
            namespaces: settings.namespaces.clone(),
            filter,
            discovery_date: discovered_at.format(DISCOVERY_DATE_FORMAT).to_string(),
        })
    }

    fn passes_filter(&self, namespace: &str) -> bool {
        self.filter
            .as_ref()
            .map_or(true, |re| re.is_match(namespace))
    }

    /// Classify a live pod; `None` when its namespace is out of scope
    pub fn classify_pod(&self, pod: &Pod) -> Option<InventoryRecord> {
        let meta = &pod.metadata;
        let namespace = meta.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE);

        if self.namespaces.is_ignored(namespace) || !self.passes_filter(namespace) {
            return None;
        }

        let Some(name) = meta.name.as_deref() else {
            crate::log_warn!("Skipping unnamed pod in namespace {}", namespace);
            return None;
        };

        let label = |key: &str| {
            meta.labels
                .as_ref()
                .and_then(|labels| labels.get(key))
                .cloned()
                .unwrap_or_else(|| UNKNOWN.to_string())
        };
        let owner = label(self.labels.owner.as_str());
        let system_id = label(self.labels.system_id.as_str());

        let compliant = is_compliant(&owner, &system_id);
        let (compliance_status, reason) = if compliant {
            (ComplianceStatus::Compliant, REASON_COMPLIANT)
        } else {
            (ComplianceStatus::NonCompliant, REASON_MISSING_LABELS)
        };

        let status = pod
            .status
            .as_ref()
            .and_then(|s| s.phase.clone())
            .unwrap_or_else(|| UNKNOWN_PHASE.to_string());

        tracing::trace!("{}/{} -> {}", namespace, name, compliance_status);

        Some(InventoryRecord {
            asset_name: name.to_string(),
            namespace: namespace.to_string(),
            owner,
            system_id,
            status,
            compliance_status,
            reason: reason.to_string(),
            discovery_date: self.discovery_date.clone(),
        })
    }

    /// Record a failing policy result as a blocked asset
    pub fn classify_violation(
        &self,
        report: &PolicyReport,
        result: &PolicyReportResult,
    ) -> Option<InventoryRecord> {
        if result.result != PolicyResult::Fail {
            return None;
        }

        let Some(resource) = report.subject(result) else {
            crate::log_warn!(
                "Policy {} reported a failure without a resource, skipping",
                result.policy
            );
            return None;
        };

        if resource.name.is_empty() {
            crate::log_warn!(
                "Policy {} reported a failure for an unnamed resource, skipping",
                result.policy
            );
            return None;
        }

        let namespace = resource
            .namespace
            .as_deref()
            .or(report.metadata.namespace.as_deref())
            .unwrap_or(DEFAULT_NAMESPACE);

        if !self.passes_filter(namespace) {
            return None;
        }

        Some(InventoryRecord {
            asset_name: resource.name.clone(),
            namespace: namespace.to_string(),
            owner: BLOCKED.to_string(),
            system_id: BLOCKED.to_string(),
            status: FAILED_ADMISSION.to_string(),
            compliance_status: ComplianceStatus::NonCompliant,
            reason: format!("Policy Violation: {}", result.policy),
            discovery_date: self.discovery_date.clone(),
        })
    }

    /// Live pods first, in input order, followed by policy violations
    pub fn build_inventory(&self, pods: &[Pod], reports: &[PolicyReport]) -> Vec<InventoryRecord> {
        let mut inventory: Vec<InventoryRecord> =
            pods.iter().filter_map(|pod| self.classify_pod(pod)).collect();

        let live = inventory.len();
        inventory.extend(reports.iter().flat_map(|report| {
            report
                .failures()
                .filter_map(move |result| self.classify_violation(report, result))
        }));

        crate::log_info!(
            "Classified {} live assets and {} policy violations",
            live,
            inventory.len() - live
        );
        inventory
    }
}
