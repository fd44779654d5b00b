//! Collect command: fetch from the cluster, classify, write all reports

use crate::commands::render::{print_summary, write_reports};
use crate::config::Settings;
use crate::inventory::record::DISCOVERY_DATE_FORMAT;
use crate::inventory::{Classifier, ComplianceSummary, InventoryRecord};
use crate::k8s::{ClusterSource, Kubectl, pods, policy_reports};
use crate::utils::{InventoryError, progress};
use anyhow::Result;
use chrono::Local;

/// Options for a collection run
#[derive(Debug, Clone, Default)]
pub struct CollectOptions {
    /// Settings with command-line overrides already applied
    pub settings: Settings,
    /// Fail the run when the score ends up below this percentage
    pub min_score: Option<f64>,
    pub dry_run: bool,
}

/// Run a collection against the configured cluster CLI
pub fn collect(options: CollectOptions) -> Result<ComplianceSummary> {
    let kubectl = Kubectl::from_settings(&options.settings.cluster);
    crate::log_info!("Collecting asset inventory using {}", kubectl.binary());

    let summary = collect_from(&kubectl, &options)?;
    log_report_paths(&options);
    Ok(summary)
}

/// Collection against any cluster source
pub fn collect_from(
    source: &dyn ClusterSource,
    options: &CollectOptions,
) -> Result<ComplianceSummary> {
    let settings = &options.settings;
    let discovered_at = Local::now();
    let classifier = Classifier::new(settings, discovered_at)?;

    let inventory = gather(source, settings, &classifier)?;

    write_reports(
        &inventory,
        &settings.output,
        &discovered_at.format(DISCOVERY_DATE_FORMAT).to_string(),
        true,
        options.dry_run,
    )?;

    let summary = ComplianceSummary::from_records(&inventory);
    print_summary(&inventory, &summary);

    if let Some(minimum) = options.min_score {
        if !summary.meets(minimum) {
            return Err(InventoryError::score_below_threshold(summary.score, minimum).into());
        }
    }

    Ok(summary)
}

/// Fetch pods (fatal on failure) and policy reports (best effort)
fn gather(
    source: &dyn ClusterSource,
    settings: &Settings,
    classifier: &Classifier,
) -> Result<Vec<InventoryRecord>> {
    let pods = progress::with_spinner_result("Listing pods...", "Listed pods", || {
        pods::fetch_pods(source)
    })?;

    let reports = if settings.policy_reports.enabled {
        progress::with_spinner("Listing policy reports...", || {
            policy_reports::fetch_policy_reports(source)
        })
    } else {
        crate::log_info!("Policy report collection disabled");
        Vec::new()
    };

    Ok(classifier.build_inventory(&pods, &reports))
}

fn log_report_paths(options: &CollectOptions) {
    if options.dry_run {
        return;
    }
    let paths = options.settings.output.paths();
    crate::log_info!(
        "Reports: {}, {}, {}",
        paths.json.display(),
        paths.markdown.display(),
        paths.html.display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::k8s::kubectl::testing::FixtureSource;
    use crate::k8s::pods::fixtures::POD_LIST;
    use crate::k8s::policy_reports::fixtures::POLICY_REPORTS;
    use crate::report::json::load_inventory;

    fn options_in(dir: &std::path::Path) -> CollectOptions {
        let mut settings = Settings::default();
        settings.output.dir = dir.to_string_lossy().into_owned();
        CollectOptions {
            settings,
            min_score: None,
            dry_run: false,
        }
    }

    #[test]
    fn test_collect_writes_all_reports() {
        let dir = tempfile::tempdir().unwrap();
        let source = FixtureSource::default()
            .with("pods", POD_LIST)
            .with("policyreports", POLICY_REPORTS);

        let summary = collect_from(&source, &options_in(dir.path())).unwrap();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.compliant, 1);
        assert_eq!(summary.non_compliant, 2);

        let records = load_inventory(&dir.path().join("asset_inventory.json")).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].reason, "Policy Violation: require-nist-labels");

        let md = std::fs::read_to_string(dir.path().join("github_summary.md")).unwrap();
        assert!(md.contains("| rogue-pod | Failed Admission | ❌ NON-COMPLIANT |"));

        let html = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert!(html.contains("33.3% Score"));
    }

    #[test]
    fn test_missing_policy_reports_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let source = FixtureSource::default().with("pods", POD_LIST);

        let summary = collect_from(&source, &options_in(dir.path())).unwrap();
        assert_eq!(summary.total, 2);
    }

    #[test]
    fn test_policy_reports_can_be_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let source = FixtureSource::default()
            .with("pods", POD_LIST)
            .with("policyreports", POLICY_REPORTS);
        let mut options = options_in(dir.path());
        options.settings.policy_reports.enabled = false;

        assert_eq!(collect_from(&source, &options).unwrap().total, 2);
    }

    #[test]
    fn test_pod_fetch_failure_aborts_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let source = FixtureSource::default().with("policyreports", POLICY_REPORTS);

        assert!(collect_from(&source, &options_in(dir.path())).is_err());
        assert!(!dir.path().join("asset_inventory.json").exists());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let source = FixtureSource::default().with("pods", POD_LIST);
        let mut options = options_in(dir.path());
        options.dry_run = true;

        collect_from(&source, &options).unwrap();
        assert!(!dir.path().join("asset_inventory.json").exists());
        assert!(!dir.path().join("index.html").exists());
    }

    #[test]
    fn test_min_score_gate() {
        let dir = tempfile::tempdir().unwrap();
        let source = FixtureSource::default().with("pods", POD_LIST);
        let mut options = options_in(dir.path());
        options.min_score = Some(90.0);

        let err = collect_from(&source, &options).unwrap_err();
        let gate = err.downcast_ref::<InventoryError>().unwrap();
        assert!(gate.message.contains("50.0%"));
        // Reports are still written so the failures can be inspected
        assert!(dir.path().join("github_summary.md").exists());
    }
}
