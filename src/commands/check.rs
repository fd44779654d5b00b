//! Check command: verify the cluster CLI and cluster access

use crate::config::Settings;
use crate::k8s::Kubectl;
use crate::utils::{CommonPrereqs, Prerequisite};
use colored::Colorize;

/// Result of a single check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
    Pass(String),
    Warn(String),
    Fail(String),
}

impl CheckResult {
    pub fn is_error(&self) -> bool {
        matches!(self, CheckResult::Fail(_))
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, CheckResult::Warn(_))
    }

    pub fn display(&self) {
        match self {
            CheckResult::Pass(msg) => {
                println!("  {} {}", "✓".green(), msg);
            }
            CheckResult::Warn(msg) => {
                println!("  {} {}", "⚠".yellow(), msg);
            }
            CheckResult::Fail(msg) => {
                println!("  {} {}", "✗".red(), msg);
            }
        }
    }
}

/// Run every check, print the results and return whether collection can run
pub fn check(settings: &Settings) -> bool {
    crate::log_info!("Checking prerequisites...");
    let results = run_checks(settings);
    display_results(&results)
}

/// Checks stop early once the CLI or the cluster is unavailable
pub fn run_checks(settings: &Settings) -> Vec<CheckResult> {
    let mut results = Vec::new();

    let cli = CommonPrereqs::cluster_cli(&settings.cluster.binary);
    let report = CommonPrereqs::check_all(&[&cli as &dyn Prerequisite]);
    if !report.all_found() {
        for (name, hint) in report.missing {
            results.push(CheckResult::Fail(format!("{} not found. {}", name, hint)));
        }
        return results;
    }
    results.push(CheckResult::Pass(format!("{} found", cli.name())));

    let kubectl = Kubectl::from_settings(&settings.cluster);
    if !kubectl.cluster_reachable() {
        results.push(CheckResult::Fail("Cannot connect to cluster".to_string()));
        return results;
    }
    results.push(CheckResult::Pass("Cluster is reachable".to_string()));

    if settings.policy_reports.enabled {
        results.push(check_policy_reports(&kubectl));
    }

    results
}

fn check_policy_reports(kubectl: &Kubectl) -> CheckResult {
    match kubectl.run_output(&["api-resources", "--api-group=wgpolicyk8s.io", "-o", "name"]) {
        Ok(resources) if has_policy_reports(&resources) => {
            CheckResult::Pass("PolicyReport API available".to_string())
        }
        Ok(_) => CheckResult::Warn(
            "PolicyReport API not installed; violations will not be collected".to_string(),
        ),
        Err(e) => CheckResult::Warn(format!("Could not query PolicyReport API: {}", e)),
    }
}

fn has_policy_reports(api_resources: &str) -> bool {
    api_resources
        .lines()
        .any(|line| line.trim().starts_with("policyreports."))
}

/// Display results and return whether collection should continue
pub fn display_results(results: &[CheckResult]) -> bool {
    println!();

    let errors = results.iter().filter(|c| c.is_error()).count();
    let warnings = results.iter().filter(|c| c.is_warning()).count();

    for check in results {
        check.display();
    }

    println!();

    if errors > 0 {
        println!("{} error(s), {} warning(s)", errors, warnings);
        false
    } else if warnings > 0 {
        println!("{} warning(s). Collection will still run.", warnings);
        true
    } else {
        println!("{}", "All checks passed!".green());
        true
    }
}
