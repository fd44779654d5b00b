//! Prerequisite checking system for required tools

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrereqError {
    #[error("Tool '{name}' not found")]
    NotFound { name: String, hint: String },
}

/// Trait for checking prerequisites
pub trait Prerequisite {
    /// Name of the prerequisite tool
    fn name(&self) -> &str;

    /// Check if the tool is available
    fn check(&self) -> Result<(), PrereqError>;

    /// Installation hint for the user
    fn install_hint(&self) -> &str;
}

/// Basic prerequisite that checks if a command exists
pub struct CommandPrereq {
    pub name: String,
    pub hint: String,
}

impl CommandPrereq {
    pub fn new(name: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hint: hint.into(),
        }
    }
}

impl Prerequisite for CommandPrereq {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self) -> Result<(), PrereqError> {
        which::which(&self.name).map_err(|_| PrereqError::NotFound {
            name: self.name.clone(),
            hint: self.hint.clone(),
        })?;
        Ok(())
    }

    fn install_hint(&self) -> &str {
        &self.hint
    }
}

/// Outcome of checking a set of prerequisites
#[derive(Debug, Default)]
pub struct PrereqReport {
    pub found: Vec<String>,
    /// (name, install hint)
    pub missing: Vec<(String, String)>,
}

impl PrereqReport {
    pub fn all_found(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Common prerequisites for asset-inventory
pub struct CommonPrereqs;

impl CommonPrereqs {
    /// Get kubectl prerequisite
    pub fn kubectl() -> CommandPrereq {
        CommandPrereq::new(
            "kubectl",
            "Install from: https://kubernetes.io/docs/tasks/tools/",
        )
    }

    /// Get oc (OpenShift CLI) prerequisite
    pub fn oc() -> CommandPrereq {
        CommandPrereq::new(
            "oc",
            "Install from: https://docs.openshift.com/container-platform/latest/cli_reference/openshift_cli/getting-started-cli.html",
        )
    }

    /// Prerequisite for whichever cluster CLI is configured
    pub fn cluster_cli(binary: &str) -> CommandPrereq {
        match binary {
            "kubectl" => Self::kubectl(),
            "oc" => Self::oc(),
            other => CommandPrereq::new(other, "Ensure the configured cluster CLI is on PATH"),
        }
    }

    /// Check all prerequisites and return detailed results
    pub fn check_all(prereqs: &[&dyn Prerequisite]) -> PrereqReport {
        let mut report = PrereqReport::default();

        for prereq in prereqs {
            match prereq.check() {
                Ok(_) => {
                    report.found.push(prereq.name().to_string());
                }
                Err(PrereqError::NotFound { name, hint }) => {
                    crate::log_warn!("{} not found on PATH", name);
                    report.missing.push((name, hint));
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prereq_trait() {
        let prereq = CommandPrereq::new("sh", "Should always exist");
        assert_eq!(prereq.name(), "sh");
        assert!(prereq.check().is_ok());
    }

    #[test]
    fn test_missing_prereq() {
        let prereq = CommandPrereq::new("nonexistent-tool-xyz", "Test hint");
        assert!(prereq.check().is_err());
    }

    #[test]
    fn test_cluster_cli_selection() {
        assert_eq!(CommonPrereqs::cluster_cli("oc").name(), "oc");
        assert_eq!(CommonPrereqs::cluster_cli("kubectl").name(), "kubectl");
        assert_eq!(
            CommonPrereqs::cluster_cli("/opt/bin/k").install_hint(),
            "Ensure the configured cluster CLI is on PATH"
        );
    }

    #[test]
    fn test_check_all_splits_found_and_missing() {
        let present = CommandPrereq::new("sh", "n/a");
        let absent = CommandPrereq::new("nonexistent-tool-xyz", "get it somewhere");
        let report = CommonPrereqs::check_all(&[&present, &absent]);

        assert_eq!(report.found, vec!["sh".to_string()]);
        assert_eq!(report.missing.len(), 1);
        assert_eq!(report.missing[0].1, "get it somewhere");
        assert!(!report.all_found());
    }
}
