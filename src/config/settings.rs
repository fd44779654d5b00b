//! Configuration file support for asset-inventory

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Local config file name, looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = ".asset-inventory.toml";

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub cluster: ClusterSettings,

    #[serde(default)]
    pub labels: LabelSettings,

    #[serde(default)]
    pub namespaces: NamespaceSettings,

    #[serde(default)]
    pub policy_reports: PolicyReportSettings,

    #[serde(default)]
    pub output: OutputSettings,

    #[serde(default)]
    pub colors: Colors,
}

/// How to reach the cluster
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ClusterSettings {
    /// Cluster CLI to shell out to (kubectl, oc, ...)
    #[serde(default = "default_binary")]
    pub binary: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Label keys every workload must carry
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LabelSettings {
    #[serde(default = "default_owner_label")]
    pub owner: String,

    #[serde(default = "default_system_id_label")]
    pub system_id: String,
}

/// Namespace scoping
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NamespaceSettings {
    #[serde(default = "default_ignored_namespaces")]
    pub ignored: Vec<String>,

    /// Optional regex; only matching namespaces are reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// Policy report collection
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PolicyReportSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Output file locations
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OutputSettings {
    #[serde(default = "default_output_dir")]
    pub dir: String,

    #[serde(default = "default_json_file")]
    pub json: String,

    #[serde(default = "default_markdown_file")]
    pub markdown: String,

    #[serde(default = "default_html_file")]
    pub html: String,

    /// Append the Markdown table to $GITHUB_STEP_SUMMARY when it is set
    #[serde(default)]
    pub step_summary: bool,
}

/// Color settings
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Colors {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub kubectl: Option<String>,
    pub kubeconfig: Option<String>,
    pub context: Option<String>,
    pub output_dir: Option<String>,
    pub namespace_filter: Option<String>,
    pub no_policy_reports: bool,
    pub step_summary: bool,
}

/// Resolved output paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub json: PathBuf,
    pub markdown: PathBuf,
    pub html: PathBuf,
}

// Default value functions
fn default_binary() -> String {
    "kubectl".to_string()
}

fn default_owner_label() -> String {
    "owner".to_string()
}

fn default_system_id_label() -> String {
    "system-id".to_string()
}

fn default_ignored_namespaces() -> Vec<String> {
    vec![
        "kube-system".to_string(),
        "kube-public".to_string(),
        "kube-node-lease".to_string(),
        "kyverno".to_string(),
    ]
}

fn default_true() -> bool {
    true
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_json_file() -> String {
    "asset_inventory.json".to_string()
}

fn default_markdown_file() -> String {
    "github_summary.md".to_string()
}

fn default_html_file() -> String {
    "index.html".to_string()
}

impl Default for ClusterSettings {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            kubeconfig: None,
            context: None,
        }
    }
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            owner: default_owner_label(),
            system_id: default_system_id_label(),
        }
    }
}

impl Default for NamespaceSettings {
    fn default() -> Self {
        Self {
            ignored: default_ignored_namespaces(),
            filter: None,
        }
    }
}

impl Default for PolicyReportSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            json: default_json_file(),
            markdown: default_markdown_file(),
            html: default_html_file(),
            step_summary: false,
        }
    }
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            enabled: default_true(),
        }
    }
}

impl OutputSettings {
    /// Join the configured file names onto the output directory
    pub fn paths(&self) -> OutputPaths {
        let dir = Path::new(&self.dir);
        OutputPaths {
            json: dir.join(&self.json),
            markdown: dir.join(&self.markdown),
            html: dir.join(&self.html),
        }
    }
}

impl NamespaceSettings {
    pub fn is_ignored(&self, namespace: &str) -> bool {
        self.ignored.iter().any(|ns| ns == namespace)
    }
}

impl Settings {
    /// Load settings from an explicit path, a discovered file, or defaults
    ///
    /// An explicit path must exist and parse. A discovered file that fails to
    /// parse is reported and defaults are used instead.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }

        match Self::find_config_file() {
            Some(path) => match Self::load_from_file(&path) {
                Ok(settings) => {
                    crate::log_info!("Loaded configuration from {}", path.display());
                    Ok(settings)
                }
                Err(e) => {
                    crate::log_warn!("{:#}; falling back to defaults", e);
                    Ok(Self::default())
                }
            },
            None => Ok(Self::default()),
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Find config file in standard locations
    /// Priority:
    /// 1. .asset-inventory.toml in current directory
    /// 2. ~/.config/asset-inventory/config.toml (XDG config directory)
    fn find_config_file() -> Option<PathBuf> {
        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            return Some(local_config);
        }

        Self::user_config_path().filter(|path| path.exists())
    }

    /// Per-user config location
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("asset-inventory").join("config.toml"))
    }

    /// Layer command-line flags on top of the loaded configuration
    pub fn apply(&mut self, overrides: SettingsOverrides) {
        if let Some(binary) = overrides.kubectl {
            self.cluster.binary = binary;
        }
        if overrides.kubeconfig.is_some() {
            self.cluster.kubeconfig = overrides.kubeconfig;
        }
        if overrides.context.is_some() {
            self.cluster.context = overrides.context;
        }
        if let Some(dir) = overrides.output_dir {
            self.output.dir = dir;
        }
        if overrides.namespace_filter.is_some() {
            self.namespaces.filter = overrides.namespace_filter;
        }
        if overrides.no_policy_reports {
            self.policy_reports.enabled = false;
        }
        if overrides.step_summary {
            self.output.step_summary = true;
        }
    }

    /// Render the settings as TOML for display
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize settings")
    }

    /// Generate example config file content
    pub fn example_config() -> Result<String> {
        let header = "# asset-inventory configuration file\n\
                      # Place this file at ~/.config/asset-inventory/config.toml or .asset-inventory.toml in your project\n\n";

        Ok(format!("{}{}", header, Settings::default().to_toml()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.cluster.binary, "kubectl");
        assert_eq!(settings.labels.owner, "owner");
        assert_eq!(settings.labels.system_id, "system-id");
        assert!(settings.namespaces.is_ignored("kyverno"));
        assert!(!settings.namespaces.is_ignored("default"));
        assert!(settings.policy_reports.enabled);
        assert!(!settings.output.step_summary);
    }

    #[test]
    fn test_settings_deserialization() {
        let toml_str = r#"
[cluster]
binary = "oc"
context = "prod"

[labels]
system_id = "app.example.com/system-id"

[namespaces]
ignored = ["openshift-monitoring"]
filter = "^team-"

[policy_reports]
enabled = false
"#;
        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.cluster.binary, "oc");
        assert_eq!(settings.cluster.context.as_deref(), Some("prod"));
        assert_eq!(settings.labels.owner, "owner");
        assert_eq!(settings.labels.system_id, "app.example.com/system-id");
        assert_eq!(settings.namespaces.ignored, vec!["openshift-monitoring"]);
        assert_eq!(settings.namespaces.filter.as_deref(), Some("^team-"));
        assert!(!settings.policy_reports.enabled);
        assert_eq!(settings.output.json, "asset_inventory.json");
    }

    #[test]
    fn test_apply_overrides() {
        let mut settings: Settings = toml::from_str(
            r#"
[cluster]
context = "from-file"

[output]
dir = "file-dir"
"#,
        )
        .unwrap();

        settings.apply(SettingsOverrides {
            kubectl: Some("oc".to_string()),
            output_dir: Some("cli-dir".to_string()),
            no_policy_reports: true,
            ..Default::default()
        });

        assert_eq!(settings.cluster.binary, "oc");
        // Unset flags leave file values alone
        assert_eq!(settings.cluster.context.as_deref(), Some("from-file"));
        assert_eq!(settings.output.dir, "cli-dir");
        assert!(!settings.policy_reports.enabled);
        assert!(!settings.output.step_summary);
    }

    #[test]
    fn test_output_paths() {
        let mut output = OutputSettings::default();
        output.dir = "reports".to_string();
        let paths = output.paths();
        assert_eq!(paths.json, PathBuf::from("reports/asset_inventory.json"));
        assert_eq!(paths.markdown, PathBuf::from("reports/github_summary.md"));
        assert_eq!(paths.html, PathBuf::from("reports/index.html"));
    }

    #[test]
    fn test_save_and_load_explicit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut settings = Settings::default();
        settings.output.dir = "out".to_string();
        fs::write(&path, settings.to_toml().unwrap()).unwrap();

        let loaded = Settings::load(Some(&path)).unwrap();
        assert_eq!(loaded.output.dir, "out");
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Settings::load(Some(&dir.path().join("missing.toml"))).is_err());
    }

    #[test]
    fn test_example_config() {
        let example = Settings::example_config().unwrap();
        assert!(example.contains("asset-inventory configuration"));
        assert!(example.contains("[cluster]"));
        assert!(example.contains("[labels]"));
        assert!(example.contains("[output]"));
        assert!(example.contains("kube-node-lease"));
    }
}
