//! Enhanced error types with actionable suggestions

use colored::Colorize;
use thiserror::Error;

/// Enhanced error with suggestions and documentation links
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct InventoryError {
    pub message: String,
    pub suggestions: Vec<String>,
    pub docs_link: Option<String>,
}

impl InventoryError {
    /// Create a new error with suggestions
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestions: Vec::new(),
            docs_link: None,
        }
    }

    /// Add a suggestion to the error
    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a documentation link
    pub fn with_docs(mut self, link: impl Into<String>) -> Self {
        self.docs_link = Some(link.into());
        self
    }

    /// Display the error with suggestions
    pub fn display(&self) {
        crate::log_error!("{}", self.message);

        if !self.suggestions.is_empty() {
            eprintln!();
            eprintln!("{}", "Suggestions:".yellow().bold());
            for suggestion in &self.suggestions {
                eprintln!("  {} {}", "→".blue(), suggestion);
            }
        }

        if let Some(docs) = &self.docs_link {
            eprintln!();
            eprintln!("{} {}", "📚 Documentation:".cyan(), docs);
        }
    }

    // Common error patterns

    /// Cluster CLI binary missing from PATH
    pub fn tool_not_found(tool: &str) -> Self {
        Self::new(format!("Required tool '{}' not found", tool))
            .suggest("Install kubectl: https://kubernetes.io/docs/tasks/tools/")
            .suggest("Ensure the tool is in your PATH")
            .suggest("Point at another binary with --kubectl or [cluster].binary")
    }

    /// Cluster API not reachable
    pub fn cluster_unreachable() -> Self {
        Self::new("Cannot connect to the Kubernetes cluster")
            .suggest("Check the current context: kubectl config current-context")
            .suggest("Use --kubeconfig or --context to select another cluster")
            .suggest("Verify network connectivity to the API server")
    }

    /// Listing a resource was refused
    pub fn permission_denied(operation: &str) -> Self {
        Self::new(format!("Permission denied: {}", operation))
            .suggest("Verify you can list pods in all namespaces: kubectl auth can-i list pods -A")
            .suggest("Ask a cluster administrator for a read-only ClusterRole")
    }

    /// The cluster CLI printed something that is not the expected JSON
    pub fn invalid_cluster_output(resource: &str) -> Self {
        Self::new(format!("Unexpected output while listing {}", resource))
            .suggest(format!("Run: kubectl get {} -A -o json", resource))
            .suggest("Run with -vv to see the raw command being executed")
    }

    /// Inventory JSON file could not be loaded
    pub fn inventory_file_error(path: &str, reason: &str) -> Self {
        Self::new(format!("Failed to load inventory from {}: {}", path, reason))
            .suggest("Verify the file exists and is readable")
            .suggest("Regenerate it with: asset-inventory collect")
    }

    /// The compliance gate was not met
    pub fn score_below_threshold(score: f64, minimum: f64) -> Self {
        Self::new(format!(
            "Compliance score {:.1}% is below the required {:.1}%",
            score, minimum
        ))
        .suggest("Add the missing owner and system-id labels to the listed workloads")
        .suggest("Review the generated github_summary.md for the failing assets")
        .with_docs("https://csrc.nist.gov/pubs/sp/800/53/r5/upd1/final")
    }
}

/// Helper to display error and exit
pub fn display_error_and_exit(error: InventoryError) -> ! {
    error.display();
    std::process::exit(1);
}

/// Convert anyhow error to InventoryError when possible
pub fn enhance_error(err: anyhow::Error) -> InventoryError {
    if let Some(known) = err.downcast_ref::<InventoryError>() {
        return known.clone();
    }

    // Include the whole context chain so stderr from kubectl is matched too
    let err_str = format!("{:#}", err);
    let lower = err_str.to_lowercase();

    if lower.contains("failed to run") && lower.contains("no such file") {
        let tool = extract_quoted(&err_str).unwrap_or("kubectl");
        return InventoryError::tool_not_found(tool);
    }

    if lower.contains("connection refused")
        || lower.contains("unable to connect")
        || lower.contains("timeout")
    {
        return InventoryError::cluster_unreachable();
    }

    if lower.contains("unauthorized") || lower.contains("forbidden") {
        return InventoryError::permission_denied("listing cluster resources");
    }

    if lower.contains("failed to parse") && lower.contains("output") {
        let resource = extract_quoted(&err_str).unwrap_or("pods");
        return InventoryError::invalid_cluster_output(resource);
    }

    // Default error with generic suggestion
    InventoryError::new(err_str)
        .suggest("Run with -v for more details")
        .suggest("Run 'asset-inventory check' to verify prerequisites")
}

/// Extract the first single-quoted token from an error message
fn extract_quoted(msg: &str) -> Option<&str> {
    let start = msg.find('\'')?;
    let end = msg[start + 1..].find('\'')?;
    Some(&msg[start + 1..start + 1 + end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, anyhow};

    #[test]
    fn test_tool_not_found_error() {
        let err = InventoryError::tool_not_found("oc");
        assert!(err.message.contains("'oc'"));
        assert_eq!(err.suggestions.len(), 3);
    }

    #[test]
    fn test_error_with_docs() {
        let err = InventoryError::new("test error").with_docs("https://example.com");
        assert!(err.docs_link.is_some());
    }

    #[test]
    fn test_error_suggestions() {
        let err = InventoryError::new("test")
            .suggest("suggestion 1")
            .suggest("suggestion 2");
        assert_eq!(err.suggestions.len(), 2);
    }

    #[test]
    fn test_enhance_missing_binary() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory");
        let err = Err::<(), _>(io)
            .context("Failed to run 'kubectl-custom'")
            .unwrap_err();
        let enhanced = enhance_error(err);
        assert!(enhanced.message.contains("kubectl-custom"));
    }

    #[test]
    fn test_enhance_connection_refused() {
        let err = anyhow!(
            "kubectl command failed: get pods -A -o json\nThe connection to the server localhost:8080 was refused - did you specify the right host or port?: connection refused"
        );
        let enhanced = enhance_error(err);
        assert_eq!(enhanced.message, "Cannot connect to the Kubernetes cluster");
    }

    #[test]
    fn test_enhance_forbidden() {
        let err = anyhow!(
            "Error from server (Forbidden): pods is forbidden: User \"dev\" cannot list resource"
        );
        let enhanced = enhance_error(err);
        assert!(enhanced.message.starts_with("Permission denied"));
    }

    #[test]
    fn test_enhance_passes_through_inventory_error() {
        let err = anyhow::Error::new(InventoryError::score_below_threshold(50.0, 90.0));
        let enhanced = enhance_error(err);
        assert!(enhanced.message.contains("50.0%"));
        assert!(enhanced.docs_link.is_some());
    }

    #[test]
    fn test_enhance_generic() {
        let enhanced = enhance_error(anyhow!("something odd"));
        assert_eq!(enhanced.message, "something odd");
        assert_eq!(enhanced.suggestions.len(), 2);
    }
}
