//! Pod listing

use crate::k8s::kubectl::{ClusterSource, ResourceList};
use anyhow::{Context, Result};
use k8s_openapi::api::core::v1::Pod;

/// Parse the output of `kubectl get pods -A -o json`
pub fn parse_pod_list(json: &str) -> Result<Vec<Pod>> {
    let list: ResourceList<Pod> =
        serde_json::from_str(json).context("Failed to parse 'pods' output from the cluster CLI")?;
    Ok(list.items)
}

/// Fetch every pod in the cluster. Any failure here aborts the run.
pub fn fetch_pods(source: &dyn ClusterSource) -> Result<Vec<Pod>> {
    let json = source
        .get_json("pods")
        .context("Error connecting to Kubernetes")?;
    let pods = parse_pod_list(&json)?;

    crate::log_info!("Discovered {} pods", pods.len());
    Ok(pods)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::k8s::kubectl::testing::FixtureSource;

    #[test]
    fn test_parse_pod_list() {
        let pods = parse_pod_list(fixtures::POD_LIST).unwrap();
        assert_eq!(pods.len(), 3);
        assert_eq!(pods[0].metadata.name.as_deref(), Some("payments-api-7d9c"));
        assert_eq!(
            pods[1].status.as_ref().and_then(|s| s.phase.as_deref()),
            Some("Succeeded")
        );
    }

    #[test]
    fn test_parse_empty_list() {
        let pods = parse_pod_list(r#"{"apiVersion":"v1","items":[],"kind":"List"}"#).unwrap();
        assert!(pods.is_empty());
    }

    #[test]
    fn test_invalid_json_is_error() {
        let err = parse_pod_list("error: You must be logged in").unwrap_err();
        assert!(err.to_string().contains("Failed to parse 'pods' output"));
    }

    #[test]
    fn test_fetch_pods_propagates_cli_failure() {
        let source = FixtureSource::default();
        let err = fetch_pods(&source).unwrap_err();
        assert!(err.to_string().contains("Error connecting to Kubernetes"));
    }

    #[test]
    fn test_fetch_pods() {
        let source = FixtureSource::default().with("pods", fixtures::POD_LIST);
        assert_eq!(fetch_pods(&source).unwrap().len(), 3);
    }
}
