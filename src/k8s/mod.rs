//! Kubernetes operations

pub mod kubectl;
pub mod pods;
pub mod policy_reports;

pub use kubectl::{ClusterSource, Kubectl};
