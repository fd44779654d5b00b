//! Kubernetes asset inventory and label compliance reporting
//!
//! Lists pods (and, when available, policy-report violations) through the
//! cluster CLI, classifies each asset against the required ownership labels
//! and writes JSON, Markdown and HTML reports.

pub mod commands;
pub mod config;
pub mod inventory;
pub mod k8s;
pub mod report;
pub mod utils;
