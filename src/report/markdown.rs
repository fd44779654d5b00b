//! `github_summary.md`: a Markdown table suitable for a CI job summary

use crate::inventory::InventoryRecord;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

pub const HEADING: &str = "### 📊 NIST 800-53 Unified Asset Inventory";

/// Environment variable GitHub Actions points at the job summary file
pub const STEP_SUMMARY_ENV: &str = "GITHUB_STEP_SUMMARY";

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

pub fn render_markdown(records: &[InventoryRecord]) -> String {
    let mut summary = String::new();
    summary.push_str(HEADING);
    summary.push('\n');
    summary.push_str("| Asset Name | Status | Compliance | Reason |\n");
    summary.push_str("| :--- | :--- | :--- | :--- |\n");

    for item in records {
        summary.push_str(&format!(
            "| {} | {} | {} {} | {} |\n",
            escape_cell(&item.asset_name),
            escape_cell(&item.status),
            item.compliance_status.emoji(),
            item.compliance_status,
            escape_cell(&item.reason),
        ));
    }

    summary
}

/// Append the table to the GitHub Actions step summary file
pub fn append_step_summary(path: &Path, markdown: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open step summary: {}", path.display()))?;

    writeln!(file, "{}", markdown)
        .with_context(|| format!("Failed to append step summary: {}", path.display()))?;

    Ok(())
}
