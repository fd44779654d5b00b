//! Render command: rebuild Markdown and HTML from an existing inventory

use crate::config::settings::OutputSettings;
use crate::inventory::record::DISCOVERY_DATE_FORMAT;
use crate::inventory::summary::by_namespace;
use crate::inventory::{ComplianceSummary, InventoryRecord};
use crate::report::{self, html, json, markdown};
use crate::utils::InventoryError;
use anyhow::Result;
use chrono::Local;
use colored::Colorize;
use std::path::PathBuf;

/// Options for re-rendering reports
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Inventory to read; the configured JSON output when unset
    pub input: Option<PathBuf>,
    pub output: OutputSettings,
    pub dry_run: bool,
}

impl RenderOptions {
    /// The inventory file `collect` would have written with the same settings
    pub fn input_path(&self) -> PathBuf {
        self.input
            .clone()
            .unwrap_or_else(|| self.output.paths().json)
    }
}

/// Re-render the Markdown table and dashboard without touching the cluster
pub fn render(options: RenderOptions) -> Result<ComplianceSummary> {
    let input = options.input_path();
    let inventory = json::load_inventory(&input).map_err(|e| {
        let reason = format!("{:#}", e);
        InventoryError::inventory_file_error(&input.display().to_string(), &reason)
    })?;
    crate::log_info!("Loaded {} records from {}", inventory.len(), input.display());

    let generated_at = Local::now().format(DISCOVERY_DATE_FORMAT).to_string();
    write_reports(&inventory, &options.output, &generated_at, false, options.dry_run)?;

    let summary = ComplianceSummary::from_records(&inventory);
    print_summary(&inventory, &summary);
    Ok(summary)
}

/// Write the configured outputs; the JSON array only when `include_json`
pub fn write_reports(
    records: &[InventoryRecord],
    output: &OutputSettings,
    generated_at: &str,
    include_json: bool,
    dry_run: bool,
) -> Result<()> {
    let paths = output.paths();

    if include_json {
        report::write_output(&paths.json, &json::render_json(records)?, dry_run)?;
    }

    let table = markdown::render_markdown(records);
    report::write_output(&paths.markdown, &table, dry_run)?;
    report::write_output(&paths.html, &html::render_dashboard(records, generated_at), dry_run)?;

    if output.step_summary {
        match std::env::var_os(markdown::STEP_SUMMARY_ENV) {
            Some(path) if !dry_run => markdown::append_step_summary(&PathBuf::from(path), &table)?,
            Some(_) => crate::utils::dryrun::log_action("Append table to the GitHub step summary"),
            None => crate::log_warn!(
                "{} is not set; skipping step summary",
                markdown::STEP_SUMMARY_ENV
            ),
        }
    }

    Ok(())
}

/// Print the console summary
pub fn print_summary(records: &[InventoryRecord], summary: &ComplianceSummary) {
    println!();
    println!("{}", "Asset Inventory Summary".bold());
    println!("  Assets:         {}", summary.total);
    println!("  {} Compliant:     {}", "✓".green(), summary.compliant);
    println!("  {} Non-compliant: {}", "✗".red(), summary.non_compliant);

    let blocked = records.iter().filter(|r| r.is_blocked()).count();
    if blocked > 0 {
        println!("    of which blocked by policy: {}", blocked);
    }

    let score = format!("{:.1}%", summary.score);
    let score = if summary.is_passing() {
        score.green().bold()
    } else {
        score.red().bold()
    };
    println!("  Score:          {}", score);

    let namespaces = by_namespace(records);
    if !namespaces.is_empty() {
        println!();
        println!("{}", "By namespace:".bold());
        let width = namespaces.keys().map(|ns| ns.len()).max().unwrap_or(0);
        for (namespace, counts) in &namespaces {
            let marker = if counts.non_compliant == 0 {
                "✓".green()
            } else {
                "✗".red()
            };
            println!(
                "  {} {:width$}  {} compliant, {} non-compliant",
                marker,
                namespace,
                counts.compliant,
                counts.non_compliant,
                width = width
            );
        }
    }
    println!();
}
