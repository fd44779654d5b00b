//! `asset_inventory.json`: a flat array of records

use crate::inventory::InventoryRecord;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::Path;

/// Serialize the inventory with four-space indentation
pub fn render_json(records: &[InventoryRecord]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    records
        .serialize(&mut ser)
        .context("Failed to serialize inventory")?;

    Ok(String::from_utf8(buf)?)
}

/// Read back an inventory written by a previous run
pub fn load_inventory(path: &Path) -> Result<Vec<InventoryRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read inventory file: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse inventory file: {}", path.display()))
}
