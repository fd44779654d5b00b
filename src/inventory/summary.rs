//! Aggregate compliance figures

use crate::inventory::record::InventoryRecord;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplianceSummary {
    pub total: usize,
    pub compliant: usize,
    pub non_compliant: usize,
    /// Percentage of compliant assets; 0 for an empty inventory
    pub score: f64,
}

/// Per-namespace counts for the console summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NamespaceCounts {
    pub compliant: usize,
    pub non_compliant: usize,
}

impl ComplianceSummary {
    pub fn from_records(records: &[InventoryRecord]) -> Self {
        let total = records.len();
        let compliant = records.iter().filter(|r| r.is_compliant()).count();
        let score = if total > 0 {
            compliant as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total,
            compliant,
            non_compliant: total - compliant,
            score,
        }
    }

    /// Every asset is compliant (an empty inventory is not)
    pub fn is_passing(&self) -> bool {
        self.total > 0 && self.compliant == self.total
    }

    pub fn meets(&self, minimum_score: f64) -> bool {
        self.score >= minimum_score
    }
}

/// Counts grouped by namespace, sorted by namespace name
pub fn by_namespace(records: &[InventoryRecord]) -> BTreeMap<&str, NamespaceCounts> {
    let mut counts: BTreeMap<&str, NamespaceCounts> = BTreeMap::new();
    for record in records {
        let entry = counts.entry(record.namespace.as_str()).or_default();
        if record.is_compliant() {
            entry.compliant += 1;
        } else {
            entry.non_compliant += 1;
        }
    }
    counts
}
