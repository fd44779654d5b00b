//! The inventory record written to `asset_inventory.json`

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label value recorded when a required label is absent
pub const UNKNOWN: &str = "UNKNOWN";

/// Owner/system id recorded for assets rejected by a policy engine
pub const BLOCKED: &str = "BLOCKED";

/// Status recorded for assets rejected by a policy engine
pub const FAILED_ADMISSION: &str = "Failed Admission";

pub const REASON_COMPLIANT: &str = "All controls met";
pub const REASON_MISSING_LABELS: &str = "Missing NIST Labels";

/// `discovery_date` format (local time)
pub const DISCOVERY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplianceStatus {
    #[serde(rename = "COMPLIANT")]
    Compliant,
    #[serde(rename = "NON-COMPLIANT")]
    NonCompliant,
}

impl ComplianceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "COMPLIANT",
            ComplianceStatus::NonCompliant => "NON-COMPLIANT",
        }
    }

    pub fn is_compliant(&self) -> bool {
        matches!(self, ComplianceStatus::Compliant)
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "✅",
            ComplianceStatus::NonCompliant => "❌",
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discovered asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub asset_name: String,
    pub namespace: String,
    pub owner: String,
    pub system_id: String,
    pub status: String,
    pub compliance_status: ComplianceStatus,
    pub reason: String,
    pub discovery_date: String,
}

impl InventoryRecord {
    pub fn is_compliant(&self) -> bool {
        self.compliance_status.is_compliant()
    }

    /// True for entries synthesised from a failed policy admission
    pub fn is_blocked(&self) -> bool {
        self.owner == BLOCKED && self.system_id == BLOCKED && self.status == FAILED_ADMISSION
    }
}
