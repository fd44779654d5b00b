//! Asset inventory: records, classification and aggregation

pub mod classify;
pub mod record;
pub mod summary;

pub use classify::Classifier;
pub use record::{ComplianceStatus, InventoryRecord};
pub use summary::ComplianceSummary;
