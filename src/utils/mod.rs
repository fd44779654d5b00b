//! Utility modules for asset-inventory

pub mod dryrun;
pub mod errors;
pub mod logger;
pub mod prereqs;
pub mod progress;

// Re-export commonly used items
pub use errors::{InventoryError, enhance_error};
pub use logger::{log_error, log_info, log_warn};
pub use prereqs::{CommonPrereqs, Prerequisite};
