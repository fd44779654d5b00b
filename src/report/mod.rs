//! Report rendering and output files
//!
//! Every run overwrites its outputs. Parent directories are created on demand.

pub mod html;
pub mod json;
pub mod markdown;

use crate::utils::dryrun;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Write `contents` to `path`, replacing any previous file
pub fn write_output(path: &Path, contents: &str, dry_run: bool) -> Result<()> {
    let action = format!("Write {} ({} bytes)", path.display(), contents.len());
    dryrun::exec_unless_dry_run(dry_run, &action, || {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        crate::log_info!("Wrote {}", path.display());
        Ok(())
    })
}
