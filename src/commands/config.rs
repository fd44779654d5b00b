//! Config command: show or initialise configuration

use crate::config::Settings;
use crate::config::settings::LOCAL_CONFIG_FILE;
use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};

/// Print the effective configuration as TOML
pub fn show(settings: &Settings) -> Result<()> {
    print!("{}", settings.to_toml()?);
    Ok(())
}

/// Write an example configuration file
pub fn init(path: Option<&Path>, force: bool, dry_run: bool) -> Result<PathBuf> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE));

    if path.exists() && !force {
        return Err(anyhow!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        ));
    }

    crate::report::write_output(&path, &Settings::example_config()?, dry_run)?;
    Ok(path)
}
