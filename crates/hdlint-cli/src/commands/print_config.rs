//! Print-config command implementation.

use anyhow::{Context, Result};
use hdlint_core::{Config, LinterConfiguration};
use std::path::Path;

use crate::config_resolver::ConfigSource;

/// Renders the resolved configuration and the rules it enables for `file`.
///
/// # Errors
///
/// Returns an error if the configuration names unknown rules or cannot be
/// rendered.
pub fn render(source: &ConfigSource, config: &Config, file: &Path) -> Result<String> {
    let options = config.to_options(file)?;
    let mut configuration = LinterConfiguration::new();
    configuration.configure_from_options(&options)?;
    let filename = file.display().to_string();
    for policy in &config.policies {
        configuration.use_project_policy(policy, &filename);
    }

    let body = config.to_toml().context("Failed to render configuration")?;
    Ok(format!(
        "# Source: {source}\n# Active rules for {filename}: {configuration}\n{body}"
    ))
}

/// Runs the print-config command.
pub fn run(source: &ConfigSource, file: &Path) -> Result<()> {
    let config = source.load()?;
    print!("{}", render(source, &config, file)?);
    Ok(())
}
