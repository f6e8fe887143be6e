//! Init command implementation.

use anyhow::{bail, Context, Result};
use hdlint_core::{Config, RuleSet};
use hdlint_rules::Preset;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "hdlint.toml";

const HEADER: &str = "\
# hdlint configuration
#
# ruleset: all, none or default
# rules: [+|-]name[=param:value;param:value] entries applied in order
# waiver_files: files of `waive --rule=<rule> [--line=N|--regex=<re>]` commands
#
# Per-path adjustments:
#
# [[policies]]
# name = \"third-party\"
# path_substrings = [\"third_party/\"]
# disabled_rules = [\"line-length\"]

";

/// The `hdlint.toml` contents for `preset`.
///
/// # Errors
///
/// Returns an error if the configuration cannot be rendered.
pub fn render(preset: Preset) -> Result<String> {
    let config = Config {
        ruleset: RuleSet::None,
        rules: preset.rule_entries(),
        ..Config::default()
    };
    let body = config.to_toml().context("Failed to render configuration")?;
    Ok(format!("{HEADER}# preset: {preset}\n{body}"))
}

/// Writes `hdlint.toml` for `preset` into `dir`.
///
/// # Errors
///
/// Returns an error if the file exists and `force` is not set, or if it
/// cannot be written.
pub fn write_config(dir: &Path, force: bool, preset: Preset) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, render(preset)?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(config_path)
}

/// Runs the init command.
pub fn run(force: bool, preset: Preset) -> Result<()> {
    let path = write_config(Path::new("."), force, preset)?;

    println!("Created {} ({preset} preset)", path.display());
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE_NAME} to configure rules");
    println!("  2. Run: hdlint check");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_rendered_config_parses_back() {
        hdlint_rules::register_builtin_rules();
        for preset in Preset::ALL {
            let text = render(preset).unwrap();
            let config = Config::parse(&text).unwrap();
            assert_eq!(config.ruleset, RuleSet::None);
            assert_eq!(config.rules, preset.rule_entries());
            assert!(config.to_options(Path::new("top.sv")).is_ok(), "{preset}");
        }
    }

    #[test]
    fn test_existing_file_needs_force() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(tmp.path(), false, Preset::Minimal).unwrap();
        assert!(std::fs::read_to_string(&path)
            .unwrap()
            .contains("# preset: minimal"));

        let err = write_config(tmp.path(), false, Preset::Strict).unwrap_err();
        assert!(err.to_string().starts_with("Configuration file already exists"));

        write_config(tmp.path(), true, Preset::Strict).unwrap();
        let config = Config::from_file(&path).unwrap();
        assert!(config.rules.contains(&"line-length=length:80".to_string()));
    }
}
