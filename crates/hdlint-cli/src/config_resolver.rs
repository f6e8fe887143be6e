//! Locating and loading `hdlint.toml`.
//!
//! Priority, highest first:
//!
//! 1. `--config` flag (explicit path)
//! 2. `hdlint.toml` or `.hdlint.toml` in the project directory or the
//!    nearest ancestor that has one
//! 3. `config.toml` in `$HDLINT_CONFIG_DIR`, else in `~/.hdlint/`
//! 4. No file: [`Config::default`]

use anyhow::{Context, Result};
use hdlint_core::Config;
use std::fmt;
use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// The configuration file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Reads the configuration this source points at.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            return Ok(Config::default());
        };
        if matches!(self, Self::Global(_)) {
            tracing::info!("Using global config: {}", path.display());
        }
        Config::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(p) => write!(f, "{} (--config)", p.display()),
            Self::Project(p) => write!(f, "{} (project)", p.display()),
            Self::Global(p) => write!(f, "{} (global)", p.display()),
            Self::Default => f.write_str("built-in defaults"),
        }
    }
}

const PROJECT_CONFIG_NAMES: &[&str] = &["hdlint.toml", ".hdlint.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration for linting `target`, a file or directory.
#[must_use]
pub fn resolve(target: &Path, explicit: Option<&Path>) -> ConfigSource {
    let project_dir = match target.parent() {
        _ if target.is_dir() => target,
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    resolve_inner(project_dir, explicit, global_config_dir())
}

/// Takes `global_dir` as a parameter so tests need no environment.
fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    let project = project_dir.ancestors().find_map(|dir| {
        PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    });
    if let Some(candidate) = project {
        tracing::debug!("Found project config: {}", candidate.display());
        return ConfigSource::Project(candidate);
    }

    match global_dir.map(|dir| dir.join(GLOBAL_CONFIG_NAME)) {
        Some(candidate) if candidate.is_file() => {
            tracing::debug!("Found global config: {}", candidate.display());
            ConfigSource::Global(candidate)
        }
        _ => ConfigSource::Default,
    }
}

/// The global config directory: `$HDLINT_CONFIG_DIR`, else `~/.hdlint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("HDLINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".hdlint"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdlint_core::RuleSet;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_wins_over_project() {
        let tmp = TempDir::new().unwrap();
        let explicit = tmp.path().join("custom.toml");
        fs::write(&explicit, "").unwrap();
        fs::write(tmp.path().join("hdlint.toml"), "").unwrap();

        let result = resolve_inner(tmp.path(), Some(&explicit), None);
        assert_eq!(result, ConfigSource::Explicit(explicit));
    }

    #[test]
    fn explicit_path_is_not_checked() {
        let result = resolve_inner(Path::new("/tmp"), Some(Path::new("/nonexistent.toml")), None);
        assert_eq!(result, ConfigSource::Explicit(PathBuf::from("/nonexistent.toml")));
        assert!(result.load().is_err());
    }

    #[test]
    fn plain_name_preferred_over_dot_name() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".hdlint.toml"), "").unwrap();
        assert_eq!(
            resolve_inner(tmp.path(), None, None),
            ConfigSource::Project(tmp.path().join(".hdlint.toml"))
        );

        fs::write(tmp.path().join("hdlint.toml"), "").unwrap();
        assert_eq!(
            resolve_inner(tmp.path(), None, None),
            ConfigSource::Project(tmp.path().join("hdlint.toml"))
        );
    }

    #[test]
    fn global_used_only_without_project_config() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(result, ConfigSource::Global(global.path().join("config.toml")));

        fs::write(project.path().join("hdlint.toml"), "").unwrap();
        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert!(matches!(result, ConfigSource::Project(_)));
    }

    #[test]
    fn empty_global_dir_falls_back_to_default() {
        let project = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(result, ConfigSource::Default);
        assert_eq!(result.load().unwrap(), Config::default());
    }

    #[test]
    fn file_target_resolves_from_its_directory() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("top.sv");
        fs::write(&source, "module top; endmodule\n").unwrap();
        fs::write(tmp.path().join("hdlint.toml"), "ruleset = \"all\"\n").unwrap();

        let result = resolve(&source, None);
        assert_eq!(result, ConfigSource::Project(tmp.path().join("hdlint.toml")));
        assert_eq!(result.load().unwrap().ruleset, RuleSet::All);
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("hdlint.toml");
        fs::write(&path, "ruleset = 3\n").unwrap();
        let err = ConfigSource::Project(path.clone()).load().unwrap_err();
        assert!(err.to_string().starts_with("Failed to load config: "));
        assert!(err.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn project_config_found_in_ancestor() {
        let tmp = TempDir::new().unwrap();
        let rtl = tmp.path().join("rtl/core");
        fs::create_dir_all(&rtl).unwrap();
        fs::write(tmp.path().join(".hdlint.toml"), "").unwrap();
        assert_eq!(
            resolve(&rtl.join("alu.sv"), None),
            ConfigSource::Project(tmp.path().join(".hdlint.toml"))
        );
    }

    #[test]
    fn source_display() {
        assert_eq!(ConfigSource::Default.to_string(), "built-in defaults");
        assert_eq!(
            ConfigSource::Global(PathBuf::from("/h/.hdlint/config.toml")).to_string(),
            "/h/.hdlint/config.toml (global)"
        );
        assert!(ConfigSource::Default.path().is_none());
    }
}
