//! Check command implementation.

use anyhow::{bail, Context, Result};
use glob::Pattern;
use hdlint_core::{sorted_violations, Analyzer, AutoFix, Config, LinterConfiguration, RuleSet};
use ignore::WalkBuilder;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::output::{self, CheckResult, FileReport};
use crate::config_resolver::ConfigSource;
use crate::{tokenizer, OutputFormat};

/// Extensions picked up when walking a directory.
pub const HDL_EXTENSIONS: &[&str] = &["v", "vh", "sv", "svh"];

/// Arguments of `hdlint check`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Files or directories to lint
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Base rule set: all, none or default
    #[arg(long)]
    pub ruleset: Option<RuleSet>,

    /// Rule adjustments as `[+|-]name[=config]` (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub rules: Vec<String>,

    /// Rules file with one `[+|-]name[=config]` entry per line
    #[arg(long)]
    pub rules_config: Option<PathBuf>,

    /// Look for `.rules.hdlint` upward from each linted file
    #[arg(long)]
    pub rules_config_search: bool,

    /// External waiver files (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub waiver_files: Vec<PathBuf>,

    /// Exclude glob patterns (can be specified multiple times)
    #[arg(short, long)]
    pub exclude: Vec<String>,

    /// Apply available fixes in place
    #[arg(long)]
    pub autofix: bool,

    /// Print the offending source line under each violation
    #[arg(long)]
    pub show_context: bool,

    /// Print waiver commands for every violation instead of reporting them
    #[arg(long)]
    pub generate_waivers: bool,
}

/// Runs the check command.
pub fn run(args: &CheckArgs, source: &ConfigSource) -> Result<()> {
    let config = merge_args(source.load()?, args);
    config
        .to_options(Path::new("."))
        .context("Invalid rule configuration")?;

    let excludes = parse_excludes(&args.exclude)?;
    let files = collect_files(&args.paths, &excludes)?;
    tracing::info!("Linting {} file(s)", files.len());

    let mut result = CheckResult::default();
    for path in &files {
        let mut report = lint_file(path, &config)?;
        if args.autofix {
            if let Some(fixed) = apply_autofixes(&mut report) {
                std::fs::write(path, fixed)
                    .with_context(|| format!("Failed to write fixes to {}", path.display()))?;
                tracing::info!("Applied fixes to {}", path.display());
            }
        }
        result.files.push(report);
    }

    if args.generate_waivers {
        print!("{}", output::render_waivers(&result)?);
        return Ok(());
    }

    output::print(&result, args.format, args.show_context)?;

    if result.has_violations() {
        std::process::exit(1);
    }

    Ok(())
}

/// Overlays command-line choices on the file configuration.
fn merge_args(mut config: Config, args: &CheckArgs) -> Config {
    if let Some(ruleset) = args.ruleset {
        config.ruleset = ruleset;
    }
    config.rules.extend(args.rules.iter().cloned());
    if let Some(path) = &args.rules_config {
        config.rules_config = Some(path.clone());
    }
    config.rules_config_search |= args.rules_config_search;
    config.waiver_files.extend(args.waiver_files.iter().cloned());
    config
}

fn parse_excludes(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| Pattern::new(p).with_context(|| format!("Invalid exclude pattern: {p}")))
        .collect()
}

fn is_hdl_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| HDL_EXTENSIONS.contains(&ext))
}

/// Expands `paths` into the sorted list of files to lint.
///
/// Files named directly are kept whatever their extension; directories are
/// walked honoring ignore files.
///
/// # Errors
///
/// Returns an error if a path does not exist or a directory cannot be read.
pub fn collect_files(paths: &[PathBuf], excludes: &[Pattern]) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();
    for root in paths {
        if root.is_file() {
            files.insert(root.clone());
            continue;
        }
        if !root.exists() {
            bail!("No such file or directory: {}", root.display());
        }
        for entry in WalkBuilder::new(root).build() {
            let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
            let is_file = entry.file_type().is_some_and(|t| t.is_file());
            if is_file && is_hdl_file(entry.path()) {
                files.insert(entry.into_path());
            }
        }
    }
    Ok(files
        .into_iter()
        .filter(|path| !excludes.iter().any(|pattern| pattern.matches_path(path)))
        .collect())
}

/// The rules to run on `path`: the options from `config`, then its policies.
fn file_configuration(path: &Path, filename: &str, config: &Config) -> Result<LinterConfiguration> {
    let options = config.to_options(path)?;
    let mut configuration = LinterConfiguration::new();
    configuration
        .configure_from_options(&options)
        .with_context(|| format!("Failed to configure rules for {filename}"))?;
    for policy in &config.policies {
        configuration.use_project_policy(policy, filename);
    }
    Ok(configuration)
}

/// Lints one file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its rules cannot be
/// configured.
pub fn lint_file(path: &Path, config: &Config) -> Result<FileReport> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let filename = path.display().to_string();
    let configuration = file_configuration(path, &filename, config)?;

    let view = tokenizer::text_structure(contents.clone());
    let mut analyzer = Analyzer::builder()
        .configuration(configuration)
        .filename(&filename)
        .waiver_syntax(tokenizer::waiver_syntax())
        .build()
        .with_context(|| format!("Failed to set up rules for {filename}"))?;
    tracing::debug!("{filename}: {} rules", analyzer.rule_count());

    analyzer.lint(&view, &filename);
    let statuses = analyzer.report_status(&view);
    Ok(FileReport {
        path: filename,
        contents,
        statuses,
    })
}

/// Combines the first fix of every violation, skipping fixes that overlap
/// one already taken, and drops the fixed violations from `report`.
///
/// Returns the fixed text, or `None` when nothing was fixed.
pub fn apply_autofixes(report: &mut FileReport) -> Option<String> {
    let mut combined = AutoFix::default();
    let mut fixed = BTreeSet::new();
    for entry in sorted_violations(&report.statuses) {
        let Some(fix) = entry.violation.autofixes.first() else {
            continue;
        };
        if combined.add_edits(fix.edits()) {
            fixed.insert((entry.status.lint_rule_name.clone(), entry.violation.offset()));
        }
    }
    if fixed.is_empty() {
        return None;
    }
    for status in &mut report.statuses {
        let rule = status.lint_rule_name.clone();
        status.waive_violations(|v| fixed.contains(&(rule.clone(), v.offset())));
    }
    Some(combined.apply(&report.contents))
}
