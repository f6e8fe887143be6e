//! List rules command implementation.

use anyhow::{Context, Result};
use hdlint_core::{
    lint_rule_file, rule_descriptions_help, rule_descriptions_markdown, Config,
    LinterConfiguration,
};
use hdlint_rules::Preset;
use std::fmt::Write;
use std::path::Path;

use crate::config_resolver::ConfigSource;

/// What `list-rules` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing<'a> {
    /// Plain-text help for one rule or, with `"all"`, every rule.
    Help(&'a str),
    /// Markdown documentation of every rule.
    Markdown,
    /// A `.rules.hdlint` file reflecting the resolved configuration.
    RulesFile,
}

/// Renders a rules file with every rule, turned on or off as `config` says.
///
/// # Errors
///
/// Returns an error if `config` names unknown rules or a rules file cannot
/// be read.
pub fn render_rules_file(config: &Config) -> Result<String> {
    let options = config.to_options(Path::new("."))?;
    let mut configuration = LinterConfiguration::new();
    configuration
        .configure_from_options(&options)
        .context("Failed to resolve rule configuration")?;
    Ok(lint_rule_file(&configuration))
}

fn preset_summary() -> String {
    let mut out = String::from("Presets (hdlint init --preset <name>):\n");
    for preset in Preset::ALL {
        let _ = writeln!(
            out,
            "  {:<12} {}",
            preset.to_string(),
            preset.rule_entries().join(", ")
        );
    }
    out
}

/// Runs the list-rules command.
pub fn run(listing: Listing<'_>, source: &ConfigSource) -> Result<()> {
    match listing {
        Listing::Help(rule) => {
            print!("{}", rule_descriptions_help(rule));
            if rule == "all" {
                print!("\n{}", preset_summary());
            }
        }
        Listing::Markdown => print!("{}", rule_descriptions_markdown()),
        Listing::RulesFile => print!("{}", render_rules_file(&source.load()?)?),
    }
    Ok(())
}
