//! hdlint CLI tool.
//!
//! Usage:
//! ```bash
//! hdlint check [OPTIONS] [PATHS]...
//! hdlint list-rules [--rule <NAME> | --markdown | --rules-file]
//! hdlint init [--preset <PRESET>]
//! hdlint print-config [FILE]
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use hdlint_rules::Preset;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;
mod tokenizer;

use commands::check::CheckArgs;
use commands::list_rules::Listing;

/// Linter for Verilog and SystemVerilog sources
#[derive(Parser)]
#[command(name = "hdlint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "HDLINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run lint checks
    Check(CheckArgs),

    /// Describe the available rules
    ListRules {
        /// Describe one rule ("all" for every rule)
        #[arg(long, default_value = "all")]
        rule: String,

        /// Print the descriptions as markdown
        #[arg(long, conflicts_with = "rules_file")]
        markdown: bool,

        /// Print a `.rules.hdlint` file for the resolved configuration
        #[arg(long)]
        rules_file: bool,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,

        /// Rules to start from
        #[arg(long, default_value_t = Preset::Recommended)]
        preset: Preset,
    },

    /// Show the resolved configuration and the rules it enables
    PrintConfig {
        /// File whose active rules to show
        #[arg(default_value = "top.sv")]
        file: PathBuf,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// `path:line:col: reason [rule]` lines.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// `path:line:col: [rule] reason` lines.
    Compact,
    /// Annotated source snippets.
    Fancy,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // stdout carries results only.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    hdlint_rules::register_builtin_rules();

    match cli.command {
        Commands::Check(args) => {
            let target = args.paths.first().map_or(Path::new("."), PathBuf::as_path);
            let source = config_resolver::resolve(target, cli.config.as_deref());
            commands::check::run(&args, &source)
        }
        Commands::ListRules {
            rule,
            markdown,
            rules_file,
        } => {
            let listing = if rules_file {
                Listing::RulesFile
            } else if markdown {
                Listing::Markdown
            } else {
                Listing::Help(&rule)
            };
            let source = config_resolver::resolve(Path::new("."), cli.config.as_deref());
            commands::list_rules::run(listing, &source)
        }
        Commands::Init { force, preset } => commands::init::run(force, preset),
        Commands::PrintConfig { file } => {
            let source = config_resolver::resolve(&file, cli.config.as_deref());
            commands::print_config::run(&source, &file)
        }
    }
}
