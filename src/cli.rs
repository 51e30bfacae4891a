use clap::{Parser, Subcommand};
use skill_inspector::output::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "skill-inspector",
    version,
    about = "Risk inspection for AI agent skills"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect a skill directory and report its risk score
    Inspect {
        /// Path to the skill directory
        path: PathBuf,

        /// Output format
        #[arg(long, short, default_value = "pretty", value_enum)]
        format: OutputFormat,

        /// Write output to file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Per-checker timeout in seconds (overrides config)
        #[arg(long)]
        timeout: Option<u64>,

        /// Custom config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Inspect all skill directories inside a collection directory
    #[command(name = "inspect-all")]
    InspectAll {
        /// Path to a directory containing multiple skill subdirectories
        path: PathBuf,

        /// Output format
        #[arg(long, short, default_value = "pretty", value_enum)]
        format: OutputFormat,

        /// Per-checker timeout in seconds (overrides config)
        #[arg(long)]
        timeout: Option<u64>,

        /// Custom config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List all built-in rules with descriptions
    ListRules,

    /// Show full explanation for a rule
    Explain {
        /// Rule ID (e.g., "patterns/fetch-pipe-shell")
        rule_id: String,
    },
}
