//! CLI command definitions

use clap::{Parser, ValueEnum};
use nion_application::ReasoningMode;
use std::path::PathBuf;

/// Output format for orchestration runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable orchestration map
    Map,
    /// The whole run as JSON
    Json,
}

/// CLI arguments for nion
#[derive(Parser, Debug)]
#[command(name = "nion")]
#[command(author, version, about = "Nion - plan, delegate and execute work from a single message")]
#[command(long_about = r#"
Nion reads one incoming message (chat, email or meeting transcript), classifies
it, plans a task graph across three layers and executes it:

1. L1 plans: the message intent selects a plan template
2. L2 coordinates: tracking, communication and learning domains
3. L3 executes: extraction, Q&A, evaluation, delivery and reports

The message is a JSON document:
  {"message_id": "MSG-001", "source": "email",
   "sender": {"name": "Sarah Chen", "role": "Product Manager"},
   "content": "What's the status of the authentication feature?",
   "project": "PRJ-ALPHA"}

Configuration files are loaded from (in priority order):
1. NION_* environment variables (e.g. NION_REASONING__MODE=rules)
2. --config <path>       Explicit config file
3. ./nion.toml           Project-level config
4. ~/.config/nion/config.toml   Global config

Example:
  nion message.json
  cat message.json | nion -
  nion --content "Can we add SSO before the December release?" --project PRJ-ALPHA
  nion message.json --output json --reasoning rules
"#)]
pub struct Cli {
    /// Path to the message JSON file ("-" reads stdin)
    #[arg(value_name = "MESSAGE", conflicts_with = "content")]
    pub message: Option<PathBuf>,

    /// Message content given inline instead of a JSON file
    #[arg(long, value_name = "TEXT")]
    pub content: Option<String>,

    /// Message identifier for an inline message
    #[arg(long, value_name = "ID", default_value = "MSG-001", requires = "content")]
    pub id: String,

    /// Source channel for an inline message (chat, email, meeting, ...)
    #[arg(long, value_name = "CHANNEL", default_value = "chat", requires = "content")]
    pub source: String,

    /// Sender name for an inline message
    #[arg(long, value_name = "NAME", default_value = "Unknown Sender", requires = "content")]
    pub sender: String,

    /// Sender role for an inline message
    #[arg(long, value_name = "ROLE", default_value = "Team Member", requires = "content")]
    pub role: String,

    /// Project identifier for an inline message
    #[arg(long, value_name = "PROJECT", requires = "content")]
    pub project: Option<String>,

    /// Output format (overrides [output] format)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Reasoning strategy: auto, backend or rules (overrides [reasoning] mode)
    #[arg(long, value_name = "MODE")]
    pub reasoning: Option<ReasoningMode>,

    /// Skip delivery when the evaluation verdict is REJECTED
    #[arg(long)]
    pub gate_delivery: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_file_input() {
        let cli = Cli::try_parse_from(["nion", "msg.json", "-o", "json", "--reasoning", "rules"])
            .unwrap();
        assert_eq!(cli.message, Some(PathBuf::from("msg.json")));
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.reasoning, Some(ReasoningMode::Rules));
        assert_eq!(cli.id, "MSG-001");
    }

    #[test]
    fn test_parse_inline_input() {
        let cli = Cli::try_parse_from([
            "nion",
            "--content",
            "Can we ship?",
            "--project",
            "PRJ-ALPHA",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.content.as_deref(), Some("Can we ship?"));
        assert_eq!(cli.project.as_deref(), Some("PRJ-ALPHA"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_file_and_inline_conflict() {
        assert!(Cli::try_parse_from(["nion", "msg.json", "--content", "hi"]).is_err());
    }

    #[test]
    fn test_unknown_reasoning_mode_rejected() {
        assert!(Cli::try_parse_from(["nion", "msg.json", "--reasoning", "magic"]).is_err());
    }
}
