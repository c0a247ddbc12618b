use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl OutputFormat {
    /// Resolve the effective output format.
    /// If user specified a format, use it.
    /// Otherwise: TTY → Text, non-TTY (pipe) → Json
    pub fn resolve(user_choice: Option<OutputFormat>) -> OutputFormat {
        match user_choice {
            Some(fmt) => fmt,
            None => {
                if std::io::stdout().is_terminal() {
                    OutputFormat::Text
                } else {
                    OutputFormat::Json
                }
            }
        }
    }
}

#[derive(Parser)]
#[command(
    name = "hookrelay",
    about = "Relay wiki events to a signed webhook endpoint",
    version,
    after_help = "Logs are written to: ~/.local/share/hookrelay/logs/hookrelay.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to hookrelay.yaml config file")]
    pub config: Option<PathBuf>,

    /// Suppress non-error output
    #[arg(short, long, global = true, help = "Suppress non-error output")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Filter a host event and deliver it if enabled
    Emit {
        /// Event JSON with an "action" tag (reads from stdin if not provided)
        #[arg(long)]
        payload: Option<String>,
    },

    /// Deliver a raw action and data object, bypassing the filter gate
    Send {
        /// Action name placed in the envelope
        action: String,

        /// Flat JSON object of scalar values (reads from stdin if not provided)
        #[arg(long)]
        data: Option<String>,
    },

    /// Print the X-Hub-Signature value for a body
    Sign {
        /// Body to sign (reads from stdin if not provided)
        #[arg(long)]
        body: Option<String>,
    },

    /// Check an X-Hub-Signature value against a body
    Verify {
        /// Header value, with or without the sha1= prefix
        #[arg(long, short)]
        signature: String,

        /// Body that was received (reads from stdin if not provided)
        #[arg(long)]
        body: Option<String>,
    },

    /// List event categories and whether they are enabled
    Events {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration (secret redacted)
    Show {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show which config files are searched
    Path,

    /// Check that the webhook settings can deliver
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_send() {
        let cli = Cli::try_parse_from(["hookrelay", "send", "BlockedUser", "--data", "{}"]).unwrap();
        match cli.command {
            Commands::Send { action, data } => {
                assert_eq!(action, "BlockedUser");
                assert_eq!(data.as_deref(), Some("{}"));
            }
            _ => panic!("expected send"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["hookrelay", "events", "--config", "/tmp/h.yaml", "-o", "json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/h.yaml")));
        assert!(matches!(
            cli.command,
            Commands::Events {
                format: Some(OutputFormat::Json)
            }
        ));
    }
}
