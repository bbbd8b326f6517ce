//! CLI argument parser for typofix.

#![deny(missing_docs)]

use crate::correction::Mode;
use clap::{ArgAction, Args, Parser, Subcommand};

/// Fix typos in the provided TEXT or from stdin.
#[derive(Parser, Debug)]
#[command(
    name = "typofix",
    version,
    about = "Fix typos in the provided TEXT or from stdin",
    args_conflicts_with_subcommands = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase log verbosity: -v, -vv, -vvv
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Silence all log output (overrides -v).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Correction options for the default command.
    #[command(flatten)]
    pub fix: FixArgs,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Arguments of the default (correction) command.
#[derive(Args, Debug, Default)]
pub struct FixArgs {
    /// Suggest improvements instead of just fixing.
    #[arg(long)]
    pub suggest: bool,

    /// Rewrite the text completely.
    #[arg(long)]
    pub rewrite: bool,

    /// Test with stub responses instead of real API calls.
    #[arg(long)]
    pub test: bool,

    /// Text to correct. Read from stdin when omitted.
    #[arg(value_name = "TEXT")]
    pub text: Vec<String>,
}

impl FixArgs {
    /// Mode selected by the flags.
    pub fn mode(&self) -> Mode {
        Mode::from_flags(self.suggest, self.rewrite)
    }
}

/// Top-level subcommands supported by the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Configure API key and model settings.
    Config {
        /// Set the API key.
        #[arg(long = "api-key", value_name = "KEY")]
        api_key: Option<String>,

        /// Set the model.
        #[arg(long, value_name = "MODEL")]
        model: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_text_and_flags() {
        let cli = Cli::try_parse_from(["typofix", "--rewrite", "--test", "helo", "wrld"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.fix.text, vec!["helo", "wrld"]);
        assert_eq!(cli.fix.mode(), Mode::Rewrite);
        assert!(cli.fix.test);
    }

    #[test]
    fn config_subcommand() {
        let cli = Cli::try_parse_from(["typofix", "config", "--model", "foo"]).unwrap();
        match cli.command {
            Some(Commands::Config { api_key, model }) => {
                assert_eq!(api_key, None);
                assert_eq!(model.as_deref(), Some("foo"));
            }
            None => panic!("expected config subcommand"),
        }
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["typofix", "-vv", "--test", "x"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.fix.mode(), Mode::Fix);
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
