//! Command-line interface for trustledger.
//!
//! This module provides the CLI structure for the `trustreg` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ApproveSchemeCommand, CommunityArg, ConfigCommand, DonateCommand, GenderArg,
    MaritalStatusArg, MembersCommand, RegisterCommand, RoleArg, StatusCommand,
};

/// trustreg - Member registry of a community trust
///
/// Registers members, records donations and approves welfare scheme grants
/// against a local member database.
#[derive(Debug, Parser)]
#[command(name = "trustreg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List or inspect members
    #[command(subcommand)]
    Members(MembersCommand),

    /// Register a new member, or edit one with --edit
    Register(Box<RegisterCommand>),

    /// Record a donation for a member
    Donate(DonateCommand),

    /// Approve a welfare scheme grant for a member
    ApproveScheme(ApproveSchemeCommand),

    /// Show registry status
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn status_cli(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Status(StatusCommand { json: false }),
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "trustreg");
    }

    #[test]
    fn test_verbosity_levels() {
        use crate::logging::Verbosity;

        assert_eq!(status_cli(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(status_cli(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(status_cli(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(status_cli(3, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_members_list() {
        let cli = Cli::try_parse_from(["trustreg", "members", "list", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Members(MembersCommand::List { json: true })
        ));
    }

    #[test]
    fn test_parse_members_show() {
        let cli = Cli::try_parse_from(["trustreg", "members", "show", "4092"]).unwrap();
        match cli.command {
            Command::Members(MembersCommand::Show { id, json }) => {
                assert_eq!(id, "4092");
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_register() {
        let cli = Cli::try_parse_from([
            "trustreg",
            "register",
            "--first-name",
            "Imran",
            "--surname",
            "Pathan",
            "--city",
            "Ahmedabad",
            "--gender",
            "male",
            "--father-name",
            "Yusufbhai",
            "--education",
            "B.E. Civil",
            "--occupation",
            "Engineer",
            "--income",
            "350000",
            "--community",
            "muslim",
            "--sub-caste",
            "pathan",
            "--fee",
            "9000",
        ])
        .unwrap();

        let Command::Register(cmd) = cli.command else {
            panic!("expected register");
        };
        assert_eq!(cmd.marital_status, MaritalStatusArg::Unmarried);
        assert_eq!(cmd.role, RoleArg::Member);
        assert_eq!(cmd.fee, 9000);
        assert!(cmd.edit.is_none());
    }

    #[test]
    fn test_parse_register_missing_fee() {
        let result = Cli::try_parse_from([
            "trustreg",
            "register",
            "--first-name",
            "Imran",
            "--surname",
            "Pathan",
            "--city",
            "Ahmedabad",
            "--gender",
            "male",
            "--education",
            "B.E.",
            "--occupation",
            "Engineer",
            "--income",
            "1",
            "--community",
            "muslim",
            "--sub-caste",
            "pathan",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_donate() {
        let cli = Cli::try_parse_from([
            "trustreg",
            "donate",
            "2190",
            "--amount",
            "500",
            "--category",
            "education",
            "--date",
            "2024-04-01",
        ])
        .unwrap();

        let Command::Donate(cmd) = cli.command else {
            panic!("expected donate");
        };
        assert_eq!(cmd.member_id, "2190");
        assert_eq!(cmd.amount, 500);
        assert_eq!(cmd.date.as_deref(), Some("2024-04-01"));
        assert!(cmd.sub_category.is_none());
    }

    #[test]
    fn test_parse_donate_rejects_negative_amount() {
        let result = Cli::try_parse_from([
            "trustreg",
            "donate",
            "2190",
            "--amount",
            "-5",
            "--category",
            "general",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_approve_scheme() {
        let cli = Cli::try_parse_from([
            "trustreg",
            "approve-scheme",
            "3321",
            "--scheme",
            "Dikri Yojana",
            "--amount",
            "11000",
        ])
        .unwrap();

        let Command::ApproveScheme(cmd) = cli.command else {
            panic!("expected approve-scheme");
        };
        assert_eq!(cmd.scheme, "Dikri Yojana");
        assert_eq!(cmd.amount, 11000);
    }

    #[test]
    fn test_parse_with_config() {
        let cli = Cli::try_parse_from(["trustreg", "-c", "/custom/config.toml", "status"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_global_flags_after_command() {
        let cli = Cli::try_parse_from(["trustreg", "status", "-vv", "--json"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Status(StatusCommand { json: true })));
    }

    #[test]
    fn test_parse_config_validate() {
        let cli =
            Cli::try_parse_from(["trustreg", "config", "validate", "-f", "/tmp/x.toml"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }
}
