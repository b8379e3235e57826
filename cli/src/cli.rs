// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, ffi::OsString, path::PathBuf, process::ExitCode};

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use crate::cmd_encode::CmdEncode;
use crate::cmd_generate_completion::CmdGenerateCompletion;
use crate::config::parse_config;

/// Name of the application, used for the config directory.
pub const APP_NAME: &str = "versit";

/// Run the versit command-line interface.
pub fn run() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let result = Cli::parse().and_then(Cli::run);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            ExitCode::FAILURE
        }
    }
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Write vCard and iCalendar files from TOML descriptions.")
            .author("Zexin Yuan <aim@yzx9.xyz>")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $VERSIT_CONFIG, then \
$XDG_CONFIG_HOME/versit/config.toml on Linux and MacOS, \
%APPDATA%/versit/config.toml on Windows.",
                    )
                    .global(true)
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(CmdEncode::command())
            .subcommand(CmdGenerateCompletion::command())
    }

    /// Parse the command-line arguments
    ///
    /// # Errors
    ///
    /// Never returns an error for invalid arguments: clap prints the usage
    /// and exits instead.
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Ok(Self::from(&matches))
    }

    /// Parse the specified arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments are invalid.
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Ok(Self::from(&matches))
    }

    /// Create a CLI instance from the `ArgMatches`
    #[must_use]
    pub fn from(matches: &ArgMatches) -> Self {
        let command = match matches.subcommand() {
            Some((CmdEncode::NAME, matches)) => Commands::Encode(CmdEncode::from(matches)),
            Some((CmdGenerateCompletion::NAME, matches)) => {
                Commands::GenerateCompletion(CmdGenerateCompletion::from(matches))
            }
            _ => unreachable!(),
        };

        let config = matches.get_one("config").cloned();
        Cli { config, command }
    }

    /// Run the command
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration, the input or the output fails.
    pub fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config)
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Encode documents described in a TOML file
    Encode(CmdEncode),

    /// Generate shell completion
    GenerateCompletion(CmdGenerateCompletion),
}

impl Commands {
    /// Run the command with the given configuration path
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        match self {
            Commands::Encode(cmd) => {
                tracing::debug!("parsing configuration...");
                let config = parse_config(config)?;
                cmd.run(&config)
            }
            Commands::GenerateCompletion(cmd) => cmd.run(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap_complete::Shell;
    use versit::VersitType;

    use super::*;

    #[test]
    fn test_parse_config() {
        let args = ["test", "-c", "/tmp/config.toml", "encode", "cards.toml"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/config.toml")));
        assert!(matches!(cli.command, Commands::Encode(_)));
    }

    #[test]
    fn test_parse_config_after_subcommand() {
        let args = ["test", "encode", "cards.toml", "--config", "/tmp/config.toml"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/config.toml")));
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["test"]).is_err());
    }

    #[test]
    fn test_parse_encode() {
        let args = [
            "test",
            "encode",
            "cards.toml",
            "-o",
            "cards.vcf",
            "-f",
            "2.1",
            "--charset",
            "latin1",
            "--ascii",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Encode(cmd) => {
                assert_eq!(cmd.input, PathBuf::from("cards.toml"));
                assert_eq!(cmd.output, Some(PathBuf::from("cards.vcf")));
                assert_eq!(cmd.format, Some(VersitType::VCard21));
                assert_eq!(cmd.charset.as_deref(), Some("latin1"));
                assert!(cmd.ascii);
            }
            Commands::GenerateCompletion(_) => panic!("Expected Encode command"),
        }
    }

    #[test]
    fn test_parse_generate_completion() {
        let cli = Cli::try_parse_from(["test", "generate-completion", "zsh"]).unwrap();
        match cli.command {
            Commands::GenerateCompletion(cmd) => assert_eq!(cmd.shell, Shell::Zsh),
            Commands::Encode(_) => panic!("Expected GenerateCompletion command"),
        }
    }
}
