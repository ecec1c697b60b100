//! CLI commands.

mod parse;
mod superset;
mod validate;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::output::OutputFormat;

/// arn - Parse, validate, and compare ARNs.
#[derive(Debug, Parser)]
#[command(name = "arn")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format. Defaults to the configured format.
    #[arg(long, global = true, value_enum, env = "ARN_FORMAT")]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Break ARNs into their components.
    Parse(parse::ParseCommand),

    /// Check that ARNs are well formed.
    Validate(validate::ValidateCommand),

    /// Check whether a wildcard ARN covers other ARNs.
    Superset(superset::SupersetCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Run the CLI command.
    pub fn run(self, config: Config) -> Result<()> {
        let ctx = CommandContext {
            format: self.format.unwrap_or(config.format),
        };

        match self.command {
            Commands::Parse(cmd) => cmd.run(&ctx),
            Commands::Validate(cmd) => cmd.run(&ctx),
            Commands::Superset(cmd) => cmd.run(&ctx),
            Commands::Version => {
                println!("arn {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn format_flag_overrides_config() {
        let cli = Cli::try_parse_from(["arn", "--format", "json", "version"]).unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
    }

    #[test]
    fn superset_requires_pattern() {
        assert!(Cli::try_parse_from(["arn", "superset"]).is_err());
    }
}
