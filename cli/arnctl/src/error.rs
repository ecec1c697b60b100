//! Error handling and display for the CLI.

use arnkit_arn::ArnError;
use colored::Colorize;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid ARN '{input}': {source}")]
    InvalidArn {
        input: String,
        #[source]
        source: ArnError,
    },

    #[error("{invalid} of {total} ARNs failed validation")]
    ValidationFailed { invalid: usize, total: usize },

    #[error("{uncovered} of {total} candidates are not covered by {pattern}")]
    NotCovered {
        pattern: String,
        uncovered: usize,
        total: usize,
    },

    #[error("No ARNs given")]
    NoInput,
}

impl CliError {
    /// Create an invalid-ARN error for the given input.
    pub fn invalid_arn(input: impl Into<String>, source: ArnError) -> Self {
        Self::InvalidArn {
            input: input.into(),
            source,
        }
    }
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        match cli_err {
            CliError::InvalidArn { source, .. } if source.is_malformed() => {
                eprintln!(
                    "\n{}",
                    "Hint: An ARN needs six colon-separated fields: arn:partition:service:region:account-id:resource"
                        .yellow()
                );
            }
            CliError::InvalidArn { source, .. } if source.is_variables_not_supported() => {
                eprintln!(
                    "\n{}",
                    "Hint: Substitute policy variables such as ${aws:username} before checking the ARN."
                        .yellow()
                );
            }
            CliError::NoInput => {
                eprintln!(
                    "\n{}",
                    "Hint: Pass ARNs as arguments or pipe them on stdin, one per line.".yellow()
                );
            }
            _ => {}
        }
    }
}
