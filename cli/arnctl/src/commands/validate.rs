//! Validate command: structural checks without decomposition.

use anyhow::Result;
use arnkit_arn::validate;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tracing::debug;

use crate::error::CliError;
use crate::input;
use crate::output::{display_bool, display_field, print_output, print_success, OutputFormat};

use super::CommandContext;

/// Check that ARNs are well formed.
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// ARNs to check. Read from stdin, one per line, when omitted.
    arns: Vec<String>,
}

#[derive(Debug, Serialize, Tabled)]
struct ValidationView {
    #[tabled(rename = "ARN")]
    arn: String,

    #[tabled(rename = "Valid", display = "display_bool")]
    valid: bool,

    #[tabled(rename = "Error", display = "display_field")]
    #[serde(skip_serializing_if = "String::is_empty")]
    error: String,
}

fn check(raw: String) -> ValidationView {
    match validate(&raw) {
        Ok(()) => ValidationView {
            arn: raw,
            valid: true,
            error: String::new(),
        },
        Err(e) => ValidationView {
            arn: raw,
            valid: false,
            error: e.to_string(),
        },
    }
}

impl ValidateCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        let views: Vec<ValidationView> = input::collect(self.arns)?
            .into_iter()
            .map(check)
            .collect();

        let invalid = views.iter().filter(|v| !v.valid).count();
        debug!(total = views.len(), invalid, "validated ARNs");

        print_output(&views, ctx.format);

        if invalid > 0 {
            return Err(CliError::ValidationFailed {
                invalid,
                total: views.len(),
            }
            .into());
        }

        if ctx.format == OutputFormat::Table {
            print_success(&format!("{} ARNs are valid", views.len()));
        }
        Ok(())
    }
}
