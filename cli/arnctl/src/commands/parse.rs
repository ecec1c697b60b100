//! Parse command: break ARNs into components.

use anyhow::Result;
use arnkit_arn::{Arn, ResourceDelimiter};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tracing::debug;

use crate::error::CliError;
use crate::input;
use crate::output::{display_bool, display_field, print_output};

use super::CommandContext;

/// Break ARNs into their components.
#[derive(Debug, Args)]
pub struct ParseCommand {
    /// ARNs to parse. Read from stdin, one per line, when omitted.
    arns: Vec<String>,
}

#[derive(Debug, Serialize, Tabled)]
struct ArnView {
    #[tabled(rename = "Scheme", display = "display_field")]
    scheme: String,

    #[tabled(rename = "Partition", display = "display_field")]
    partition: String,

    #[tabled(rename = "Service", display = "display_field")]
    service: String,

    #[tabled(rename = "Region", display = "display_field")]
    region: String,

    #[tabled(rename = "Account", display = "display_field")]
    account_id: String,

    #[tabled(rename = "Type", display = "display_field")]
    resource_type: String,

    #[tabled(rename = "Delim", display = "display_delimiter")]
    resource_delimiter: ResourceDelimiter,

    #[tabled(rename = "Resource", display = "display_field")]
    resource: String,

    #[tabled(rename = "Round-trip", display = "display_bool")]
    roundtrip: bool,
}

impl ArnView {
    fn new(input: &str, arn: &Arn) -> Self {
        Self {
            scheme: arn.scheme().to_string(),
            partition: arn.partition().to_string(),
            service: arn.service().to_string(),
            region: arn.region().to_string(),
            account_id: arn.account_id().to_string(),
            resource_type: arn.resource_type().to_string(),
            resource_delimiter: arn.resource_delimiter(),
            resource: arn.resource().to_string(),
            roundtrip: arn.to_string() == input,
        }
    }
}

fn display_delimiter(delimiter: &ResourceDelimiter) -> String {
    display_field(delimiter.as_str())
}

impl ParseCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        let inputs = input::collect(self.arns)?;

        let mut views = Vec::with_capacity(inputs.len());
        for raw in &inputs {
            let arn = Arn::parse(raw).map_err(|e| CliError::invalid_arn(raw, e))?;
            debug!(arn = %arn, resource_type = arn.resource_type(), "parsed ARN");
            views.push(ArnView::new(raw, &arn));
        }

        print_output(&views, ctx.format);
        Ok(())
    }
}
