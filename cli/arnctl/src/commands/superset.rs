//! Superset command: does a wildcard ARN cover other ARNs?

use anyhow::Result;
use arnkit_arn::{Arn, ArnPattern};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tracing::debug;

use crate::error::CliError;
use crate::input;
use crate::output::{display_bool, print_output};

use super::CommandContext;

/// Check whether a wildcard ARN covers other ARNs.
#[derive(Debug, Args)]
pub struct SupersetCommand {
    /// Pattern ARN; `*` and `?` are wildcards.
    pattern: String,

    /// Candidate ARNs. Read from stdin, one per line, when omitted.
    candidates: Vec<String>,

    /// Also report whether each candidate covers the pattern.
    #[arg(long)]
    both: bool,

    /// Exit with an error if any candidate is not covered.
    #[arg(long)]
    require: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct SupersetView {
    #[tabled(rename = "Candidate")]
    candidate: String,

    #[tabled(rename = "Covered", display = "display_bool")]
    covered: bool,

    #[tabled(rename = "Covers pattern", display = "display_reverse")]
    #[serde(skip_serializing_if = "Option::is_none")]
    reverse: Option<bool>,
}

fn display_reverse(reverse: &Option<bool>) -> String {
    reverse.as_ref().map(display_bool).unwrap_or_else(|| "-".to_string())
}

fn compare(pattern: &ArnPattern, candidate: &Arn, both: bool) -> SupersetView {
    SupersetView {
        candidate: candidate.to_string(),
        covered: pattern.matches(candidate),
        reverse: both.then(|| candidate.is_superset_of(pattern.arn())),
    }
}

impl SupersetCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        let arn = Arn::parse(&self.pattern).map_err(|e| CliError::invalid_arn(&self.pattern, e))?;
        let pattern = ArnPattern::new(&arn);

        let mut views = Vec::new();
        for raw in input::collect(self.candidates)? {
            let candidate = Arn::parse(&raw).map_err(|e| CliError::invalid_arn(&raw, e))?;
            let view = compare(&pattern, &candidate, self.both);
            debug!(pattern = %arn, candidate = %candidate, covered = view.covered, "compared ARNs");
            views.push(view);
        }

        print_output(&views, ctx.format);

        let uncovered = views.iter().filter(|v| !v.covered).count();
        if self.require && uncovered > 0 {
            return Err(CliError::NotCovered {
                pattern: self.pattern,
                uncovered,
                total: views.len(),
            }
            .into());
        }

        Ok(())
    }
}
