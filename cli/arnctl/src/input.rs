//! Collecting ARNs from arguments or stdin.

use std::io::{self, BufRead, IsTerminal};

use anyhow::{Context, Result};

use crate::error::CliError;

/// Returns `args` if any were given, otherwise one ARN per non-empty stdin line.
pub fn collect(args: Vec<String>) -> Result<Vec<String>> {
    if !args.is_empty() {
        return Ok(args);
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Err(CliError::NoInput.into());
    }

    let lines = read_lines(stdin.lock()).context("Failed to read ARNs from stdin")?;
    if lines.is_empty() {
        return Err(CliError::NoInput.into());
    }

    Ok(lines)
}

/// Reads lines verbatim apart from the line terminator, skipping blank ones.
///
/// Surrounding spaces are part of the ARN and are kept.
fn read_lines<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let mut line = line?;
        if line.ends_with('\r') {
            line.pop();
        }
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_take_priority() {
        let args = vec!["arn:aws:s3:::bucket".to_string()];
        assert_eq!(collect(args.clone()).unwrap(), args);
    }

    #[test]
    fn read_lines_skips_blank_lines_and_keeps_spaces() {
        let input = "arn:aws:s3:::a\n\n   \n  arn:aws:s3:::b  \r\narn:aws:s3:::c\r";
        let lines = read_lines(input.as_bytes()).unwrap();
        assert_eq!(
            lines,
            vec!["arn:aws:s3:::a", "  arn:aws:s3:::b  ", "arn:aws:s3:::c"]
        );
    }

    #[test]
    fn read_lines_preserves_trailing_space_in_resource() {
        let lines = read_lines("arn:aws:s3:::bucket \n".as_bytes()).unwrap();
        assert_eq!(lines, vec!["arn:aws:s3:::bucket "]);
        let arn = arnkit_arn::Arn::parse(&lines[0]).unwrap();
        assert_eq!(arn.resource(), "bucket ");
    }
}
