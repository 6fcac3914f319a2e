use std::io::{BufRead, Write};

use audience_core::{parse_command_line, AudienceEstimate, AudienceSession, CommandParseError};
use clap::ValueEnum;
use color_eyre::Result;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per applied command.
    Json,
    /// One human-readable summary line per applied command.
    Summary,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub applied: usize,
    pub rejected: usize,
}

#[derive(Serialize)]
struct EstimateLine<'a> {
    line: usize,
    command: &'a str,
    estimate: &'a AudienceEstimate,
}

/// Feed every command line from `input` into the session, writing the
/// resulting estimate after each one. Bad lines are logged and skipped.
pub fn run_commands<R, W>(
    session: &mut AudienceSession,
    input: R,
    mut output: W,
    format: OutputFormat,
) -> Result<RunStats>
where
    R: BufRead,
    W: Write,
{
    let mut stats = RunStats::default();
    for (idx, line) in input.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let command = match parse_command_line(&line) {
            Ok(command) => command,
            Err(CommandParseError::Empty) => continue,
            Err(err) => {
                warn!(line = line_no, input = line.trim(), error = %err, "command.rejected");
                stats.rejected += 1;
                continue;
            }
        };
        let verb = command.verb();
        let estimate = session.apply(command);
        stats.applied += 1;
        write_estimate(&mut output, line_no, verb, &estimate, format)?;
    }
    output.flush()?;
    Ok(stats)
}

pub fn write_estimate<W: Write>(
    output: &mut W,
    line: usize,
    command: &str,
    estimate: &AudienceEstimate,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let record = EstimateLine {
                line,
                command,
                estimate,
            };
            serde_json::to_writer(&mut *output, &record)?;
            writeln!(output)?;
        }
        OutputFormat::Summary => writeln!(output, "{command:>12} | {estimate}")?,
    }
    Ok(())
}
