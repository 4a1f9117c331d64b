//! Batch conversion of one raw log file into a JSON array document.

use serde::Serialize;

use crate::error::{LogError, LogResult};
use crate::parsers::{self, ParseOptions};
use crate::sink::EventSink;
use crate::source::LogSource;
use crate::types::{LogFamily, MachineEvent};

/// What happened to a single input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConvertOutcome {
    /// Output written. `lines` counts non-blank input lines.
    Written { lines: usize, events: usize },
    /// Input file missing, nothing written.
    Skipped,
}

/// Serialize events as a JSON array with two-space indentation.
pub fn to_pretty_json(events: &[MachineEvent]) -> LogResult<String> {
    Ok(serde_json::to_string_pretty(events)?)
}

/// Convert `input` into a JSON document at `output`.
///
/// Any previous document at `output` is removed first, so a missing input
/// leaves no output behind. Malformed lines are dropped silently; a missing
/// input is logged and reported as [`ConvertOutcome::Skipped`]. Other read
/// errors and write failures are returned.
pub async fn convert(
    source: &dyn LogSource,
    sink: &dyn EventSink,
    input: &str,
    output: &str,
    family: LogFamily,
    options: &ParseOptions,
) -> LogResult<ConvertOutcome> {
    if sink.remove(output).await? {
        tracing::debug!(path = %output, "removed previous output");
    }

    let text = match source.read_to_string(input).await {
        Ok(text) => text,
        Err(LogError::NotFound(path)) => {
            tracing::warn!(path = %path, family = %family, "log file not found, skipping");
            return Ok(ConvertOutcome::Skipped);
        }
        Err(e) => return Err(e),
    };

    let lines = text.split('\n').filter(|l| !l.trim().is_empty()).count();
    tracing::info!(path = %input, family = %family, lines, "read log file");

    let events = parsers::parse_text(&text, family, options);
    let body = to_pretty_json(&events)?;
    sink.write(output, &body).await?;

    tracing::info!(
        path = %output,
        events = events.len(),
        dropped = lines - events.len(),
        "wrote events"
    );

    Ok(ConvertOutcome::Written {
        lines,
        events: events.len(),
    })
}
