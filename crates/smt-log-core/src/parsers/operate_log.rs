//! Operate-log grammar: `MM/DD/YY HH:MM:SS message` into [`OperateEvent`].

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

use super::{base, detail};
use crate::types::OperateEvent;

// Feeder label with one whitespace character on each side.
static RE_FEEDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s[RF][0-9]{1,3}\s").unwrap());

/// How the operate-log feeder match is stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeederCapture {
    /// Surrounding whitespace removed: `"F12"`.
    #[default]
    Trimmed,
    /// Matched text as-is, delimiters included: `" F12 "`.
    Raw,
}

/// Parse one operate-log line. Returns `None` for lines outside the base grammar.
pub fn parse_line(line: &str, capture: FeederCapture) -> Option<OperateEvent> {
    let parts = base::split_line(line)?;
    let message = parts.message;

    let feeder = RE_FEEDER.find(message).map(|m| match capture {
        FeederCapture::Trimmed => m.as_str().trim().to_string(),
        FeederCapture::Raw => m.as_str().to_string(),
    });

    Some(OperateEvent {
        datetime: format!("{}T{}", parts.date, parts.time),
        message: message.trim().to_string(),
        feeder,
        detail: detail::detect(message),
    })
}
