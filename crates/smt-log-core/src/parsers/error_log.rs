//! Error-log grammar: `MM/DD/YY HH:MM:SS message` into [`ErrorEvent`].

use regex::Regex;
use std::sync::LazyLock;

use super::{base, detail};
use crate::classifier::classify;
use crate::types::ErrorEvent;

/// Reported when the message names no placement head.
pub const UNKNOWN_HEAD: &str = "Unknown";

// Whole-token feeder or rail label: F12, R3.
static RE_FEEDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)([FR][0-9]{1,3})(?:\s|$)").unwrap());

static RE_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)(Head[0-9]+)").unwrap());

/// Parse one error-log line. Returns `None` for lines outside the base grammar.
pub fn parse_line(line: &str) -> Option<ErrorEvent> {
    let parts = base::split_line(line)?;
    let message = parts.message;

    let feeder = RE_FEEDER
        .captures(message)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_default();
    let head = RE_HEAD
        .captures(message)
        .map_or_else(|| UNKNOWN_HEAD.to_string(), |c| c[1].trim().to_string());

    Some(ErrorEvent {
        timestamp: format!("{} {}", parts.date, parts.time),
        level: classify(message),
        message: message.trim().to_string(),
        feeder,
        head,
        detail: detail::detect(message),
    })
}
