//! Flat grammar: every field present, `"none"` when not found.
//!
//! Older dashboards read this shape for both families. It classifies with the
//! level markers instead of the sub-type rules and adds the numeric feeder ID.

use regex::Regex;
use std::sync::LazyLock;

use super::base;
use crate::classifier::classify;
use crate::types::{FlatEvent, NONE_SENTINEL};

static RE_FEEDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Feeder\s+([A-Z][0-9]{1,3}|R[0-9]{1,3})(?-u:\b)").unwrap());

static RE_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)(Head[0-9]+)").unwrap());

static RE_FEEDER_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"FeederID\(([0-9]+)\)").unwrap());

static RE_PART_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Part\s+([A-Za-z0-9_.]+)").unwrap());

static RE_PART_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Part\(([^\r\n]*?)\)").unwrap());

/// Parse one line into the flat record shape.
pub fn parse_line(line: &str) -> Option<FlatEvent> {
    let parts = base::split_line(line)?;
    let message = parts.message;

    let part = capture(&RE_PART_WORD, message).or_else(|| capture(&RE_PART_PAREN, message));

    Some(FlatEvent {
        datetime: format!("{}T{}", parts.date, parts.time),
        message: message.trim().to_string(),
        kind: classify(message),
        feeder: or_none(capture(&RE_FEEDER, message)),
        head: or_none(capture(&RE_HEAD, message)),
        feeder_id: or_none(capture(&RE_FEEDER_ID, message)),
        part: or_none(part),
    })
}

fn capture(re: &Regex, message: &str) -> Option<String> {
    re.captures(message).map(|c| c[1].trim().to_string())
}

fn or_none(value: Option<String>) -> String {
    value.unwrap_or_else(|| NONE_SENTINEL.to_string())
}
