//! Message sub-type detection shared by the error and operate grammars.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::{ClampState, Detail};

// Greedy prefix: the part is whatever follows the last "Part ".
static RE_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\r\n]*Part ([^\r\n]*)").unwrap());

static RE_FEEDER_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Feeder ([^\r\n]*) Part ([^\r\n]*)").unwrap());

/// A marker substring and the extractor that runs when the message contains it.
struct DetailRule {
    marker: &'static str,
    extract: fn(&str) -> Option<Detail>,
}

// Evaluated in order. The first rule whose marker matches decides the
// outcome, even when its extractor finds nothing.
static DETAIL_RULES: [DetailRule; 4] = [
    DetailRule {
        marker: "Failed to pick up a part properly",
        extract: part_error,
    },
    DetailRule {
        marker: "The retry count for part pickup was exceeded",
        extract: feeder_error,
    },
    DetailRule {
        marker: "Clamp Unlocked",
        extract: clamp_unlocked,
    },
    DetailRule {
        marker: "Clamp Locked",
        extract: clamp_locked,
    },
];

/// Detect the message sub-type, if any.
pub fn detect(message: &str) -> Option<Detail> {
    DETAIL_RULES
        .iter()
        .find(|rule| message.contains(rule.marker))
        .and_then(|rule| (rule.extract)(message))
}

fn part_error(message: &str) -> Option<Detail> {
    let caps = RE_PART.captures(message)?;
    Some(Detail::PartError {
        part: caps[1].to_string(),
    })
}

fn feeder_error(message: &str) -> Option<Detail> {
    let caps = RE_FEEDER_PART.captures(message)?;
    Some(Detail::FeederError {
        feeder: caps[1].to_string(),
        part: caps[2].to_string(),
    })
}

fn clamp_unlocked(_: &str) -> Option<Detail> {
    Some(Detail::ClampEvent {
        event: ClampState::Unlocked,
    })
}

fn clamp_locked(_: &str) -> Option<Detail> {
    Some(Detail::ClampEvent {
        event: ClampState::Locked,
    })
}
