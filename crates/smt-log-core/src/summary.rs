//! Summaries over parsed events: level counts, message codes, board counts,
//! time range and the feeder loading table.
//!
//! Every function is a pure aggregation over a slice of events, so a caller
//! can compute a report per request without shared state.

use chrono::NaiveDateTime;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::types::{ErrorEvent, FlatEvent, Level, NONE_SENTINEL, OperateEvent};

/// Marker the operate log writes once per finished board.
pub const PCB_EVENT_MARKER: &str = "[LMEvent::RID_EVENT_PCB]";

static RE_ERROR_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(\w+)\]").unwrap());

static RE_WARNING_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([a-zA-Z0-9]+)\]").unwrap());

const STAMP_FORMATS: [&str; 2] = ["%m/%d/%y %H:%M:%S", "%m/%d/%yT%H:%M:%S"];

// ── Counts ────────────────────────────────────────────────────

/// Number of events at each level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LevelCounts {
    pub info: usize,
    pub warning: usize,
    pub error: usize,
    pub freeze: usize,
}

impl LevelCounts {
    pub fn get(&self, level: Level) -> usize {
        match level {
            Level::Info => self.info,
            Level::Warning => self.warning,
            Level::Error => self.error,
            Level::Freeze => self.freeze,
        }
    }

    fn bump(&mut self, level: Level) {
        let slot = match level {
            Level::Info => &mut self.info,
            Level::Warning => &mut self.warning,
            Level::Error => &mut self.error,
            Level::Freeze => &mut self.freeze,
        };
        *slot += 1;
    }
}

pub fn level_counts(events: &[ErrorEvent]) -> LevelCounts {
    let mut counts = LevelCounts::default();
    for event in events {
        counts.bump(event.level);
    }
    counts
}

pub fn warning_count(events: &[ErrorEvent]) -> usize {
    events.iter().filter(|e| e.level == Level::Warning).count()
}

/// Warnings on heads whose label contains `head`, optionally limited to one feeder.
pub fn filtered_warning_count(events: &[ErrorEvent], head: &str, feeder: Option<&str>) -> usize {
    events
        .iter()
        .filter(|e| e.level == Level::Warning)
        .filter(|e| e.head.contains(head))
        .filter(|e| feeder.is_none_or(|f| e.feeder == f))
        .count()
}

/// Boards completed, counted from PCB event markers.
pub fn completed_boards(events: &[OperateEvent]) -> usize {
    events
        .iter()
        .filter(|e| e.message.contains(PCB_EVENT_MARKER))
        .count()
}

// ── Message codes ─────────────────────────────────────────────

/// Occurrences of one bracketed message code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeCount {
    pub code: String,
    pub count: usize,
}

/// Tally codes, keeping first-seen order.
fn tally<I>(codes: I) -> Vec<CodeCount>
where
    I: IntoIterator<Item = String>,
{
    let mut out: Vec<CodeCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for code in codes {
        match index.get(&code) {
            Some(&i) => out[i].count += 1,
            None => {
                index.insert(code.clone(), out.len());
                out.push(CodeCount { code, count: 1 });
            }
        }
    }
    out
}

/// First bracketed code in each message, e.g. `E2011` in `[E2011]`.
///
/// Messages without a code are not counted.
pub fn error_code_counts(events: &[ErrorEvent]) -> Vec<CodeCount> {
    tally(
        events
            .iter()
            .filter_map(|e| RE_ERROR_CODE.captures(&e.message))
            .map(|c| c[1].to_string()),
    )
}

/// First alphanumeric bracketed code of each warning.
///
/// Warnings without a code are counted under the empty string.
pub fn warning_code_counts(events: &[ErrorEvent]) -> Vec<CodeCount> {
    tally(
        events
            .iter()
            .filter(|e| e.level == Level::Warning)
            .map(|e| {
                RE_WARNING_CODE
                    .captures(&e.message)
                    .map(|c| c[1].to_string())
                    .unwrap_or_default()
            }),
    )
}

// ── Time range ────────────────────────────────────────────────

/// Parse an event stamp in either the error (`" "`) or operate (`"T"`) layout.
pub fn parse_stamp(stamp: &str) -> Option<NaiveDateTime> {
    STAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(stamp, fmt).ok())
}

/// Earliest and latest parseable stamp, and the working time between them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub earliest: Option<NaiveDateTime>,
    pub latest: Option<NaiveDateTime>,
    pub duration_secs: Option<i64>,
}

/// Stamps that do not form a valid calendar date are ignored.
pub fn time_range<'a, I>(stamps: I) -> TimeRange
where
    I: IntoIterator<Item = &'a str>,
{
    let parsed: Vec<NaiveDateTime> = stamps.into_iter().filter_map(parse_stamp).collect();
    let earliest = parsed.iter().min().copied();
    let latest = parsed.iter().max().copied();
    let duration_secs = earliest
        .zip(latest)
        .map(|(first, last)| (last - first).num_seconds());
    TimeRange {
        earliest,
        latest,
        duration_secs,
    }
}

// ── Feeder loading table ──────────────────────────────────────

/// Part currently loaded on a feeder, with its numeric feeder ID when known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeederAssignment {
    pub feeder: String,
    #[serde(rename = "feederID", skip_serializing_if = "Option::is_none")]
    pub feeder_id: Option<String>,
    pub part: String,
}

struct Latest<'a> {
    part: &'a str,
    at: Option<NaiveDateTime>,
}

/// Record `part` for `key`, replacing an earlier assignment only when the
/// new event is strictly later.
fn keep_latest<'a>(
    order: &mut Vec<&'a str>,
    map: &mut HashMap<&'a str, Latest<'a>>,
    key: &'a str,
    part: &'a str,
    at: Option<NaiveDateTime>,
) {
    match map.get_mut(key) {
        None => {
            order.push(key);
            map.insert(key, Latest { part, at });
        }
        Some(current) => {
            if let (Some(new), Some(old)) = (at, current.at)
                && new > old
            {
                *current = Latest { part, at };
            }
        }
    }
}

/// Build the feeder → part table from flat records.
///
/// Records naming a feeder label give the part per feeder; records naming
/// only a feeder ID are attached to the feeder holding the same part.
/// Feeders are listed in first-seen order.
pub fn feeder_parts(events: &[FlatEvent]) -> Vec<FeederAssignment> {
    let mut feeder_order = Vec::new();
    let mut by_feeder = HashMap::new();
    let mut id_order = Vec::new();
    let mut by_id = HashMap::new();

    for e in events {
        if e.part == NONE_SENTINEL {
            continue;
        }
        let at = parse_stamp(&e.datetime);
        let has_feeder = e.feeder != NONE_SENTINEL;
        let has_id = e.feeder_id.trim() != NONE_SENTINEL;
        if has_feeder && !has_id {
            keep_latest(&mut feeder_order, &mut by_feeder, &e.feeder, &e.part, at);
        } else if has_id && !has_feeder {
            keep_latest(&mut id_order, &mut by_id, &e.feeder_id, &e.part, at);
        }
    }

    let mut table: Vec<FeederAssignment> = feeder_order
        .iter()
        .map(|feeder| FeederAssignment {
            feeder: (*feeder).to_string(),
            feeder_id: None,
            part: by_feeder[feeder].part.to_string(),
        })
        .collect();

    for id in id_order {
        let part = by_id[id].part;
        if let Some(row) = table.iter_mut().find(|row| row.part == part) {
            row.feeder_id = Some(id.to_string());
        }
    }
    table
}

// ── Reports ───────────────────────────────────────────────────

/// Dashboard figures for one machine's error log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorSummary {
    pub total: usize,
    pub levels: LevelCounts,
    pub warning_codes: Vec<CodeCount>,
    pub error_codes: Vec<CodeCount>,
    pub time_range: TimeRange,
}

impl ErrorSummary {
    pub fn from_events(events: &[ErrorEvent]) -> Self {
        Self {
            total: events.len(),
            levels: level_counts(events),
            warning_codes: warning_code_counts(events),
            error_codes: error_code_counts(events),
            time_range: time_range(events.iter().map(|e| e.timestamp.as_str())),
        }
    }
}

/// Dashboard figures for one machine's operate log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperateSummary {
    pub total: usize,
    pub completed_boards: usize,
    pub time_range: TimeRange,
}

impl OperateSummary {
    pub fn from_events(events: &[OperateEvent]) -> Self {
        Self {
            total: events.len(),
            completed_boards: completed_boards(events),
            time_range: time_range(events.iter().map(|e| e.datetime.as_str())),
        }
    }
}
