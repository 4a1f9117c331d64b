//! Event types produced from equipment log lines.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::LogError;

// ── Level ─────────────────────────────────────────────────────

/// Severity/category of an error-log line, derived from marker substrings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Info,
    Warning,
    Error,
    Freeze,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Freeze => "FREEZE",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Log Family ────────────────────────────────────────────────

/// The two log files a machine produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFamily {
    /// `Error.log`: warnings, errors and freezes.
    Error,
    /// `Operate.log`: operation history.
    Operate,
}

impl LogFamily {
    pub const ALL: [LogFamily; 2] = [Self::Error, Self::Operate];

    /// File stem shared by the input log and the output JSON.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Operate => "Operate",
        }
    }
}

impl std::fmt::Display for LogFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_stem())
    }
}

impl FromStr for LogFamily {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "operate" => Ok(Self::Operate),
            other => Err(LogError::Format(format!("unknown log family: {other}"))),
        }
    }
}

// ── Detail ────────────────────────────────────────────────────

/// Clamp transition reported by a clamp event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClampState {
    Unlocked,
    Locked,
}

/// Message-specific sub-type. At most one applies to a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detail {
    PartError { part: String },
    FeederError { feeder: String, part: String },
    ClampEvent { event: ClampState },
}

/// Value of the JSON `type` key for a [`Detail`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetailKind {
    PartError,
    FeederError,
    ClampEvent,
}

impl Detail {
    pub fn kind(&self) -> DetailKind {
        match self {
            Self::PartError { .. } => DetailKind::PartError,
            Self::FeederError { .. } => DetailKind::FeederError,
            Self::ClampEvent { .. } => DetailKind::ClampEvent,
        }
    }

    pub fn part(&self) -> Option<&str> {
        match self {
            Self::PartError { part } | Self::FeederError { part, .. } => Some(part),
            Self::ClampEvent { .. } => None,
        }
    }

    /// Feeder captured by the sub-type rule. Takes precedence over the
    /// whole-line feeder in the emitted JSON.
    pub fn feeder(&self) -> Option<&str> {
        match self {
            Self::FeederError { feeder, .. } => Some(feeder),
            Self::PartError { .. } | Self::ClampEvent { .. } => None,
        }
    }

    pub fn clamp(&self) -> Option<ClampState> {
        match self {
            Self::ClampEvent { event } => Some(*event),
            Self::PartError { .. } | Self::FeederError { .. } => None,
        }
    }

    fn from_wire(
        kind: DetailKind,
        feeder: Option<String>,
        part: Option<String>,
        event: Option<ClampState>,
    ) -> Result<Self, String> {
        match (kind, feeder, part, event) {
            (DetailKind::PartError, _, Some(part), _) => Ok(Self::PartError { part }),
            (DetailKind::FeederError, Some(feeder), Some(part), _) => {
                Ok(Self::FeederError { feeder, part })
            }
            (DetailKind::ClampEvent, _, _, Some(event)) => Ok(Self::ClampEvent { event }),
            (kind, ..) => Err(format!("incomplete {kind:?} fields")),
        }
    }
}

// ── Error Event ───────────────────────────────────────────────

/// One parsed line of an error log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ErrorEventWire", try_from = "ErrorEventWire")]
pub struct ErrorEvent {
    /// `MM/DD/YY HH:MM:SS`, verbatim from the line.
    pub timestamp: String,
    pub level: Level,
    pub message: String,
    /// Whole-token `F`/`R` feeder label, empty when absent.
    pub feeder: String,
    /// `HeadN` label, `"Unknown"` when absent.
    pub head: String,
    pub detail: Option<Detail>,
}

#[derive(Serialize, Deserialize)]
struct ErrorEventWire {
    timestamp: String,
    level: Level,
    message: String,
    feeder: String,
    head: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<DetailKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    part: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    event: Option<ClampState>,
}

impl From<ErrorEvent> for ErrorEventWire {
    fn from(e: ErrorEvent) -> Self {
        let detail = e.detail.as_ref();
        Self {
            feeder: detail
                .and_then(Detail::feeder)
                .map_or(e.feeder, String::from),
            kind: detail.map(Detail::kind),
            part: detail.and_then(Detail::part).map(String::from),
            event: detail.and_then(Detail::clamp),
            timestamp: e.timestamp,
            level: e.level,
            message: e.message,
            head: e.head,
        }
    }
}

impl TryFrom<ErrorEventWire> for ErrorEvent {
    type Error = String;

    fn try_from(w: ErrorEventWire) -> Result<Self, Self::Error> {
        let detail = w
            .kind
            .map(|kind| Detail::from_wire(kind, Some(w.feeder.clone()), w.part, w.event))
            .transpose()?;
        Ok(Self {
            timestamp: w.timestamp,
            level: w.level,
            message: w.message,
            feeder: w.feeder,
            head: w.head,
            detail,
        })
    }
}

// ── Operate Event ─────────────────────────────────────────────

/// One parsed line of an operate log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "OperateEventWire", try_from = "OperateEventWire")]
pub struct OperateEvent {
    /// `MM/DD/YYTHH:MM:SS`, verbatim date and time joined by `T`.
    pub datetime: String,
    pub message: String,
    /// First whitespace-delimited `F`/`R` label in the message.
    pub feeder: Option<String>,
    pub detail: Option<Detail>,
}

#[derive(Serialize, Deserialize)]
struct OperateEventWire {
    datetime: String,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    feeder: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<DetailKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    part: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    event: Option<ClampState>,
}

impl From<OperateEvent> for OperateEventWire {
    fn from(e: OperateEvent) -> Self {
        let detail = e.detail.as_ref();
        Self {
            feeder: detail
                .and_then(Detail::feeder)
                .map(String::from)
                .or(e.feeder),
            kind: detail.map(Detail::kind),
            part: detail.and_then(Detail::part).map(String::from),
            event: detail.and_then(Detail::clamp),
            datetime: e.datetime,
            message: e.message,
        }
    }
}

impl TryFrom<OperateEventWire> for OperateEvent {
    type Error = String;

    fn try_from(w: OperateEventWire) -> Result<Self, Self::Error> {
        let detail = w
            .kind
            .map(|kind| Detail::from_wire(kind, w.feeder.clone(), w.part, w.event))
            .transpose()?;
        Ok(Self {
            datetime: w.datetime,
            message: w.message,
            feeder: w.feeder,
            detail,
        })
    }
}

// ── Flat Event ────────────────────────────────────────────────

/// Placeholder for fields the flat grammar could not find.
pub const NONE_SENTINEL: &str = "none";

/// Flat record shape: every field always present, `"none"` when not found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatEvent {
    pub datetime: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: Level,
    pub feeder: String,
    pub head: String,
    #[serde(rename = "feederID")]
    pub feeder_id: String,
    pub part: String,
}

// ── Machine Event ─────────────────────────────────────────────

/// Any parsed event, serialized exactly as the wrapped record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MachineEvent {
    Error(ErrorEvent),
    Operate(OperateEvent),
    Flat(FlatEvent),
}

impl MachineEvent {
    pub fn message(&self) -> &str {
        match self {
            Self::Error(e) => &e.message,
            Self::Operate(e) => &e.message,
            Self::Flat(e) => &e.message,
        }
    }

    /// Date and time as written into the JSON record.
    pub fn stamp(&self) -> &str {
        match self {
            Self::Error(e) => &e.timestamp,
            Self::Operate(e) => &e.datetime,
            Self::Flat(e) => &e.datetime,
        }
    }
}
