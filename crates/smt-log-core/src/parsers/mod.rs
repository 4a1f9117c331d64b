//! Line parsers for pick-and-place equipment logs.
//!
//! Every grammar shares the `MM/DD/YY HH:MM:SS message` base shape. The
//! error and operate grammars add the sub-type rules in [`detail`]; the flat
//! grammar emits the older always-present record shape.

pub mod base;
pub mod detail;
pub mod error_log;
pub mod flat;
pub mod operate_log;

use serde::Deserialize;

use crate::types::{LogFamily, MachineEvent};

pub use operate_log::FeederCapture;

const BOM: char = '\u{feff}';

/// Which record shape to produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrammarStyle {
    /// Error and operate events with optional sub-type fields.
    #[default]
    Structured,
    /// Flat records with `"none"` placeholders, for both families.
    Flat,
}

/// Grammar selection shared by every line of a conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ParseOptions {
    #[serde(default)]
    pub style: GrammarStyle,
    #[serde(default)]
    pub operate_feeder: FeederCapture,
}

/// Parse a single line of the given family.
///
/// Returns `None` if the line is not a log entry.
pub fn parse_line(line: &str, family: LogFamily, options: &ParseOptions) -> Option<MachineEvent> {
    match (options.style, family) {
        (GrammarStyle::Flat, _) => flat::parse_line(line).map(MachineEvent::Flat),
        (GrammarStyle::Structured, LogFamily::Error) => {
            error_log::parse_line(line).map(MachineEvent::Error)
        }
        (GrammarStyle::Structured, LogFamily::Operate) => {
            operate_log::parse_line(line, options.operate_feeder).map(MachineEvent::Operate)
        }
    }
}

/// Parse a whole log file body.
///
/// Splits on `\n`, skips blank lines, drops lines that are not log entries,
/// and keeps the remaining events in file order. A leading byte-order mark
/// is ignored.
pub fn parse_text(text: &str, family: LogFamily, options: &ParseOptions) -> Vec<MachineEvent> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    text.split('\n')
        .filter(|l| !l.trim().is_empty())
        .filter_map(|line| parse_line(line, family, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ERROR_LOG: &str = "01/15/24 08:30:05 WARNING [W0412] Vacuum level low F3\n\
        \n\
        not a log line\n\
        01/15/24 08:31:10 Head3 Clamp Locked\r\n\
        \t  \n\
        01/15/24 08:32:00 ERROR [E2011] Nozzle missing Head1\n";

    #[test]
    fn parse_text_keeps_order_and_drops_noise() {
        let events = parse_text(ERROR_LOG, LogFamily::Error, &ParseOptions::default());
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].stamp(), "01/15/24 08:30:05");
        assert_eq!(events[1].message(), "Head3 Clamp Locked");
        assert_eq!(events[2].stamp(), "01/15/24 08:32:00");
    }

    #[test]
    fn family_selects_grammar() {
        let line = "01/15/24 08:30:05 Board in";
        let options = ParseOptions::default();
        assert!(matches!(
            parse_line(line, LogFamily::Error, &options),
            Some(MachineEvent::Error(_))
        ));
        assert!(matches!(
            parse_line(line, LogFamily::Operate, &options),
            Some(MachineEvent::Operate(_))
        ));
    }

    #[test]
    fn flat_style_applies_to_both_families() {
        let options = ParseOptions {
            style: GrammarStyle::Flat,
            ..ParseOptions::default()
        };
        for family in LogFamily::ALL {
            let event = parse_line("01/15/24 08:30:05 Board in", family, &options);
            assert!(matches!(event, Some(MachineEvent::Flat(_))));
        }
    }

    #[test]
    fn stamps_use_family_joiner() {
        let options = ParseOptions::default();
        let error = parse_line("12/31/99 23:59:59 x", LogFamily::Error, &options).unwrap();
        let operate = parse_line("12/31/99 23:59:59 x", LogFamily::Operate, &options).unwrap();
        assert_eq!(error.stamp(), "12/31/99 23:59:59");
        assert_eq!(operate.stamp(), "12/31/99T23:59:59");
    }

    #[test]
    fn leading_byte_order_mark_is_ignored() {
        let text = "\u{feff}01/15/24 08:30:05 WARNING first\n01/15/24 08:30:06 second\n";
        let events = parse_text(text, LogFamily::Error, &ParseOptions::default());
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].stamp(), "01/15/24 08:30:05");
        assert_eq!(events[0].message(), "WARNING first");
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert!(parse_text("", LogFamily::Operate, &ParseOptions::default()).is_empty());
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: ParseOptions = serde_json::from_str(r#"{"operate_feeder":"raw"}"#).unwrap();
        assert_eq!(options.style, GrammarStyle::Structured);
        assert_eq!(options.operate_feeder, FeederCapture::Raw);
    }
}
