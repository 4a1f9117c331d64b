//! Base line grammar shared by every log family: `MM/DD/YY HH:MM:SS message`.

use regex::Regex;
use std::sync::LazyLock;

// Date, one space, time, one space, rest of the line.
static RE_BASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{2}/[0-9]{2}/[0-9]{2}) ([0-9]{2}:[0-9]{2}:[0-9]{2}) ([^\r\n]*)").unwrap()
});

/// The three tokens of a well-formed log line, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineParts<'a> {
    pub date: &'a str,
    pub time: &'a str,
    /// Untrimmed remainder after the time token.
    pub message: &'a str,
}

/// Split a raw line into date, time and message.
///
/// Returns `None` for lines that do not start with a date and time.
pub fn split_line(line: &str) -> Option<LineParts<'_>> {
    let caps = RE_BASE.captures(line)?;
    Some(LineParts {
        date: caps.get(1)?.as_str(),
        time: caps.get(2)?.as_str(),
        message: caps.get(3)?.as_str(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_well_formed_line() {
        let parts = split_line("01/15/24 08:30:05 Head3 Clamp Locked").unwrap();
        assert_eq!(parts.date, "01/15/24");
        assert_eq!(parts.time, "08:30:05");
        assert_eq!(parts.message, "Head3 Clamp Locked");
    }

    #[test]
    fn message_keeps_surrounding_whitespace() {
        let parts = split_line("01/15/24 08:30:05   padded  ").unwrap();
        assert_eq!(parts.message, "  padded  ");
    }

    #[test]
    fn empty_message_is_allowed() {
        let parts = split_line("01/15/24 08:30:05 ").unwrap();
        assert_eq!(parts.message, "");
    }

    #[test]
    fn carriage_return_is_not_part_of_message() {
        let parts = split_line("01/15/24 08:30:05 Board in\r").unwrap();
        assert_eq!(parts.message, "Board in");
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(split_line("").is_none());
        assert!(split_line("not a log line").is_none());
        assert!(split_line("01/15/24 08:30:05").is_none());
        assert!(split_line("1/15/24 08:30:05 short month").is_none());
        assert!(split_line("01/15/2024 08:30:05 four digit year").is_none());
        assert!(split_line("01-15-24 08:30:05 dashes").is_none());
    }

    #[test]
    fn date_must_lead_the_line() {
        assert!(split_line("note 01/15/24 08:30:05 late stamp").is_none());
    }

    #[test]
    fn calendar_values_are_not_validated() {
        let parts = split_line("99/99/99 99:99:99 odd").unwrap();
        assert_eq!(parts.date, "99/99/99");
        assert_eq!(parts.time, "99:99:99");
    }
}
