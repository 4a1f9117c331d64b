//! Line classifier: maps a log message to its [`Level`].

use crate::types::Level;

// Checked in order; the first marker contained in the message wins.
const LEVEL_MARKERS: [(&str, Level); 3] = [
    ("WARNING", Level::Warning),
    ("ERROR", Level::Error),
    ("FREEZE", Level::Freeze),
];

/// Classify a message by case-sensitive marker substrings.
///
/// Falls back to [`Level::Info`] when no marker is present.
pub fn classify(message: &str) -> Level {
    LEVEL_MARKERS
        .iter()
        .find(|(marker, _)| message.contains(*marker))
        .map_or(Level::Info, |(_, level)| *level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_markers() {
        assert_eq!(classify("WARNING [W1021] vacuum low"), Level::Warning);
        assert_eq!(classify("ERROR [E3001] head crash"), Level::Error);
        assert_eq!(classify("FREEZE conveyor halted"), Level::Freeze);
    }

    #[test]
    fn default_is_info() {
        assert_eq!(classify("Board transferred"), Level::Info);
        assert_eq!(classify(""), Level::Info);
    }

    #[test]
    fn warning_beats_error() {
        assert_eq!(classify("ERROR escalated from WARNING"), Level::Warning);
    }

    #[test]
    fn error_beats_freeze() {
        assert_eq!(classify("FREEZE after ERROR"), Level::Error);
    }

    #[test]
    fn markers_are_case_sensitive() {
        assert_eq!(classify("warning: lowercase"), Level::Info);
        assert_eq!(classify("Error in feeder"), Level::Info);
    }

    #[test]
    fn substring_inside_word_still_matches() {
        assert_eq!(classify("PREWARNINGS"), Level::Warning);
    }

    #[test]
    fn deterministic() {
        let msg = "FREEZE ERROR WARNING";
        assert_eq!(classify(msg), classify(msg));
    }
}
