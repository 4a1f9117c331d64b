//! Equipment log conversion for pick-and-place machines.
//!
//! Turns raw `Error.log` / `Operate.log` text into ordered JSON event arrays:
//! a marker-based line classifier, the per-family line grammars, `LogSource`
//! and `EventSink` seams for testability, the batch converter, and summaries
//! over parsed events.

pub mod classifier;
pub mod convert;
pub mod error;
pub mod mock;
pub mod parsers;
pub mod sink;
pub mod source;
pub mod summary;
pub mod types;

// Re-export key types for convenience
pub use classifier::classify;
pub use convert::{ConvertOutcome, convert, to_pretty_json};
pub use error::{LogError, LogResult};
pub use mock::{MemorySink, MockLogSource};
pub use parsers::{FeederCapture, GrammarStyle, ParseOptions, parse_line, parse_text};
pub use sink::{EventSink, FileSink};
pub use source::{FileLogSource, LogSource};
pub use types::{
    ClampState, Detail, ErrorEvent, FlatEvent, Level, LogFamily, MachineEvent, OperateEvent,
};
