pub mod dates;
pub mod task_parser;

pub use dates::{DateConfig, ResolvedDate, SpeakingDates, extract_speaking_dates};
pub use task_parser::{ParsedLine, SkipReason, parse};
