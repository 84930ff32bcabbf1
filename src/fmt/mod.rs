//! Line rendering touches colors, timestamps and prefixes; each concern lives in its own module.

mod color;
mod line;
mod timestamp;

pub use color::{ConsoleColor, ParseColorError, paint};
pub use line::{DEFAULT_TAB_SIZE, LineFormatter, TargetKind, split_lines};
pub use timestamp::{
    BACKUP_TIMESTAMP_FORMAT, DEFAULT_TIMESTAMP_FORMAT, TimeSegment, TimestampFormat,
};
