//! Output formatting for match reports

pub mod formatter;

pub use formatter::{ConsoleFormatter, JsonFormatter, OutputFormatter, ReportGenerator};
