//! One-shot logging, the operation shell scripts reach for.

use crate::cli::LogArgs;
use crate::internal;
use crate::logger::{Logger, TargetOverrides};
use std::process::ExitCode;

#[must_use]
pub fn cmd_log(args: &LogArgs, logger: &Logger) -> ExitCode {
    let overrides = TargetOverrides {
        no_console: args.no_console,
        no_file: args.no_file,
    };
    let message = args.message.join(" ");
    let result = logger
        .log(args.level, &message, args.indent, overrides)
        .and_then(|()| logger.flush());
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            internal::error("CLI", &format!("Failed to log message: {e}"));
            ExitCode::FAILURE
        }
    }
}
