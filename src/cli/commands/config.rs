//! Shows what a set of flags and config file resolve to, without logging anything.

use crate::cli::ConfigArgs;
use crate::internal;
use crate::logger::Logger;
use std::process::ExitCode;

#[must_use]
pub fn cmd_config(args: &ConfigArgs, logger: &Logger) -> ExitCode {
    match logger.config_snapshot(args.format, args.pretty) {
        Ok(snapshot) => {
            println!("{}", snapshot.trim_end());
            ExitCode::SUCCESS
        }
        Err(e) => {
            internal::error("CLI", &format!("Failed to serialize config: {e}"));
            ExitCode::FAILURE
        }
    }
}
