//! Usage:
//!   keeplog [SESSION OPTIONS] log [--level L] [--indent N] <message...>
//!   keeplog [SESSION OPTIONS] config [--format json|toml] [--pretty]
//!   keeplog path [--dir D] [--name N] [--ext E] [--error-file]

use clap::Parser;
use keeplog::cli::{Cli, Command, cmd_config, cmd_log, cmd_path};
use keeplog::{Level, internal};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Diagnostics go to stderr before any session exists
    internal::init(Level::Warning);

    if let Command::Path(args) = &cli.command {
        return cmd_path(args);
    }

    let logger = match cli.session.build_logger() {
        Ok(logger) => logger,
        Err(e) => {
            internal::error("CLI", &format!("Failed to initialize logging: {e}"));
            return ExitCode::FAILURE;
        }
    };

    match &cli.command {
        Command::Log(args) => cmd_log(args, &logger),
        Command::Config(args) => cmd_config(args, &logger),
        Command::Path(args) => cmd_path(args),
    }
}
