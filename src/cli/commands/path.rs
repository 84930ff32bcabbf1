use crate::cli::PathArgs;
use crate::path::{PathOptions, format_log_path};
use std::process::ExitCode;

/// Prints the path a log file would get for the given parts.
#[must_use]
pub fn cmd_path(args: &PathArgs) -> ExitCode {
    let mut options = PathOptions::new();
    if let Some(dir) = &args.dir {
        options = options.directory(dir);
    }
    if let Some(name) = &args.name {
        options = options.name(name);
    }
    if let Some(ext) = &args.ext {
        options = options.extension(ext);
    }
    println!("{}", format_log_path(&options, args.error_file).display());
    ExitCode::SUCCESS
}
